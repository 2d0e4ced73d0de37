//! Sweeps snapshots left behind by detached viewer sessions.
//!
//! Nothing is tracked between runs. A file is ours when it is a regular file,
//! its name carries the snapshot prefix and suffix, and the invoking user owns
//! it. [`select_stale`] applies those rules to a listing so they can be tested
//! without touching a shared temp directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ChdiffConfig;
use crate::error::ChdiffError;

/// What the janitor needs to know about one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempEntry {
    pub path: PathBuf,
    pub is_file: bool,
    pub owner: Option<u32>,
}

/// Entries that are regular files, named like our snapshots and owned by `uid`.
pub fn select_stale(entries: &[TempEntry], config: &ChdiffConfig, uid: u32) -> Vec<PathBuf> {
    entries
        .iter()
        .filter(|entry| entry.is_file)
        .filter(|entry| {
            entry
                .path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| config.is_snapshot_name(name))
        })
        .filter(|entry| entry.owner == Some(uid))
        .map(|entry| entry.path.clone())
        .collect()
}

/// List `dir` without following symlinks.
pub fn list_temp_dir(dir: &Path) -> io::Result<Vec<TempEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        entries.push(TempEntry {
            path: entry.path(),
            is_file: metadata.is_file(),
            owner: owner_of(&metadata),
        });
    }
    Ok(entries)
}

#[cfg(unix)]
fn owner_of(metadata: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.uid())
}

#[cfg(not(unix))]
fn owner_of(_metadata: &fs::Metadata) -> Option<u32> {
    None
}

/// The uid of the invoking user, read back from a file this process creates.
#[cfg(unix)]
pub fn current_uid() -> io::Result<u32> {
    use std::os::unix::fs::MetadataExt;
    let probe = tempfile::tempfile()?;
    Ok(probe.metadata()?.uid())
}

#[cfg(not(unix))]
pub fn current_uid() -> io::Result<u32> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "file ownership is only available on unix",
    ))
}

/// Delete every stale snapshot in the configured temp directory.
///
/// Returns the removed paths. Any failure aborts the sweep.
pub fn clean_temp_files(config: &ChdiffConfig) -> Result<Vec<PathBuf>, ChdiffError> {
    sweep(config).map_err(|e| ChdiffError::CleanFailed(e.to_string()))
}

fn sweep(config: &ChdiffConfig) -> io::Result<Vec<PathBuf>> {
    if config.verbose {
        println!("scanning for {} temp files to clean", config.snapshot_prefix);
    }

    let uid = current_uid()?;
    let entries = list_temp_dir(&config.temp_dir)?;
    let stale = select_stale(&entries, config, uid);

    for path in &stale {
        if config.verbose {
            println!("removing temp file: {}", path.display());
        }
        fs::remove_file(path)?;
    }
    log::debug!("removed {} snapshot(s) from {}", stale.len(), config.temp_dir.display());

    Ok(stale)
}
