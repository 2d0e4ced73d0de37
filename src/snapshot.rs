//! Materialises a historical revision of a file into a temp file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ChdiffConfig;
use crate::error::ChdiffError;
use crate::revision::Revision;
use crate::vcs::{VcsBackend, VcsError};

/// A temp file holding a file's content at some revision.
///
/// Not removed on drop: whether it may be deleted depends on whether the
/// viewer still needs it, see [`crate::viewer::ViewerMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Snapshot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Exports `canonical` at `revision` into a uniquely named file in the
/// configured temp directory.
///
/// `display_path` is the path as the user gave it, used in the diagnostic when
/// the revision cannot be read. No file is created in that case.
pub fn export_revision(
    backend: &dyn VcsBackend,
    config: &ChdiffConfig,
    revision: &Revision,
    canonical: &Path,
    display_path: &Path,
) -> Result<Snapshot, ChdiffError> {
    let content = backend.show(revision, canonical).map_err(|e| match e {
        VcsError::FetchFailed { first_line, .. } => ChdiffError::RevisionUnavailable {
            revision: revision.to_string(),
            path: display_path.to_path_buf(),
            first_line,
        },
        other => other.into(),
    })?;

    write_snapshot(config, &content)
}

/// Write `content` byte for byte to a new `<prefix>XXXXXX<suffix>` file.
pub fn write_snapshot(config: &ChdiffConfig, content: &[u8]) -> Result<Snapshot, ChdiffError> {
    let mut file = tempfile::Builder::new()
        .prefix(&config.snapshot_prefix)
        .suffix(&config.snapshot_suffix)
        .tempfile_in(&config.temp_dir)?;
    file.write_all(content)?;
    file.flush()?;

    let (_, path) = file.keep().map_err(|e| e.error)?;
    log::debug!("wrote {} bytes to {}", content.len(), path.display());

    Ok(Snapshot::from_path(path))
}
