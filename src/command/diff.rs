use std::path::{Component, Path, PathBuf};

use super::{ChdiffCommand, Command};
use crate::error::ChdiffError;
use crate::snapshot::{self, Snapshot};
use crate::vcs::Membership;
use crate::viewer::ViewerMode;

pub struct DiffCommand {
    pub files: Vec<PathBuf>,
}

/// How a single operand ended when it did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Diffed { snapshot: Snapshot, removed: bool },
    NotAFile,
    NotTracked,
    Unchanged,
}

#[derive(Debug)]
pub struct FileReport {
    pub file: PathBuf,
    pub outcome: Result<FileOutcome, ChdiffError>,
}

impl Command for DiffCommand {
    fn execute(&self, context: &ChdiffCommand) -> Result<(), ChdiffError> {
        self.run(context);
        Ok(())
    }
}

impl DiffCommand {
    /// Process every operand in order. A failure is reported and recorded for
    /// its file only; the remaining files are still processed.
    pub fn run(&self, context: &ChdiffCommand) -> Vec<FileReport> {
        self.files
            .iter()
            .map(|file| {
                let file = normalize_path(file);
                let outcome = diff_file(context, &file);
                let report = FileReport { file, outcome };
                print_report(context, &report);
                report
            })
            .collect()
    }
}

fn diff_file(context: &ChdiffCommand, file: &Path) -> Result<FileOutcome, ChdiffError> {
    let config = &context.config;
    if config.verbose {
        println!("-> working on {}", file.display());
    }

    if !file.is_file() {
        return Ok(FileOutcome::NotAFile);
    }

    let canonical = match context.backend.status(file)? {
        Membership::Tracked { canonical } => canonical,
        Membership::NotTracked => return Ok(FileOutcome::NotTracked),
        Membership::Unchanged => return Ok(FileOutcome::Unchanged),
    };
    if config.verbose {
        println!("    git path: {}", canonical.display());
    }

    let snapshot = snapshot::export_revision(
        context.backend.as_ref(),
        config,
        &config.revision,
        &canonical,
        file,
    )?;
    if config.verbose {
        println!("    temp file: {}", snapshot.path().display());
    }

    context
        .viewer
        .compare_snapshot(&snapshot, file, config.viewer_mode)?;

    Ok(FileOutcome::Diffed {
        snapshot,
        removed: config.viewer_mode == ViewerMode::BlockUntilClosed,
    })
}

fn print_report(context: &ChdiffCommand, report: &FileReport) {
    let file = report.file.display();
    match &report.outcome {
        Ok(FileOutcome::Diffed { .. }) => {}
        Ok(FileOutcome::NotAFile) => eprintln!("{file} is not a file"),
        Ok(FileOutcome::NotTracked) => eprintln!("{file} not in git repository.....skipping"),
        Ok(FileOutcome::Unchanged) => {
            if context.config.verbose {
                println!("    {file} unchanged.....skipping");
            }
        }
        Err(e) => eprintln!("{e}"),
    }
}

/// Lexically normalise a path: drop `.` components and fold `dir/..` pairs.
/// Leading `..` components are kept, and an empty result becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
