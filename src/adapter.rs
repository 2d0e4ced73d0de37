//! Entry point for `GIT_EXTERNAL_DIFF`.
//!
//! git invokes the external diff program as
//! `path old-file old-hex old-mode new-file new-hex new-mode`, followed by
//! extra arguments for renames. Only the two file positions are used.

use std::ffi::OsString;
use std::path::PathBuf;

use indoc::indoc;

use crate::config::cli::program_name;
use crate::config::{ChdiffConfig, UsageError};
use crate::error::ChdiffError;
use crate::viewer::{Viewer, ViewerMode};

pub const ADAPTER_HELP_MESSAGE: &str = indoc! {"
    git-external-chdiff [old-file] [new-file]

    display diffs of git files using the chdiff utility
    as a proxy for GIT_EXTERNAL_DIFF via git
"};

const OLD_FILE_POSITION: usize = 2;
const NEW_FILE_POSITION: usize = 5;
const REQUIRED_ARGS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDiffArgs {
    pub old_file: PathBuf,
    pub new_file: PathBuf,
}

impl ExternalDiffArgs {
    /// Pick the old and new file out of git's argv, `args[0]` being the
    /// program itself.
    pub fn from_args<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = program_name(args.first());

        if args.len() < REQUIRED_ARGS {
            return Err(UsageError::new(
                &program,
                Some(format!(
                    "expected 7 arguments from git, got {}",
                    args.len().saturating_sub(1)
                )),
                ADAPTER_HELP_MESSAGE,
            ));
        }

        Ok(ExternalDiffArgs {
            old_file: PathBuf::from(&args[OLD_FILE_POSITION]),
            new_file: PathBuf::from(&args[NEW_FILE_POSITION]),
        })
    }
}

/// Show the pair in the viewer, always asking it to block until closed so git
/// does not remove its temp files while they are on screen.
pub fn forward(viewer: &Viewer, args: &ExternalDiffArgs) -> Result<(), ChdiffError> {
    log::info!(
        "comparing {} {}",
        args.old_file.display(),
        args.new_file.display()
    );
    viewer.compare(&args.old_file, &args.new_file, ViewerMode::BlockUntilClosed)?;
    Ok(())
}

/// Runs the adapter and returns the process exit code. Viewer failures are
/// reported on stderr but do not fail git's diff.
pub fn run<I, T>(args: I, config: &ChdiffConfig) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = match ExternalDiffArgs::from_args(args) {
        Ok(args) => args,
        Err(usage) => {
            eprintln!("{usage}");
            return UsageError::EXIT_CODE;
        }
    };

    if let Err(e) = forward(&Viewer::from_config(config), &args) {
        eprintln!("{e}");
    }
    0
}
