use crate::vcs::VcsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChdiffError {
    #[error("{0}")]
    VcsError(#[from] VcsError),

    #[error("Execution failed: {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("problem getting revision {revision} of file {}\n    {first_line}", .path.display())]
    RevisionUnavailable {
        revision: String,
        path: PathBuf,
        first_line: String,
    },

    #[error("Clean failed: {0}")]
    CleanFailed(String),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl ChdiffError {
    /// Wraps a failed `Command::spawn`/`output` call with the program name.
    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        ChdiffError::SpawnFailed {
            program: program.into(),
            source,
        }
    }
}
