use std::io;
use std::path::Path;
use thiserror::Error;

use super::status::Membership;
use crate::revision::Revision;

/// Error types for VCS operations.
#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Execution failed: {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// `git show` answered with a failure marker (or a failing exit status).
    #[error("could not read {object}: {first_line}")]
    FetchFailed { object: String, first_line: String },
}

/// Operations the diff loop needs from the version-control system.
///
/// Not `Send + Sync`: each run drives one backend from a single thread.
pub trait VcsBackend {
    /// Decide whether `path` is tracked and recover its canonical repo path.
    fn status(&self, path: &Path) -> Result<Membership, VcsError>;

    /// Raw bytes of `path` as of `revision`.
    fn show(&self, revision: &Revision, path: &Path) -> Result<Vec<u8>, VcsError>;
}
