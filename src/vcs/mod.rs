//! Version-control plumbing.
//!
//! Everything here shells out to the `git` binary and classifies its
//! human-readable output. The output is sniffed instead of trusting exit
//! codes because `git show` and older `git status` do not report failure
//! consistently through their exit status.

mod backend;
mod git;
mod status;
#[cfg(test)]
pub mod test_utils;

pub use backend::{VcsBackend, VcsError};
pub use git::GitBackend;
pub use status::{
    classify_status, first_line, sniff_failure, Membership, FETCH_FAILURE_MARKERS,
    NOT_TRACKED_MARKERS, STATUS_PATH_DELIMITER,
};
