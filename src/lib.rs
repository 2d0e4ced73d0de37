//! Show diffs of git-tracked files in the `chdiff` visual diff viewer.
//!
//! The `git-chdiff` binary exports an older revision of each file into a temp
//! file and hands the pair to the viewer. `git-external-chdiff` plugs the same
//! viewer into git's `GIT_EXTERNAL_DIFF` hook.

pub mod adapter;
pub mod command;
pub mod config;
pub mod error;
pub mod janitor;
pub mod revision;
pub mod snapshot;
pub mod vcs;
pub mod viewer;
