use std::path::PathBuf;

use crate::config::cli::Cli;
use crate::revision::Revision;
use crate::viewer::ViewerMode;

/// Everything a run needs besides the file operands.
#[derive(Debug, Clone)]
pub struct ChdiffConfig {
    pub vcs_program: String,
    pub viewer_program: String,
    pub viewer_wait_switch: String,
    pub temp_dir: PathBuf,
    pub snapshot_prefix: String,
    pub snapshot_suffix: String,
    pub revision: Revision,
    pub viewer_mode: ViewerMode,
    pub verbose: bool,
}

fn default_vcs_program() -> String {
    "git".to_string()
}

fn default_viewer_program() -> String {
    "chdiff".to_string()
}

fn default_viewer_wait_switch() -> String {
    "--wait".to_string()
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("/var/tmp")
}

fn default_snapshot_prefix() -> String {
    "git-chdiff".to_string()
}

fn default_snapshot_suffix() -> String {
    ".temp".to_string()
}

impl ChdiffConfig {
    pub fn build(cli: &Cli) -> Self {
        let defaults = ChdiffConfig::default();

        ChdiffConfig {
            revision: cli.revision.clone().unwrap_or(defaults.revision.clone()),
            viewer_mode: ViewerMode::from_wait_flag(cli.wait),
            verbose: cli.verbose,
            ..defaults
        }
    }

    /// True when `file_name` carries both the snapshot prefix and suffix.
    pub fn is_snapshot_name(&self, file_name: &str) -> bool {
        file_name.len() >= self.snapshot_prefix.len() + self.snapshot_suffix.len()
            && file_name.starts_with(&self.snapshot_prefix)
            && file_name.ends_with(&self.snapshot_suffix)
    }
}

impl Default for ChdiffConfig {
    fn default() -> Self {
        ChdiffConfig {
            vcs_program: default_vcs_program(),
            viewer_program: default_viewer_program(),
            viewer_wait_switch: default_viewer_wait_switch(),
            temp_dir: default_temp_dir(),
            snapshot_prefix: default_snapshot_prefix(),
            snapshot_suffix: default_snapshot_suffix(),
            revision: Revision::default(),
            viewer_mode: ViewerMode::Detached,
            verbose: false,
        }
    }
}
