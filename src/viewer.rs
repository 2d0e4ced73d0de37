//! Launches the external visual diff viewer.
//!
//! Two different waits are involved and they are kept apart here:
//! the parent process always waits for the viewer *process* to exit, while
//! [`ViewerMode`] controls whether the viewer is asked (via its wait switch)
//! to stay in the foreground until the user closes the comparison.

use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::config::ChdiffConfig;
use crate::error::ChdiffError;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerMode {
    /// The viewer returns right away and keeps displaying on its own.
    Detached,
    /// The viewer is passed its wait switch and returns once dismissed.
    BlockUntilClosed,
}

impl ViewerMode {
    pub fn from_wait_flag(wait: bool) -> Self {
        if wait {
            ViewerMode::BlockUntilClosed
        } else {
            ViewerMode::Detached
        }
    }
}

pub struct Viewer {
    program: String,
    wait_switch: String,
}

impl Viewer {
    pub fn new(program: impl Into<String>, wait_switch: impl Into<String>) -> Self {
        Viewer {
            program: program.into(),
            wait_switch: wait_switch.into(),
        }
    }

    pub fn from_config(config: &ChdiffConfig) -> Self {
        Self::new(&config.viewer_program, &config.viewer_wait_switch)
    }

    /// Run the viewer on `old` and `new` and wait for the process to exit.
    pub fn compare(
        &self,
        old: &Path,
        new: &Path,
        mode: ViewerMode,
    ) -> Result<ExitStatus, ChdiffError> {
        let mut command = Command::new(&self.program);
        if mode == ViewerMode::BlockUntilClosed {
            command.arg(&self.wait_switch);
        }
        command.arg(old).arg(new);
        log::debug!("running {:?}", command);

        let output = command
            .output()
            .map_err(|e| ChdiffError::spawn(&self.program, e))?;
        log::debug!(
            "{} exited with {}: {}",
            self.program,
            output.status,
            String::from_utf8_lossy(&output.stdout).trim_end()
        );

        Ok(output.status)
    }

    /// Compare a snapshot against the working copy. In
    /// [`ViewerMode::BlockUntilClosed`] the snapshot is removed once the
    /// viewer returns; otherwise it is left for the janitor.
    pub fn compare_snapshot(
        &self,
        snapshot: &Snapshot,
        new: &Path,
        mode: ViewerMode,
    ) -> Result<ExitStatus, ChdiffError> {
        let status = self.compare(snapshot.path(), new, mode)?;

        if mode == ViewerMode::BlockUntilClosed {
            fs::remove_file(snapshot.path())?;
        }

        Ok(status)
    }
}
