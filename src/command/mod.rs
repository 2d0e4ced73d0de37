use clean::CleanCommand;
use diff::DiffCommand;
use std::path::PathBuf;

use crate::config::ChdiffConfig;
use crate::error::ChdiffError;
use crate::vcs::{GitBackend, VcsBackend};
use crate::viewer::Viewer;

pub mod clean;
pub mod diff;

#[derive(Debug)]
pub enum CommandType {
    Diff(Vec<PathBuf>),
    Clean,
}

pub trait Command {
    fn execute(&self, context: &ChdiffCommand) -> Result<(), ChdiffError>;
}

impl CommandType {
    pub fn create_command(self) -> Box<dyn Command> {
        match self {
            CommandType::Diff(files) => Box::new(DiffCommand { files }),
            CommandType::Clean => Box::new(CleanCommand),
        }
    }
}

/// Shared state for one run: configuration plus the two external tools.
pub struct ChdiffCommand {
    pub config: ChdiffConfig,
    pub backend: Box<dyn VcsBackend>,
    pub viewer: Viewer,
}

impl ChdiffCommand {
    pub fn new(config: ChdiffConfig) -> Self {
        ChdiffCommand {
            backend: Box::new(GitBackend::new(&config.vcs_program)),
            viewer: Viewer::from_config(&config),
            config,
        }
    }

    pub fn execute(&self, command_type: CommandType) -> Result<(), ChdiffError> {
        command_type.create_command().execute(self)
    }
}
