use super::{ChdiffCommand, Command};
use crate::error::ChdiffError;
use crate::janitor;

pub struct CleanCommand;

impl Command for CleanCommand {
    fn execute(&self, context: &ChdiffCommand) -> Result<(), ChdiffError> {
        janitor::clean_temp_files(&context.config)?;
        Ok(())
    }
}
