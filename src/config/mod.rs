pub mod cli;
pub mod configuration;

pub use cli::{Cli, UsageError};
pub use configuration::ChdiffConfig;
