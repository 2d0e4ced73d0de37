use git_chdiff::command::{ChdiffCommand, CommandType};
use git_chdiff::config::{ChdiffConfig, Cli, UsageError};
use git_chdiff::error::ChdiffError;
use std::process;

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(usage) => {
            eprintln!("{usage}");
            process::exit(UsageError::EXIT_CODE);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("\x1b[91m\rerror:\x1b[0m {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ChdiffError> {
    let config = ChdiffConfig::build(&cli);
    let command = ChdiffCommand::new(config);

    let command_type = if cli.clean {
        CommandType::Clean
    } else {
        CommandType::Diff(cli.files)
    };

    command.execute(command_type)
}
