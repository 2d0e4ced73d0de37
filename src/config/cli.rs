use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;

use crate::revision::Revision;

pub const HELP_MESSAGE: &str = indoc! {"
    git-chdiff <opts> [file1, file2, ...]

    display diffs of git files using the chdiff utility

      -h, --help        display this message
      -r, --revision    the revision of the file to use
                           defaults to 'HEAD~1', the previous commit
      -w, --wait        cause chdiff to wait between files
      -v, --verbose     print more messages during operation
      --clean           clean any temp files that might have been left around
"};

/// Parsed command line of `git-chdiff`.
///
/// clap's own help flag is disabled: `-h` is routed through [`UsageError`]
/// so help and bad arguments share stderr and exit code 2.
#[derive(Parser, Debug, Default)]
#[command(name = "git-chdiff", disable_help_flag = true)]
pub struct Cli {
    /// Display the help message
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Revision of each file to diff against
    #[arg(short = 'r', long = "revision", value_name = "REV")]
    pub revision: Option<Revision>,

    /// Ask the viewer to block until it is closed, then remove the temp file
    #[arg(short = 'w', long = "wait")]
    pub wait: bool,

    /// Print progress messages
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Remove temp files left behind by earlier runs
    #[arg(long = "clean")]
    pub clean: bool,

    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// A rejected command line, rendered as `<prog>: <message>` plus the help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub program: String,
    pub message: Option<String>,
    pub help: &'static str,
}

impl UsageError {
    pub const EXIT_CODE: i32 = 2;

    pub fn new(program: &str, message: Option<String>, help: &'static str) -> Self {
        UsageError {
            program: program.to_string(),
            message,
            help,
        }
    }

    /// Keeps only the first line of a clap error, without its `error: ` tag.
    pub fn from_clap(program: &str, err: &clap::Error, help: &'static str) -> Self {
        let rendered = err.to_string();
        let message = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();

        Self::new(program, Some(message), help)
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            writeln!(f, "{}: {}", self.program, message)?;
        }
        write!(f, "{}", self.help)
    }
}

impl Cli {
    pub fn try_parse_args<I, T>(args: I) -> Result<Cli, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = program_name(args.first());

        let cli = Cli::try_parse_from(&args)
            .map_err(|e| UsageError::from_clap(&program, &e, HELP_MESSAGE))?;

        if cli.help {
            return Err(UsageError::new(&program, None, HELP_MESSAGE));
        }

        Ok(cli)
    }
}

/// Last path component of argv[0], falling back to the binary name.
pub fn program_name(arg0: Option<&OsString>) -> String {
    arg0.map(PathBuf::from)
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "git-chdiff".to_string())
}
