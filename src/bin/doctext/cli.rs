use clap::{ArgAction, Parser};
use doctext::DocumentFormat;
use log::LevelFilter;
use std::path::PathBuf;

/// Main entrypoint for doctext when called as executable
#[derive(Parser)]
#[command(name = "doctext", version, about)]
pub struct Cli {
    /// Document to extract text from. To read from standard input (stdin), use "-".
    pub file: String,

    /// Provide a filename for the output.
    /// To send to standard out (stdout), use "-" (the default).
    #[arg(short = 'o', long = "out-file")]
    pub output: Option<String>,

    /// Read the input as this format instead of detecting it from the file extension or content.
    #[arg(value_enum, short = 'f', long = "format")]
    pub format: Option<DocumentFormat>,

    /// Print the title and text content as JSON instead of plain text.
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Log more about what is going on (repeat for more detail). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub fn read_output(args: &Cli) -> Option<PathBuf> {
    match args.output.as_deref() {
        None | Some("-") => None,
        Some(output) => Some(PathBuf::from(output)),
    }
}
