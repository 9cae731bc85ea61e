mod cli;

use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;
use simple_logger::SimpleLogger;
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use doctext::Converter;

use cli::{Cli, read_output};

fn main() {
    let args = Cli::parse();
    SimpleLogger::new()
        .with_level(args.log_level())
        .env()
        .with_colors(true)
        .without_timestamps()
        .init()
        .expect("logger is initialized once");

    if let Err(e) = run(args) {
        eprintln!("Error converting document: {}", e);
        std::process::exit(1)
    }
}

fn run(args: Cli) -> Result<()> {
    let mut converter = Converter::new();
    if let Some(format) = args.format {
        converter = converter.with_format(format);
    }

    let result = match args.file.as_str() {
        "-" => converter.convert_reader(io::stdin().lock())?,
        path => converter.convert(path)?,
    };
    info!(
        "Extracted {} characters from {}",
        result.text_content.len(),
        args.file
    );

    let rendered = match args.json {
        true => serde_json::to_string_pretty(&result)?,
        false => result.text_content,
    };
    render_string(rendered, read_output(&args))
}

fn render_string(result: String, output_destination: Option<PathBuf>) -> Result<()> {
    match output_destination {
        Some(out_file) => fs::write(&out_file, format!("{}\n", result))
            .map_err(|e| anyhow!("unable to write {}: {}", out_file.display(), e)),
        None => match writeln!(io::stdout().lock(), "{}", result) {
            // the reader went away (e.g. `| head`), nothing left to do
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            written => written.map_err(|e| anyhow!("unable to write to stdout: {}", e)),
        },
    }
}
