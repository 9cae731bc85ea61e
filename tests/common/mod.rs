#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use doctext::Converter;

pub const TEST_DIR: &str = "tests/data/";

pub fn data_path(fn_name: &str) -> PathBuf {
    PathBuf::from(TEST_DIR).join(fn_name)
}

pub fn assert_converted_doc_matches_expected(fn_name: &str, expected: &str) {
    let result = Converter::new()
        .convert(data_path(fn_name))
        .expect("Unable to convert test document");
    assert_eq!(result.text_content, expected);
}

/// Runs the built `doctext` binary with the given arguments
pub fn run_doctext(args: &[&str]) -> Output {
    run_doctext_with_log_env(args, None)
}

/// Same as [`run_doctext`], with `RUST_LOG` set to `rust_log` (or unset)
pub fn run_doctext_with_log_env(args: &[&str], rust_log: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_doctext"));
    command.args(args).env_remove("RUST_LOG");
    if let Some(level) = rust_log {
        command.env("RUST_LOG", level);
    }
    command.output().expect("Unable to run doctext")
}
