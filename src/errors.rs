use std::{io, path::PathBuf};

use thiserror::Error;

use crate::formats::DocumentFormat;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("unable to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("unable to read input stream: {0}")]
    Stream(#[from] io::Error),
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("{format} support is not available (build with the `{feature}` feature)")]
    FeatureDisabled {
        format: DocumentFormat,
        feature: &'static str,
    },
    #[error("error reading delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("error reading pdf: {0}")]
    Pdf(String),
    #[error("error reading docx: {0}")]
    Docx(String),
    #[error("error reading spreadsheet: {0}")]
    Spreadsheet(String),
    #[error("error reading presentation: {0}")]
    Presentation(String),
}
