//! Plain-text extraction for everyday documents.
//!
//! This crate provides a CLI tool (`doctext`) that prints the text content of a document, and
//! library access to the [`Converter`] behind it. Output is plain text with a light touch of
//! Markdown (headings, lists, tables) so that document structure survives the trip.
//!
//! ```no_run
//! use doctext::Converter;
//!
//! let result = Converter::new().convert("report.docx")?;
//! println!("{}", result.text_content);
//! # Ok::<(), doctext::ConversionError>(())
//! ```
//!
//! Current backends include:
//!
//! - Plain text and Markdown (passed through)
//! - JSON (pretty-printed) and CSV/TSV (rendered as Markdown tables)
//! - HTML
//! - PDF (behind the `pdf` feature)
//! - Docx (behind the `docx` feature)
//! - Xlsx and Pptx (behind the `office` feature)
//!
//! All features are enabled by default. A format whose feature is disabled is still detected,
//! but converting it returns [`ConversionError::FeatureDisabled`].

pub mod backends;
pub mod converter;
pub mod errors;
pub mod formats;
pub mod utils;

pub use converter::{Converter, DocumentConverterResult};
pub use errors::ConversionError;
pub use formats::DocumentFormat;
