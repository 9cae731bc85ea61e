//! Backends turn the raw bytes of one document format into a [`DocumentConverterResult`].
//! Currently the backends include:
//!
//! - plain text and Markdown (passed through)
//! - JSON (pretty-printed)
//! - delimited text, i.e. CSV and TSV (Markdown tables)
//! - HTML (light Markdown)
//! - PDF (behind the `pdf` feature)
//! - Docx (behind the `docx` feature)
//! - Xlsx and Pptx (behind the `office` feature)
//!
//! [`DocumentConverterResult`]: crate::converter::DocumentConverterResult

pub mod delimited;
#[cfg(feature = "docx")]
pub mod docx;
pub mod html;
pub mod json;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod plain;
#[cfg(feature = "office")]
pub mod pptx;
#[cfg(feature = "office")]
pub mod xlsx;
