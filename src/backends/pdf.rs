//! PDF text extraction via `pdf-extract`.
//!
//! Pages are extracted one at a time and joined with form feeds, which
//! [`DocumentConverterResult::new`] turns into blank lines. Scanned PDFs without a text layer come
//! back empty rather than failing.

use log::debug;
use pdf_extract::extract_text_from_mem_by_pages;

use crate::converter::DocumentConverterResult;
use crate::errors::ConversionError;

pub fn convert_pdf(bytes: &[u8]) -> Result<DocumentConverterResult, ConversionError> {
    let pages =
        extract_text_from_mem_by_pages(bytes).map_err(|e| ConversionError::Pdf(e.to_string()))?;
    debug!("Extracted text from {} page(s)", pages.len());
    let raw = pages
        .iter()
        .map(|page| page.trim())
        .collect::<Vec<&str>>()
        .join("\u{000C}");
    Ok(DocumentConverterResult::new(None, &raw))
}
