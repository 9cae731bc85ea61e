use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::backends::{delimited, html, json, plain};
use crate::errors::ConversionError;
use crate::formats::DocumentFormat;
use crate::utils::normalize_text;

/// The outcome of a conversion: the document's text plus its title, when the format records one
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentConverterResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text_content: String,
}

impl DocumentConverterResult {
    /// Builds a result, normalizing the text (see [`normalize_text`]) and dropping blank titles
    pub fn new(title: Option<String>, text: &str) -> Self {
        DocumentConverterResult {
            title: title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            text_content: normalize_text(text),
        }
    }
}

impl fmt::Display for DocumentConverterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text_content)
    }
}

/// Detects a document's format and extracts its text.
///
/// ```no_run
/// use doctext::{Converter, DocumentFormat};
///
/// // detect from the extension (or, failing that, the content)
/// let notes = Converter::new().convert("notes.md")?;
///
/// // or force a format
/// let export = Converter::new().with_format(DocumentFormat::Csv).convert("export.dat")?;
/// # Ok::<(), doctext::ConversionError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Converter {
    format: Option<DocumentFormat>,
}

impl Converter {
    pub fn new() -> Self {
        Converter { format: None }
    }

    /// Skips detection and always reads input as `format`
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Reads the file at `path` and converts it. The format is the forced one if set, otherwise
    /// taken from the extension, otherwise sniffed from the content.
    pub fn convert<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<DocumentConverterResult, ConversionError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConversionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = self
            .format
            .or_else(|| DocumentFormat::from_path(path))
            .or_else(|| DocumentFormat::sniff(&bytes))
            .ok_or_else(|| {
                ConversionError::UnsupportedFormat(
                    path.extension()
                        .map(|ext| format!(".{}", ext.to_string_lossy()))
                        .unwrap_or_else(|| "unknown".to_string()),
                )
            })?;
        debug!("Converting {} as {}", path.display(), format);
        self.convert_bytes(&bytes, format)
    }

    /// Reads `reader` to the end and converts what it produced. Without a forced format the
    /// content is sniffed.
    pub fn convert_reader<R: Read>(
        &self,
        mut reader: R,
    ) -> Result<DocumentConverterResult, ConversionError> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes)?;
        let format = self
            .format
            .or_else(|| DocumentFormat::sniff(&bytes))
            .ok_or_else(|| ConversionError::UnsupportedFormat("unknown".to_string()))?;
        debug!("Converting {} bytes of stream input as {}", bytes.len(), format);
        self.convert_bytes(&bytes, format)
    }

    /// Runs the backend for `format` over `bytes`
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<DocumentConverterResult, ConversionError> {
        match format {
            DocumentFormat::PlainText | DocumentFormat::Markdown => Ok(plain::convert_plain(bytes)),
            DocumentFormat::Json => Ok(json::convert_json(bytes)),
            DocumentFormat::Csv => delimited::convert_delimited(bytes, b','),
            DocumentFormat::Tsv => delimited::convert_delimited(bytes, b'\t'),
            DocumentFormat::Html => Ok(html::convert_html(bytes)),
            #[cfg(feature = "pdf")]
            DocumentFormat::Pdf => crate::backends::pdf::convert_pdf(bytes),
            #[cfg(feature = "docx")]
            DocumentFormat::Docx => crate::backends::docx::convert_docx(bytes),
            #[cfg(feature = "office")]
            DocumentFormat::Xlsx => crate::backends::xlsx::convert_xlsx(bytes),
            #[cfg(feature = "office")]
            DocumentFormat::Pptx => crate::backends::pptx::convert_pptx(bytes),
            #[allow(unreachable_patterns)]
            _ => Err(ConversionError::FeatureDisabled {
                format,
                feature: format.required_feature().unwrap_or("default"),
            }),
        }
    }
}
