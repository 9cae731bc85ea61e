//! Document formats `doctext` knows how to read, and the detection rules that map a file (by
//! extension or by content) onto one of them.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;

static PDF_MAGIC: &[u8] = b"%PDF-";
static ZIP_MAGIC: &[u8] = b"PK\x03\x04";
static UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DocumentFormat {
    #[value(name = "text")]
    PlainText,
    Markdown,
    Json,
    Csv,
    Tsv,
    Html,
    Pdf,
    Docx,
    Xlsx,
    Pptx,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::PlainText => "text",
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Json => "json",
            DocumentFormat::Csv => "csv",
            DocumentFormat::Tsv => "tsv",
            DocumentFormat::Html => "html",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Xlsx => "xlsx",
            DocumentFormat::Pptx => "pptx",
        };
        write!(f, "{}", name)
    }
}

impl DocumentFormat {
    /// Maps a file extension (without the leading dot, any case) to a format
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "txt" | "text" | "log" => Some(DocumentFormat::PlainText),
            "md" | "markdown" => Some(DocumentFormat::Markdown),
            "json" => Some(DocumentFormat::Json),
            "csv" => Some(DocumentFormat::Csv),
            "tsv" => Some(DocumentFormat::Tsv),
            "html" | "htm" | "xhtml" => Some(DocumentFormat::Html),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(DocumentFormat::Xlsx),
            "pptx" => Some(DocumentFormat::Pptx),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Guesses the format from the leading bytes of a document. Used when a file has no (or an
    /// unknown) extension and for input read from stdin.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            return Some(DocumentFormat::Pdf);
        }
        if bytes.starts_with(ZIP_MAGIC) {
            // member names sit uncompressed in the local file headers
            return if contains(bytes, b"word/") {
                Some(DocumentFormat::Docx)
            } else if contains(bytes, b"xl/") {
                Some(DocumentFormat::Xlsx)
            } else if contains(bytes, b"ppt/") {
                Some(DocumentFormat::Pptx)
            } else {
                None
            };
        }

        let text = std::str::from_utf8(bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)).ok()?;
        let trimmed = text.trim_start();
        if trimmed.starts_with('<') {
            let head: String = trimmed.chars().take(1024).collect::<String>().to_lowercase();
            if head.contains("<html") || head.contains("<!doctype html") {
                return Some(DocumentFormat::Html);
            }
        }
        if (trimmed.starts_with('{') || trimmed.starts_with('['))
            && serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
        {
            return Some(DocumentFormat::Json);
        }
        Some(DocumentFormat::PlainText)
    }

    /// The cargo feature a format's backend lives behind, if any
    pub fn required_feature(&self) -> Option<&'static str> {
        match self {
            DocumentFormat::Pdf => Some("pdf"),
            DocumentFormat::Docx => Some("docx"),
            DocumentFormat::Xlsx | DocumentFormat::Pptx => Some("office"),
            _ => None,
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("txt", DocumentFormat::PlainText)]
    #[case("LOG", DocumentFormat::PlainText)]
    #[case("md", DocumentFormat::Markdown)]
    #[case("Json", DocumentFormat::Json)]
    #[case("csv", DocumentFormat::Csv)]
    #[case("tsv", DocumentFormat::Tsv)]
    #[case("htm", DocumentFormat::Html)]
    #[case("PDF", DocumentFormat::Pdf)]
    #[case("docx", DocumentFormat::Docx)]
    #[case("xls", DocumentFormat::Xlsx)]
    #[case("pptx", DocumentFormat::Pptx)]
    fn test_from_extension(#[case] extension: &str, #[case] expected: DocumentFormat) {
        assert_eq!(DocumentFormat::from_extension(extension), Some(expected));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(DocumentFormat::from_extension("doc"), None);
        assert_eq!(DocumentFormat::from_path(Path::new("archive.tar.gz")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_from_path_uses_last_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes/backup.pdf.txt")),
            Some(DocumentFormat::PlainText)
        );
    }

    #[rstest]
    #[case(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3".to_vec(), Some(DocumentFormat::Pdf))]
    #[case(b"PK\x03\x04\x14\x00\x00\x00word/document.xml".to_vec(), Some(DocumentFormat::Docx))]
    #[case(b"PK\x03\x04\x14\x00\x00\x00xl/workbook.xml".to_vec(), Some(DocumentFormat::Xlsx))]
    #[case(b"PK\x03\x04\x14\x00\x00\x00ppt/presentation.xml".to_vec(), Some(DocumentFormat::Pptx))]
    #[case(b"PK\x03\x04\x14\x00\x00\x00mimetype".to_vec(), None)]
    #[case(b"<!DOCTYPE html><html><body>hi</body></html>".to_vec(), Some(DocumentFormat::Html))]
    #[case(b"\xEF\xBB\xBF{\"a\": 1}".to_vec(), Some(DocumentFormat::Json))]
    #[case(b"[1, 2".to_vec(), Some(DocumentFormat::PlainText))]
    #[case(b"<note>not html</note>".to_vec(), Some(DocumentFormat::PlainText))]
    #[case(b"just words".to_vec(), Some(DocumentFormat::PlainText))]
    #[case(vec![0xff, 0xfe, 0x00, 0x81], None)]
    fn test_sniff(#[case] bytes: Vec<u8>, #[case] expected: Option<DocumentFormat>) {
        assert_eq!(DocumentFormat::sniff(&bytes), expected);
    }

    #[test]
    fn test_display_matches_value_names() {
        for format in DocumentFormat::value_variants() {
            let value = format.to_possible_value().expect("no skipped variants");
            assert_eq!(value.get_name(), format.to_string());
        }
    }
}
