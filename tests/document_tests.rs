use assert_json_diff::assert_json_eq;
use doctext::{ConversionError, Converter, DocumentFormat};
use rstest::rstest;
use serde_json::{Value, json};

use common::{assert_converted_doc_matches_expected, data_path};

pub mod common;

#[rstest]
#[case::plain_text(
    "sample.txt",
    "Minutes of the planning meeting\n\nAttendees: Ana, Bo, Chidi.\nDecisions: ship the beta on Friday."
)]
#[case::markdown("notes.md", "# Release notes\n\n* faster start-up\n* fewer crashes")]
#[case::html(
    "page.html",
    "# Birds of the Marsh\n\nThe **heron** waits; the *rail* hides.\n\n* Grey heron\n* Water rail"
)]
#[case::csv(
    "inventory.csv",
    "| item | count | location |\n| --- | --- | --- |\n| lantern | 4 | shed |\n| rope, 20m | 2 | boat |"
)]
#[case::sniffed_without_extension("mystery", "No extension here, just words.")]
fn test_documents(#[case] fn_name: &str, #[case] expected: &str) {
    assert_converted_doc_matches_expected(fn_name, expected)
}

#[test]
fn test_html_title() {
    let result = Converter::new().convert(data_path("page.html")).unwrap();
    assert_eq!(result.title.as_deref(), Some("Field Guide"));
}

#[test]
fn test_json_is_pretty_printed() {
    let result = Converter::new().convert(data_path("config.json")).unwrap();
    assert!(result.text_content.contains("\n  \"name\": \"marsh\""));
    let parsed: Value = serde_json::from_str(&result.text_content).unwrap();
    assert_json_eq!(
        parsed,
        json!({"name": "marsh", "tags": ["birds", "water"], "depth": 1.5})
    );
}

#[test]
fn test_forced_format_overrides_extension() {
    let result = Converter::new()
        .with_format(DocumentFormat::PlainText)
        .convert(data_path("page.html"))
        .unwrap();
    assert!(result.text_content.starts_with("<!DOCTYPE html>"));
    assert_eq!(result.title, None);
}

#[test]
fn test_repeated_conversion_is_deterministic() {
    let converter = Converter::new();
    for fn_name in ["sample.txt", "page.html", "inventory.csv", "config.json"] {
        let first = converter.convert(data_path(fn_name)).unwrap();
        let second = converter.convert(data_path(fn_name)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_nonexistent_file() {
    let err = Converter::new()
        .convert(data_path("no-such-file.txt"))
        .unwrap_err();
    assert!(matches!(err, ConversionError::Io { .. }));
}

#[test]
fn test_directory_is_not_a_document() {
    let err = Converter::new().convert("tests/data").unwrap_err();
    assert!(matches!(err, ConversionError::Io { .. }));
}

#[test]
fn test_unsupported_binary() {
    let file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
    std::fs::write(file.path(), [0u8, 159, 146, 150, 0xff]).unwrap();
    let err = Converter::new().convert(file.path()).unwrap_err();
    assert_eq!(err.to_string(), "unsupported file type: .bin");
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_pages_in_order() {
    let result = Converter::new().convert(data_path("report.pdf")).unwrap();
    let pages: Vec<&str> = result.text_content.split("\n\n").collect();
    assert_eq!(pages, ["Quarterly", "Appendix"]);
}

#[cfg(feature = "office")]
#[test]
fn test_workbook_sheets() {
    assert_converted_doc_matches_expected(
        "ledger.xlsx",
        "## Sales\n\n| Item | Qty |\n| --- | --- |\n| Tea | 3 |\n| Coffee | 2.5 |\n\n\
         ## Empty\n\n\
         ## Notes\n\n| Remember the milk |\n| --- |",
    );
}
