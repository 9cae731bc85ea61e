use doctext::{Converter, DocumentFormat};
use log::Level;
use logtest::Logger;

#[test]
fn test_fallbacks_warn() {
    let mut logger = Logger::start();

    let result = Converter::new()
        .with_format(DocumentFormat::PlainText)
        .convert_reader(&b"caf\xE9"[..])
        .unwrap();
    assert_eq!(result.text_content, "caf\u{FFFD}");
    let record = logger
        .find(|record| record.level() == Level::Warn)
        .expect("expected a warning");
    assert!(record.args().contains("not valid UTF-8"));

    let result = Converter::new()
        .with_format(DocumentFormat::Json)
        .convert_reader(&b"{\"open\": "[..])
        .unwrap();
    assert_eq!(result.text_content, "{\"open\":");
    let record = logger
        .find(|record| record.level() == Level::Warn)
        .expect("expected a warning");
    assert!(record.args().contains("Invalid JSON"));
}
