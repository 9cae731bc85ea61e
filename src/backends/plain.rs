use crate::converter::DocumentConverterResult;
use crate::utils::decode_text;

/// Plain text and Markdown need no conversion beyond decoding
pub fn convert_plain(bytes: &[u8]) -> DocumentConverterResult {
    DocumentConverterResult::new(None, &decode_text(bytes))
}
