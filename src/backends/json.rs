use log::warn;
use serde_json::Value;

use crate::converter::DocumentConverterResult;
use crate::utils::decode_text;

/// Pretty-prints JSON so nested structures read line by line. Broken JSON is still text, so it
/// is returned unchanged.
pub fn convert_json(bytes: &[u8]) -> DocumentConverterResult {
    let text = decode_text(bytes);
    let pretty = match serde_json::from_str::<Value>(&text) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.clone()),
        Err(e) => {
            warn!("Invalid JSON ({e}); returning the document unchanged");
            text
        }
    };
    DocumentConverterResult::new(None, &pretty)
}
