use csv::ReaderBuilder;

use crate::converter::DocumentConverterResult;
use crate::errors::ConversionError;
use crate::utils::{decode_text, markdown_table};

/// Renders comma- (or tab-, etc.) separated values as a Markdown table, using the first record as
/// the header row.
pub fn convert_delimited(
    bytes: &[u8],
    delimiter: u8,
) -> Result<DocumentConverterResult, ConversionError> {
    let text = decode_text(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = vec![];
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(DocumentConverterResult::new(None, &markdown_table(&rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_table() {
        let result = convert_delimited(b"name,qty\napples,3\n\"pears, ripe\",12\n", b',').unwrap();
        assert_eq!(
            result.text_content,
            "| name | qty |\n| --- | --- |\n| apples | 3 |\n| pears, ripe | 12 |"
        );
    }

    #[test]
    fn test_ragged_rows() {
        let result = convert_delimited(b"a,b,c\n1\n1,2,3,4\n", b',').unwrap();
        assert_eq!(
            result.text_content,
            "| a | b | c |  |\n| --- | --- | --- | --- |\n| 1 |  |  |  |\n| 1 | 2 | 3 | 4 |"
        );
    }

    #[test]
    fn test_tsv() {
        let result = convert_delimited(b"x\ty\n1\t2\n", b'\t').unwrap();
        assert_eq!(result.text_content, "| x | y |\n| --- | --- |\n| 1 | 2 |");
    }

    #[test]
    fn test_empty() {
        assert_eq!(convert_delimited(b"", b',').unwrap().text_content, "");
    }
}
