use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

pub static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static UTF8_BOM: &str = "\u{feff}";

/// Decodes document bytes as UTF-8, dropping a byte order mark. Invalid sequences are replaced
/// rather than rejected, since a partly garbled document still beats no document.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!(
                "Input is not valid UTF-8 (first bad byte at offset {}); decoding lossily",
                e.valid_up_to()
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    };
    match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Tidies converted text: unix newlines, page breaks as blank lines, no trailing whitespace, at
/// most one blank line in a row, and no blank lines at either end.
pub fn normalize_text(text: &str) -> String {
    let unified = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{000C}', "\n\n");
    let trimmed_lines = unified
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<&str>>()
        .join("\n");
    RE_BLANK_RUNS
        .replace_all(&trimmed_lines, "\n\n")
        .trim_matches('\n')
        .to_string()
}

/// Renders rows as a Markdown table. The first row is the header; short rows are padded so every
/// row has as many cells as the widest one.
pub fn markdown_table(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let mut table = String::new();
    for (i, row) in rows.iter().enumerate() {
        table.push('|');
        for col in 0..width {
            let cell = row.get(col).map(|c| escape_cell(c)).unwrap_or_default();
            table.push_str(&format!(" {} |", cell));
        }
        table.push('\n');
        if i == 0 {
            table.push('|');
            table.push_str(&" --- |".repeat(width));
            table.push('\n');
        }
    }
    table
}

/// Table cells live on a single line, and a bare `|` would end them early
fn escape_cell(cell: &str) -> String {
    cell.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFhello"), "hello");
    }

    #[test]
    fn test_decode_lossy() {
        assert_eq!(decode_text(b"caf\xE9 au lait"), "caf\u{FFFD} au lait");
    }

    #[test]
    fn test_normalize_collapses_blank_lines() {
        let raw = "\n\n  Title  \r\n\r\n\r\n\r\nBody line   \n\n\n";
        assert_eq!(normalize_text(raw), "  Title\n\nBody line");
    }

    #[test]
    fn test_normalize_page_breaks() {
        assert_eq!(normalize_text("one\u{000C}two"), "one\n\ntwo");
    }

    #[test]
    fn test_normalize_whitespace_only_lines() {
        assert_eq!(normalize_text("a\n   \n \t \n\nb"), "a\n\nb");
    }

    #[test]
    fn test_markdown_table() {
        let rows = vec![
            vec!["name".to_string(), "qty".to_string()],
            vec!["apples".to_string(), "3".to_string()],
            vec!["pears".to_string()],
        ];
        assert_eq!(
            markdown_table(&rows),
            "| name | qty |\n| --- | --- |\n| apples | 3 |\n| pears |  |\n"
        );
    }

    #[test]
    fn test_markdown_table_escapes_cells() {
        let rows = vec![vec!["a|b".to_string(), "two\nlines".to_string()]];
        assert_eq!(markdown_table(&rows), "| a\\|b | two lines |\n| --- | --- |\n");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(markdown_table(&[]), "");
        assert_eq!(markdown_table(&[vec![]]), "");
    }
}
