//! Reads Docx documents with `docx-rs` and renders their body as light Markdown. Paragraph
//! styles carry the structure: `Title` and `HeadingN` become headings, and numbered or `List*`
//! paragraphs become list items.

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent, TableChild,
    TableRowChild, read_docx,
};
use log::debug;

use crate::converter::DocumentConverterResult;
use crate::errors::ConversionError;
use crate::utils::markdown_table;

pub fn convert_docx(bytes: &[u8]) -> Result<DocumentConverterResult, ConversionError> {
    let docx = read_docx(bytes).map_err(|e| ConversionError::Docx(e.to_string()))?;

    let mut text = String::new();
    let mut previous_was_item = false;
    for child in docx.document.children.iter() {
        match child {
            DocumentChild::Paragraph(para) => {
                let (line, is_item) = render_paragraph(para);
                if line.trim().is_empty() {
                    continue;
                }
                // list items stay together; everything else is its own paragraph
                if !text.is_empty() {
                    text.push_str(if is_item && previous_was_item { "\n" } else { "\n\n" });
                }
                text.push_str(&line);
                previous_was_item = is_item;
            }
            DocumentChild::Table(table) => {
                let rows = table_rows(table);
                if rows.is_empty() {
                    continue;
                }
                if !text.is_empty() {
                    text.push_str("\n\n");
                }
                text.push_str(&markdown_table(&rows));
                previous_was_item = false;
            }
            _ => {}
        }
    }
    debug!("Rendered {} body elements", docx.document.children.len());
    Ok(DocumentConverterResult::new(None, &text))
}

/// Renders one paragraph, returning whether it is a list item
fn render_paragraph(para: &Paragraph) -> (String, bool) {
    let content = paragraph_text(&para.children);
    let style = para
        .property
        .style
        .as_ref()
        .map(|style| style.val.as_str())
        .unwrap_or("");

    if style == "Title" {
        return (format!("# {}", content.trim()), false);
    }
    if let Some(level) = heading_level(style) {
        return (format!("{} {}", "#".repeat(level), content.trim()), false);
    }
    if para.property.numbering_property.is_some() || style.starts_with("List") {
        return (format!("* {}", content.trim()), true);
    }
    (content, false)
}

/// `Heading1` (the style id) or `heading 1` (the style name) -> 1; capped at Markdown's six
fn heading_level(style: &str) -> Option<usize> {
    let lower = style.to_lowercase();
    let level = lower.strip_prefix("heading")?.trim().parse::<usize>().ok()?;
    (level > 0).then_some(level.min(6))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, &mut text),
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}

fn push_run_text(run: &Run, text: &mut String) {
    for child in run.children.iter() {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

fn table_rows(table: &Table) -> Vec<Vec<String>> {
    let mut rows = vec![];
    for TableChild::TableRow(row) in table.rows.iter() {
        let mut cells = vec![];
        for TableRowChild::TableCell(cell) in row.cells.iter() {
            let paragraphs: Vec<String> = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    TableCellContent::Paragraph(para) => Some(paragraph_text(&para.children)),
                    _ => None,
                })
                .filter(|text| !text.trim().is_empty())
                .collect();
            cells.push(paragraphs.join(" "));
        }
        if !cells.is_empty() {
            rows.push(cells);
        }
    }
    rows
}
