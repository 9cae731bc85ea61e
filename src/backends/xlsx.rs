//! Spreadsheets (.xlsx, .xlsm, .xls, .ods) via `calamine`. Each sheet becomes a `##` heading
//! followed by a Markdown table whose header is the sheet's first row.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use log::warn;

use crate::converter::DocumentConverterResult;
use crate::errors::ConversionError;
use crate::utils::markdown_table;

pub fn convert_xlsx(bytes: &[u8]) -> Result<DocumentConverterResult, ConversionError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ConversionError::Spreadsheet(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(ConversionError::Spreadsheet(
            "no sheets found in workbook".to_string(),
        ));
    }

    let mut text = String::new();
    for name in sheet_names.iter() {
        match workbook.worksheet_range(name) {
            Ok(range) => text.push_str(&render_sheet(name, &range)),
            Err(e) => warn!("Skipping unreadable sheet {:?}: {}", name, e),
        }
    }
    Ok(DocumentConverterResult::new(None, &text))
}

fn render_sheet(name: &str, range: &Range<Data>) -> String {
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    format!("## {}\n\n{}\n", name, markdown_table(&rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}
