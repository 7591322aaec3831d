//! PDF table extraction from the text layer.
//!
//! lopdf exposes plain page text, so tables are reconstructed line by line:
//! each line is a row, cells split on tab runs or two-plus spaces.

use super::LoadError;
use crate::table::Table;
use lopdf::Document;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub fn load(path: &Path) -> Result<Vec<Table>, LoadError> {
    let document = Document::load(path)
        .map_err(|e| LoadError::Parse(format!("failed to load PDF: {}", e)))?;

    let mut tables = Vec::new();
    for (page_num, _) in document.get_pages() {
        let Ok(text) = document.extract_text(&[page_num]) else {
            continue;
        };
        if let Some(table) = table_from_page_text(&text) {
            tables.push(table);
        }
    }

    if tables.is_empty() {
        return Err(LoadError::NoTables);
    }
    Ok(tables)
}

fn cell_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\t+| {2,}").unwrap())
}

/// Reconstruct a table from one page of text.
///
/// The header is the first line with at least two cells among the first
/// three non-empty lines; pages without such a line or without data rows
/// yield no table.
pub(crate) fn table_from_page_text(text: &str) -> Option<Table> {
    let rows: Vec<Vec<String>> = text
        .lines()
        .map(split_line)
        .filter(|cells| !cells.is_empty())
        .collect();

    let header_idx = rows.iter().take(3).position(|cells| cells.len() >= 2)?;
    let header = rows[header_idx].clone();

    let data: Vec<Vec<Option<String>>> = rows[header_idx + 1..]
        .iter()
        .map(|cells| cells.iter().map(|c| Some(c.clone())).collect())
        .collect();

    if data.is_empty() {
        return None;
    }
    Some(Table::from_grid(header, data))
}

fn split_line(line: &str) -> Vec<String> {
    cell_separator()
        .split(line.trim())
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_split_on_wide_gaps() {
        let text = "Name    City      State\nAlice   Boston    MA\nBob     Seattle   WA\n";
        let table = table_from_page_text(text).unwrap();

        assert_eq!(table.columns(), &["Name", "City", "State"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1][1], Some("Seattle".to_string()));
    }

    #[test]
    fn test_tab_separated_cells() {
        let text = "a\tb\n1\t2\n";
        let table = table_from_page_text(text).unwrap();
        assert_eq!(table.columns(), &["a", "b"]);
    }

    #[test]
    fn test_header_found_past_leading_title_line() {
        let text = "Quarterly Report\nCity    State\nBoston  MA\n";
        let table = table_from_page_text(text).unwrap();
        assert_eq!(table.columns(), &["City", "State"]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_prose_page_yields_no_table() {
        assert!(table_from_page_text("just a paragraph of text\non two lines\n").is_none());
        assert!(table_from_page_text("").is_none());
    }
}
