//! HTML table scraping.

use super::LoadError;
use crate::table::Table;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

pub fn load(path: &Path) -> Result<Vec<Table>, LoadError> {
    let content = std::fs::read_to_string(path)?;
    let tables = parse_html_document(&content);
    if tables.is_empty() {
        return Err(LoadError::NoTables);
    }
    Ok(tables)
}

/// Extract every `<table>` in document order. The header comes from the
/// first row (`<th>` cells or plain `<td>`); tables without a data row are
/// skipped.
pub fn parse_html_document(content: &str) -> Vec<Table> {
    let document = Html::parse_document(content);
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut tables = Vec::new();

    for table_el in document.select(&table_selector) {
        let rows: Vec<Vec<String>> = table_el
            .select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| element_text(&cell))
                    .collect()
            })
            .filter(|cells: &Vec<String>| !cells.is_empty())
            .collect();

        let Some((header, data)) = rows.split_first() else {
            continue;
        };
        if data.is_empty() {
            continue;
        }

        let data_rows = data
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_empty() {
                            None
                        } else {
                            Some(cell.clone())
                        }
                    })
                    .collect()
            })
            .collect();

        tables.push(Table::from_grid(header.clone(), data_rows));
    }

    tables
}

/// Text content with whitespace collapsed to single spaces.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_with_th_header() {
        let html = "<html><body><table>\
            <tr><th>City</th><th>State</th></tr>\
            <tr><td>Boston</td><td>MA</td></tr>\
            </table></body></html>";

        let tables = parse_html_document(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns(), &["City", "State"]);
        assert_eq!(tables[0].rows()[0][0], Some("Boston".to_string()));
    }

    #[test]
    fn test_multiple_tables_in_document_order() {
        let html = "<table><tr><td>a</td></tr><tr><td>1</td></tr></table>\
            <table><tr><td>b</td></tr><tr><td>2</td></tr></table>";

        let tables = parse_html_document(html);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].columns(), &["a"]);
        assert_eq!(tables[1].columns(), &["b"]);
    }

    #[test]
    fn test_header_only_table_is_skipped() {
        let html = "<table><tr><th>empty</th></tr></table>";
        assert!(parse_html_document(html).is_empty());
    }

    #[test]
    fn test_nested_markup_text_is_flattened() {
        let html = "<table><tr><th>Name</th></tr>\
            <tr><td> <b>Ada</b>\n Lovelace </td></tr></table>";

        let tables = parse_html_document(html);
        assert_eq!(tables[0].rows()[0][0], Some("Ada Lovelace".to_string()));
    }
}
