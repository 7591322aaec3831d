//! CSV loading with encoding detection.

use super::LoadError;
use crate::table::Table;
use csv::ReaderBuilder;
use std::path::Path;

pub fn load(path: &Path) -> Result<Table, LoadError> {
    let content = read_with_encoding_detection(path)?;
    parse_csv_content(&content)
}

/// Parse CSV text into a table. The first record is the header; rows of
/// uneven length are accepted and padded. Empty fields become null cells.
pub fn parse_csv_content(content: &str) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Parse(format!("failed to read CSV header: {}", e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| LoadError::Parse(format!("failed to parse CSV row {}: {}", index + 1, e)))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(Table::from_grid(header, rows))
}

/// Read the file as UTF-8, falling back to Windows-1252 for legacy exports.
fn read_with_encoding_detection(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path)?;

    if let Ok(content) = std::str::from_utf8(&bytes) {
        return Ok(content.to_string());
    }

    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
    if !had_errors {
        return Ok(decoded.into_owned());
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let table = parse_csv_content("name,city\nAlice,Boston\nBob,Seattle").unwrap();
        assert_eq!(table.columns(), &["name", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1][1], Some("Seattle".to_string()));
    }

    #[test]
    fn test_empty_fields_become_null() {
        let table = parse_csv_content("a,b\n1,\n,2").unwrap();
        assert_eq!(table.rows()[0], vec![Some("1".to_string()), None]);
        assert_eq!(table.rows()[1], vec![None, Some("2".to_string())]);
    }

    #[test]
    fn test_uneven_rows_are_padded() {
        let table = parse_csv_content("a,b,c\n1,2").unwrap();
        assert_eq!(table.rows()[0], vec![Some("1".to_string()), Some("2".to_string()), None]);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        // "café" in Windows-1252: é = 0xE9, invalid as UTF-8.
        std::fs::write(&path, b"name\ncaf\xe9").unwrap();

        let table = load(&path).unwrap();
        assert_eq!(table.rows()[0][0], Some("café".to_string()));
    }
}
