//! Table loading - one adapter per supported file format.

mod csv;
mod excel;
mod html;
mod pdf;

pub use csv::parse_csv_content;
pub use html::parse_html_document;

use crate::table::Table;
use std::path::Path;
use thiserror::Error;

/// File extensions this tool can read.
pub const READABLE_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls", "html", "htm", "pdf"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file type: .{0}")]
    UnsupportedFormat(String),
    #[error("no tables found in the file")]
    NoTables,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(String),
}

/// Load one or more tables from a CSV / Excel / HTML / PDF file.
///
/// CSV and Excel yield exactly one table; HTML and PDF may yield several,
/// kept in file order.
pub fn load_tables(path: &Path) -> Result<Vec<Table>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(vec![csv::load(path)?]),
        "xlsx" | "xls" => Ok(vec![excel::load(path)?]),
        "html" | "htm" => html::load(path),
        "pdf" => pdf::load(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = load_tables(Path::new("data.docx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let err = load_tables(Path::new("data")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext.is_empty()));
    }
}
