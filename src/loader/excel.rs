//! Excel loading via calamine (XLS and XLSX).

use super::LoadError;
use crate::table::Table;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::path::Path;

/// Read the first worksheet; its first row is the header.
pub fn load(path: &Path) -> Result<Table, LoadError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| LoadError::Parse(format!("failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoTables)?
        .map_err(|e| LoadError::Parse(format!("failed to read worksheet: {}", e)))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or(LoadError::NoTables)?
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    let data = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table::from_grid(header, data))
}

fn cell_text(cell: &Data) -> Option<String> {
    if cell.is_empty() {
        return None;
    }
    Some(
        cell.as_string()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}", cell)),
    )
}
