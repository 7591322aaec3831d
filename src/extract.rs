//! Column selection across loaded tables and CSV export.

use crate::mapper::Mapping;
use crate::table::Table;
use anyhow::{Context, Result};
use std::path::Path;

enum CellSource<'a> {
    Column(usize),
    Derived(&'a [Option<String>]),
    Missing,
}

/// Concatenate the chosen columns from all tables, in file order.
///
/// Per table, a chosen name is matched exactly, then case-insensitively;
/// columns a table does not have are filled with nulls. Derived columns come
/// from the mapping and apply to the first table only, matching where the
/// address fallback ran.
pub fn extract_columns(tables: &[Table], chosen: &[String], mapping: &Mapping) -> Table {
    let mut out_rows = Vec::new();

    for (table_idx, table) in tables.iter().enumerate() {
        let sources: Vec<CellSource> = chosen
            .iter()
            .map(|name| {
                if table_idx == 0 {
                    if let Some(values) = mapping.derived_values(name) {
                        return CellSource::Derived(values);
                    }
                }
                match table.column_index(name) {
                    Some(idx) => CellSource::Column(idx),
                    None => CellSource::Missing,
                }
            })
            .collect();

        for (row_idx, row) in table.rows().iter().enumerate() {
            out_rows.push(
                sources
                    .iter()
                    .map(|source| match source {
                        CellSource::Column(idx) => row.get(*idx).cloned().flatten(),
                        CellSource::Derived(values) => values.get(row_idx).cloned().flatten(),
                        CellSource::Missing => None,
                    })
                    .collect(),
            );
        }
    }

    Table::from_grid(chosen.to_vec(), out_rows)
}

/// Write the table as UTF-8, comma-delimited CSV, overwriting `path`.
/// Null cells serialize as empty strings.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_tables;
    use crate::mapper::{self, FieldSource};
    use std::path::PathBuf;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn chosen(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn sample_csv_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/sample_data.csv")
    }

    #[test]
    fn test_missing_columns_fill_with_nulls() {
        let first = Table::from_grid(vec!["City".into(), "Notes".into()], vec![vec![cell("Boston"), cell("x")]]);
        let second = Table::from_grid(vec!["City".into()], vec![vec![cell("Seattle")]]);

        let out = extract_columns(
            &[first, second],
            &chosen(&["City", "Notes"]),
            &Mapping::default(),
        );

        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows()[0], vec![cell("Boston"), cell("x")]);
        assert_eq!(out.rows()[1], vec![cell("Seattle"), None]);
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        let table = Table::from_grid(vec!["CITY".into()], vec![vec![cell("Boston")]]);
        let out = extract_columns(&[table], &chosen(&["city"]), &Mapping::default());
        assert_eq!(out.rows()[0][0], cell("Boston"));
    }

    #[test]
    fn test_sample_data_round_trip() {
        let tables = load_tables(&sample_csv_path()).unwrap();
        let mapping = mapper::resolve(&tables[0]);

        assert_eq!(mapping.city, FieldSource::Column("City".to_string()));
        assert_eq!(mapping.region, FieldSource::Column("Region".to_string()));
        assert_eq!(mapping.state, FieldSource::Column("State".to_string()));

        let out = extract_columns(&tables, &chosen(&["City", "Region", "State"]), &mapping);

        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("extracted.csv");
        write_csv(&out, &out_path).unwrap();

        let exported = std::fs::read_to_string(&out_path).unwrap();
        let mut lines = exported.lines();
        assert_eq!(lines.next(), Some("City,Region,State"));

        // Exported rows must match the input's City/Region/State columns in order.
        let source = &tables[0];
        for (line, row) in lines.zip(source.rows()) {
            let expected: Vec<&str> = [1usize, 2, 3]
                .iter()
                .map(|&i| row[i].as_deref().unwrap_or(""))
                .collect();
            assert_eq!(line, expected.join(","));
        }
        assert_eq!(out.row_count(), source.row_count());
    }

    #[test]
    fn test_address_only_table_exports_derived_fields() {
        let table = Table::from_grid(
            vec!["Address".into()],
            vec![vec![cell("Seattle, WA 98109")]],
        );
        let mapping = mapper::resolve(&table);
        let city_col = mapping.city.column_name().unwrap().to_string();
        let state_col = mapping.state.column_name().unwrap().to_string();

        let out = extract_columns(
            &[table],
            &chosen(&[city_col.as_str(), state_col.as_str()]),
            &mapping,
        );

        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("derived.csv");
        write_csv(&out, &out_path).unwrap();

        let exported = std::fs::read_to_string(&out_path).unwrap();
        let mut lines = exported.lines().skip(1);
        assert_eq!(lines.next(), Some("Seattle,WA"));
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.csv");
        std::fs::write(&out_path, "stale content").unwrap();

        let table = Table::from_grid(vec!["a".into()], vec![vec![cell("1")]]);
        write_csv(&table, &out_path).unwrap();

        assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "a\n1\n");
    }
}
