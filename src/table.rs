//! In-memory table model shared by every loader.

/// A loaded table: ordered column names plus rows of optional text cells.
///
/// Column names are unique within one table. Every row has exactly one cell
/// per column; missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table from a raw header and data rows.
    ///
    /// The header is padded with `col_N` placeholders up to the widest row,
    /// blank names are replaced the same way, and duplicate names get a
    /// numeric suffix. Short data rows are padded with nulls.
    pub fn from_grid(header: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain([header.len(), 1])
            .max()
            .unwrap_or(1);

        let columns = normalize_header(header, width);

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a column by name, exact match first, then case-insensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            return Some(idx);
        }
        let key = name.trim().to_lowercase();
        self.columns
            .iter()
            .position(|c| c.trim().to_lowercase() == key)
    }

    /// All values of one column, in row order. `None` if the column is unknown.
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<String>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).cloned().flatten())
                .collect(),
        )
    }
}

/// Pad the header to `width`, fill blanks, and deduplicate names.
fn normalize_header(mut header: Vec<String>, width: usize) -> Vec<String> {
    header.resize(width, String::new());

    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    header
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let name = raw.trim().to_string();
            let name = if name.is_empty() {
                format!("col_{}", i + 1)
            } else {
                name
            };
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                format!("{}_{}", name, count)
            } else {
                name
            }
        })
        .collect()
}
