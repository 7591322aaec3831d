//! Column mapping heuristics for the canonical City / Region / State fields.

mod address;

pub use address::parse_address;

use crate::table::Table;

/// Accepted header names per canonical field, compared case-insensitively.
pub const CITY_SYNONYMS: &[&str] = &["city", "town", "municipality", "locality", "suburb"];
pub const REGION_SYNONYMS: &[&str] = &["region", "province", "county", "prefecture", "district", "zone"];
pub const STATE_SYNONYMS: &[&str] = &[
    "state",
    "state/province",
    "state_province",
    "st",
    "state_code",
    "statecode",
    "prov",
    "province",
];

/// Header names that suggest a free-text address column.
pub const ADDRESS_SYNONYMS: &[&str] = &["address", "full address", "addr", "location", "site"];

/// Names of the columns synthesized by the address fallback.
pub const DERIVED_CITY: &str = "__parsed_city";
pub const DERIVED_STATE: &str = "__parsed_state";

/// Where a canonical field's values come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSource {
    /// An existing column of the loaded table.
    Column(String),
    /// A column synthesized by address parsing.
    Derived(&'static str),
    /// No match; the user picks manually.
    #[default]
    Unresolved,
}

impl FieldSource {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, FieldSource::Unresolved)
    }

    /// The column name this field reads from, if resolved.
    pub fn column_name(&self) -> Option<&str> {
        match self {
            FieldSource::Column(name) => Some(name),
            FieldSource::Derived(name) => Some(name),
            FieldSource::Unresolved => None,
        }
    }
}

/// A column materialized by the address fallback, one value per input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumn {
    pub name: &'static str,
    pub values: Vec<Option<String>>,
}

/// Result of resolving one table. Valid only for the table it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    pub city: FieldSource,
    pub region: FieldSource,
    pub state: FieldSource,
    /// All column names of the source table, for the optional-columns picker.
    pub available_columns: Vec<String>,
    /// Columns synthesized by address parsing, if the fallback fired.
    pub derived: Vec<DerivedColumn>,
}

impl Mapping {
    /// Derived values for a column name, if this mapping synthesized it.
    pub fn derived_values(&self, name: &str) -> Option<&[Option<String>]> {
        self.derived
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.values.as_slice())
    }
}

/// Suggest columns for City / Region / State, with an address-parsing
/// fallback when City or State has no header match.
///
/// Pure over the input: derived columns are returned as new data, never
/// written back into the table. Deterministic for a given table.
pub fn resolve(table: &Table) -> Mapping {
    let mut mapping = Mapping {
        city: find_column(table, CITY_SYNONYMS),
        region: find_column(table, REGION_SYNONYMS),
        state: find_column(table, STATE_SYNONYMS),
        available_columns: table.columns().to_vec(),
        derived: Vec::new(),
    };

    if !mapping.city.is_resolved() || !mapping.state.is_resolved() {
        apply_address_fallback(table, &mut mapping);
    }

    mapping
}

/// First column whose normalized name matches a synonym exactly; failing
/// that, the first whose name contains one ("City Name" matches "city").
fn find_column(table: &Table, synonyms: &[&str]) -> FieldSource {
    for col in table.columns() {
        let key = col.trim().to_lowercase();
        if synonyms.contains(&key.as_str()) {
            return FieldSource::Column(col.clone());
        }
    }
    for col in table.columns() {
        let key = col.trim().to_lowercase();
        if synonyms.iter().any(|s| key.contains(s)) {
            return FieldSource::Column(col.clone());
        }
    }
    FieldSource::Unresolved
}

/// Parse an address-like column into city/state values and attach derived
/// columns for whichever of the two fields is still unresolved.
fn apply_address_fallback(table: &Table, mapping: &mut Mapping) {
    let FieldSource::Column(addr_col) = find_column(table, ADDRESS_SYNONYMS) else {
        return;
    };
    let Some(values) = table.column_values(&addr_col) else {
        return;
    };

    let mut cities: Vec<Option<String>> = Vec::with_capacity(values.len());
    let mut states: Vec<Option<String>> = Vec::with_capacity(values.len());
    let mut any_match = false;

    for value in &values {
        match value.as_deref().and_then(parse_address) {
            Some((city, state)) => {
                any_match = true;
                cities.push(Some(city));
                states.push(Some(state));
            }
            None => {
                cities.push(None);
                states.push(None);
            }
        }
    }

    if !any_match {
        return;
    }

    if !mapping.city.is_resolved() {
        mapping.city = FieldSource::Derived(DERIVED_CITY);
        mapping.derived.push(DerivedColumn {
            name: DERIVED_CITY,
            values: cities,
        });
    }
    if !mapping.state.is_resolved() {
        mapping.state = FieldSource::Derived(DERIVED_STATE);
        mapping.derived.push(DerivedColumn {
            name: DERIVED_STATE,
            values: states,
        });
    }
}
