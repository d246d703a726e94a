// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field in a CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvField {
    /// Column name (header, as written)
    pub name: String,

    /// Field value, stripped of surrounding whitespace
    pub value: String,

    /// Whether the value is empty
    pub is_empty: bool,
}

impl CsvField {
    pub fn new(name: String, value: String) -> Self {
        let value = value.trim().to_string();
        let is_empty = value.is_empty();

        Self {
            name,
            value,
            is_empty,
        }
    }
}

/// A single row in a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Non-empty values keyed by column name
    pub field_map: HashMap<String, String>,
}

impl CsvRow {
    pub fn new(fields: Vec<CsvField>) -> Self {
        let field_map = fields
            .into_iter()
            .filter(|f| !f.is_empty)
            .map(|f| (f.name, f.value))
            .collect();

        Self { field_map }
    }

    /// Non-empty value of a column, if any
    pub fn get(&self, column: &str) -> Option<&str> {
        self.field_map.get(column).map(String::as_str)
    }
}

/// Header plus rows of a parsed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Non-empty values of one column, in row order
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}
