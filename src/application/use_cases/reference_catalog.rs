use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::csv::CsvTable;
use crate::domain::error::{AppError, Result};
use crate::domain::reference::ReferenceChoices;
use crate::infrastructure::csv::CsvParser;

pub const COLUMN_CAR_NAME: &str = "Car_Name";
pub const COLUMN_FUEL_TYPE: &str = "Fuel_Type";
pub const COLUMN_SELLER_TYPE: &str = "Seller_Type";
pub const COLUMN_TRANSMISSION: &str = "Transmission";
pub const COLUMN_OWNER: &str = "Owner";
pub const COLUMN_YEAR: &str = "Year";

/// Build the form choice lists from the reference dataset.
///
/// Never fails: any problem with the file leaves every list empty.
pub fn load_choices(path: &Path) -> ReferenceChoices {
    match CsvParser::new()
        .parse_file(path)
        .and_then(|table| build_choices(&table))
    {
        Ok(choices) => {
            tracing::info!(
                path = %path.display(),
                car_names = choices.car_names.len(),
                years = choices.years.len(),
                "Reference data loaded"
            );
            choices
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Reference data unavailable, choice lists will be empty"
            );
            ReferenceChoices::default()
        }
    }
}

pub fn build_choices(table: &CsvTable) -> Result<ReferenceChoices> {
    Ok(ReferenceChoices {
        car_names: distinct_text(table, COLUMN_CAR_NAME),
        fuel_types: distinct_text(table, COLUMN_FUEL_TYPE),
        seller_types: distinct_text(table, COLUMN_SELLER_TYPE),
        transmissions: distinct_text(table, COLUMN_TRANSMISSION),
        owners: distinct_numbers(table, COLUMN_OWNER)?.into_iter().collect(),
        years: distinct_numbers(table, COLUMN_YEAR)?.into_iter().rev().collect(),
    })
}

/// Sorted distinct values; an absent column is simply empty.
fn distinct_text(table: &CsvTable, column: &str) -> Vec<String> {
    table
        .column_values(column)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Numeric columns are required and must hold integers throughout.
fn distinct_numbers(table: &CsvTable, column: &str) -> Result<BTreeSet<i64>> {
    if !table.has_column(column) {
        return Err(AppError::ParseError(format!(
            "dataset has no '{}' column",
            column
        )));
    }

    table
        .column_values(column)
        .map(|value| {
            value.parse::<i64>().map_err(|e| {
                AppError::ParseError(format!(
                    "invalid {} value '{}': {}",
                    column, value, e
                ))
            })
        })
        .collect()
}
