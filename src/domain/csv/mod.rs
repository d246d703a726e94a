// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Parsed tabular data, independent of how it was read

mod csv_row;

pub use csv_row::{CsvField, CsvRow, CsvTable};
