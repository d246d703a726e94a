// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV file reading with encoding fallback

mod csv_parser;

pub use csv_parser::CsvParser;
