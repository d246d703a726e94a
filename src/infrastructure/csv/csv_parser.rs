// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV files with encoding detection and error handling

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::csv::{CsvField, CsvRow, CsvTable};
use crate::domain::error::{AppError, Result};

/// Strict CSV reader: every record must have as many fields as the header.
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CSV file into a table
    pub fn parse_file(&self, path: &Path) -> Result<CsvTable> {
        let content = self.read_with_encoding_detection(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<CsvTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(false)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::ParseError("CSV has no header row".to_string()));
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(&headers, &record));
        }

        Ok(CsvTable {
            headers: headers.iter().map(str::to_string).collect(),
            rows,
        })
    }

    /// UTF-8 first, Windows-1252 when the bytes are not valid UTF-8
    fn read_with_encoding_detection(&self, path: &Path) -> Result<String> {
        let buffer = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                AppError::StartupDataMissing(format!("dataset {} not found", path.display()))
            }
            _ => AppError::IoError(format!("Failed to read file: {}", e)),
        })?;

        match String::from_utf8(buffer) {
            Ok(content) => Ok(content),
            Err(err) => {
                let bytes = err.into_bytes();
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
                tracing::debug!(path = %path.display(), "Dataset is not UTF-8, decoded as Windows-1252");
                Ok(decoded.into_owned())
            }
        }
    }

    fn parse_row(headers: &StringRecord, record: &StringRecord) -> CsvRow {
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| CsvField::new(header.to_string(), value.to_string()))
            .collect();

        CsvRow::new(fields)
    }
}
