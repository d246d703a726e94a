use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ParseError(String),
    ComputationError(String),
    ModelUnavailable,
    StartupDataMissing(String),
    IoError(String),
}

impl AppError {
    /// Stable machine-readable tag, exposed to clients next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "internal",
            AppError::ValidationError(_) => "validation_error",
            AppError::ParseError(_) => "parse_error",
            AppError::ComputationError(_) => "computation_error",
            AppError::ModelUnavailable => "model_unavailable",
            AppError::StartupDataMissing(_) => "startup_data_missing",
            AppError::IoError(_) => "io_error",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ComputationError(msg) => write!(f, "Computation error: {}", msg),
            AppError::ModelUnavailable => write!(f, "Model file missing"),
            AppError::StartupDataMissing(msg) => write!(f, "Startup data missing: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
