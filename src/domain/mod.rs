pub mod app_config;
pub mod car;
pub mod error;
pub mod features;
pub mod prediction;
pub mod reference;

// Tabular reference data
pub mod csv;
