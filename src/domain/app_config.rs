use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1, message = "host must not be empty"))]
    pub host: String,
    #[validate(range(min = 1, message = "port must be at least 1"))]
    pub port: u16,
    /// Directory relative artifact paths are resolved against.
    #[validate(length(min = 1, message = "base_dir must not be empty"))]
    pub base_dir: Option<String>,
    #[validate(length(min = 1, message = "model_path must not be empty"))]
    pub model_path: String,
    #[validate(length(min = 1, message = "dataset_path must not be empty"))]
    pub dataset_path: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            base_dir: None,
            model_path: "car_price_model.json".to_string(),
            dataset_path: "car_prediction_data.csv".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn model_file(&self) -> PathBuf {
        self.resolve(&self.model_path)
    }

    pub fn dataset_file(&self) -> PathBuf {
        self.resolve(&self.dataset_path)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => Path::new(base).join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_model_path_rejected() {
        let config = AppConfig {
            model_path: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_paths_resolve_against_base_dir() {
        let config = AppConfig {
            base_dir: Some("/srv/cars".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.model_file(),
            PathBuf::from("/srv/cars/car_price_model.json")
        );

        let absolute = AppConfig {
            base_dir: Some("/srv/cars".to_string()),
            dataset_path: "/data/cars.csv".to_string(),
            ..Default::default()
        };
        assert_eq!(absolute.dataset_file(), PathBuf::from("/data/cars.csv"));
    }

    #[test]
    fn test_without_base_dir_paths_are_untouched() {
        let config = AppConfig::default();
        assert_eq!(
            config.dataset_file(),
            PathBuf::from("car_prediction_data.csv")
        );
    }
}
