use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::domain::app_config::AppConfig;
use crate::domain::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "car_price.toml";
pub const CONFIG_PATH_ENV: &str = "CAR_PRICE_CONFIG";
pub const ENV_PREFIX: &str = "CAR_PRICE_";

/// Layered settings: defaults, then the TOML file, then `CAR_PRICE_*` variables.
pub struct ConfigService {
    config_file: PathBuf,
}

impl ConfigService {
    pub fn new() -> Self {
        let config_file = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::with_file(config_file)
    }

    pub fn with_file(config_file: impl AsRef<Path>) -> Self {
        Self {
            config_file: config_file.as_ref().to_path_buf(),
        }
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(&self.config_file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment()
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        Ok(config)
    }
}
