use serde::{Deserialize, Serialize};

use super::PriceModel;
use crate::domain::error::{AppError, Result};
use crate::domain::features::{FeatureVector, FEATURE_COUNT};

/// Ordinary least squares fit: `intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(AppError::ValidationError(format!(
                "linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                FEATURE_COUNT
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::ValidationError(
                "linear model contains non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }
}

impl PriceModel for LinearModel {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (coef, x)| acc + coef * x)
    }
}
