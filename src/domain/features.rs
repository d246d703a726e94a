use serde::Serialize;

use crate::domain::car::{FuelType, PredictionRequest, SellerType, Transmission};
use crate::domain::error::{AppError, Result};

pub const FEATURE_COUNT: usize = 9;

/// Column order the fitted models were trained on. Positions are load-bearing.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Age",
    "Present_Price",
    "Kms_Driven",
    "Owner",
    "Present_Price_log",
    "Fuel_Type_Diesel",
    "Fuel_Type_Petrol",
    "Seller_Type_Individual",
    "Transmission_Manual",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

/// Derive the model inputs from a parsed request.
///
/// Age is not floored: a purchase year in the future yields a negative age.
pub fn engineer(request: &PredictionRequest, current_year: i32) -> Result<FeatureVector> {
    let years_old = i64::from(current_year)
        .checked_sub(request.year_purchased)
        .ok_or_else(|| {
            AppError::ComputationError(format!(
                "age out of range for purchase year {}",
                request.year_purchased
            ))
        })?;
    let present_price_log = log_price(request.present_price)?;

    let fuel_diesel = indicator(request.fuel_type == FuelType::Diesel);
    let fuel_petrol = indicator(request.fuel_type == FuelType::Petrol);
    let seller_individual = indicator(request.seller_type == SellerType::Individual);
    let transmission_manual = indicator(request.transmission == Transmission::Manual);

    Ok(FeatureVector([
        years_old as f64,
        request.present_price,
        request.kms_driven as f64,
        request.owner as f64,
        present_price_log,
        fuel_diesel,
        fuel_petrol,
        seller_individual,
        transmission_manual,
    ]))
}

/// `ln(price + 1)`, rejecting anything that would hand the model NaN or infinity.
pub fn log_price(present_price: f64) -> Result<f64> {
    let value = (present_price + 1.0).ln();
    if !value.is_finite() {
        return Err(AppError::ComputationError(format!(
            "cannot take log of present_price + 1 = {}",
            present_price + 1.0
        )));
    }
    Ok(value)
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}
