use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::error::{AppError, Result};

pub const FIELD_YEAR: &str = "year";
pub const FIELD_PRESENT_PRICE: &str = "present_price";
pub const FIELD_KMS_DRIVEN: &str = "kms_driven";
pub const FIELD_FUEL_TYPE: &str = "fuel_type";
pub const FIELD_SELLER_TYPE: &str = "seller_type";
pub const FIELD_TRANSMISSION: &str = "transmission";
pub const FIELD_OWNER: &str = "owner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuelType {
    Diesel,
    Petrol,
    Other(String),
}

impl FuelType {
    /// Exact, case-sensitive match; anything else (CNG, LPG, "diesel") is `Other`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Diesel" => FuelType::Diesel,
            "Petrol" => FuelType::Petrol,
            other => FuelType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FuelType::Diesel => "Diesel",
            FuelType::Petrol => "Petrol",
            FuelType::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellerType {
    Individual,
    Other(String),
}

impl SellerType {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Individual" => SellerType::Individual,
            other => SellerType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SellerType::Individual => "Individual",
            SellerType::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transmission {
    Manual,
    Other(String),
}

impl Transmission {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Manual" => Transmission::Manual,
            other => Transmission::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Other(raw) => raw,
        }
    }
}

/// One form submission, parsed into typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub year_purchased: i64,
    pub present_price: f64,
    pub kms_driven: i64,
    pub fuel_type: FuelType,
    pub seller_type: SellerType,
    pub transmission: Transmission,
    pub owner: i64,
}

impl PredictionRequest {
    /// Parse the raw form mapping. Numeric fields tolerate surrounding whitespace;
    /// categorical fields are taken verbatim.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            year_purchased: parse_number(fields, FIELD_YEAR)?,
            present_price: parse_number(fields, FIELD_PRESENT_PRICE)?,
            kms_driven: parse_number(fields, FIELD_KMS_DRIVEN)?,
            fuel_type: FuelType::from_raw(required(fields, FIELD_FUEL_TYPE)?),
            seller_type: SellerType::from_raw(required(fields, FIELD_SELLER_TYPE)?),
            transmission: Transmission::from_raw(required(fields, FIELD_TRANSMISSION)?),
            owner: parse_number(fields, FIELD_OWNER)?,
        })
    }
}

fn required<'a>(fields: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| AppError::ParseError(format!("missing field '{}'", name)))
}

fn parse_number<T>(fields: &HashMap<String, String>, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = required(fields, name)?;
    raw.trim().parse::<T>().map_err(|e| {
        AppError::ParseError(format!("invalid value for '{}': '{}' ({})", name, raw, e))
    })
}

/// Submitted values echoed back so the form can be repopulated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub year: i64,
    pub present_price: f64,
    pub kms_driven: i64,
    pub fuel_type: String,
    pub seller_type: String,
    pub transmission: String,
    pub owner: i64,
}

impl From<&PredictionRequest> for FormState {
    fn from(request: &PredictionRequest) -> Self {
        Self {
            year: request.year_purchased,
            present_price: request.present_price,
            kms_driven: request.kms_driven,
            fuel_type: request.fuel_type.as_str().to_string(),
            seller_type: request.seller_type.as_str().to_string(),
            transmission: request.transmission.as_str().to_string(),
            owner: request.owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_fields() -> HashMap<String, String> {
        fields(&[
            ("year", "2015"),
            ("present_price", "9.5"),
            ("kms_driven", "40000"),
            ("fuel_type", "Diesel"),
            ("seller_type", "Dealer"),
            ("transmission", "Manual"),
            ("owner", "0"),
        ])
    }

    #[test]
    fn test_parse_valid_request() {
        let request = PredictionRequest::from_fields(&valid_fields()).unwrap();
        assert_eq!(request.year_purchased, 2015);
        assert_eq!(request.present_price, 9.5);
        assert_eq!(request.kms_driven, 40000);
        assert_eq!(request.fuel_type, FuelType::Diesel);
        assert_eq!(request.seller_type, SellerType::Other("Dealer".to_string()));
        assert_eq!(request.transmission, Transmission::Manual);
        assert_eq!(request.owner, 0);
    }

    #[test]
    fn test_numeric_fields_tolerate_whitespace() {
        let mut raw = valid_fields();
        raw.insert("year".to_string(), " 2018 ".to_string());
        let request = PredictionRequest::from_fields(&raw).unwrap();
        assert_eq!(request.year_purchased, 2018);
    }

    #[test]
    fn test_non_numeric_year_is_parse_error() {
        let mut raw = valid_fields();
        raw.insert("year".to_string(), "twenty".to_string());
        let err = PredictionRequest::from_fields(&raw).unwrap_err();
        assert!(matches!(err, AppError::ParseError(ref msg) if msg.contains("'year'")));
    }

    #[test]
    fn test_fractional_owner_is_parse_error() {
        let mut raw = valid_fields();
        raw.insert("owner".to_string(), "1.5".to_string());
        assert!(matches!(
            PredictionRequest::from_fields(&raw),
            Err(AppError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let mut raw = valid_fields();
        raw.remove("kms_driven");
        let err = PredictionRequest::from_fields(&raw).unwrap_err();
        assert_eq!(err, AppError::ParseError("missing field 'kms_driven'".to_string()));
    }

    #[test]
    fn test_categoricals_match_exact_literals_only() {
        assert_eq!(FuelType::from_raw("CNG"), FuelType::Other("CNG".to_string()));
        assert_eq!(FuelType::from_raw("diesel"), FuelType::Other("diesel".to_string()));
        assert_eq!(SellerType::from_raw("Individual"), SellerType::Individual);
        assert_eq!(
            Transmission::from_raw("Automatic"),
            Transmission::Other("Automatic".to_string())
        );
    }

    #[test]
    fn test_form_state_echoes_request() {
        let request = PredictionRequest::from_fields(&valid_fields()).unwrap();
        let form = FormState::from(&request);
        assert_eq!(form.year, 2015);
        assert_eq!(form.fuel_type, "Diesel");
        assert_eq!(form.seller_type, "Dealer");
        assert_eq!(FormState::default().fuel_type, "");
    }
}
