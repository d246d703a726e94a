use serde::Serialize;

use crate::domain::car::FormState;
use crate::domain::error::{AppError, Result};
use crate::domain::reference::ReferenceChoices;

pub const MODEL_MISSING_TEXT: &str = "Error: Model file missing.";

/// Everything the form needs to re-render after a submission.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub prediction_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub form: FormState,
    pub choices: ReferenceChoices,
}

/// Round to cents, then clamp below zero. `None` means the clamp fired.
pub fn round_price(estimate: f64) -> Result<Option<f64>> {
    if !estimate.is_finite() {
        return Err(AppError::ComputationError(format!(
            "model returned a non-finite estimate ({})",
            estimate
        )));
    }

    // `{:.2}` rounds the exact binary value half-to-even.
    let rounded: f64 = format!("{:.2}", estimate)
        .parse()
        .map_err(|e| AppError::Internal(format!("failed to round estimate: {}", e)))?;

    if rounded < 0.0 || (rounded == 0.0 && rounded.is_sign_negative()) {
        return Ok(None);
    }
    Ok(Some(rounded))
}

pub fn format_lakhs(estimate: f64) -> Result<String> {
    let display = match round_price(estimate)? {
        None => "0".to_string(),
        Some(value) => {
            let text = value.to_string();
            if text.contains('.') {
                text
            } else {
                format!("{}.0", text)
            }
        }
    };
    Ok(format!("₹ {} Lakhs", display))
}

pub fn error_text(err: &AppError) -> String {
    match err {
        AppError::ModelUnavailable => MODEL_MISSING_TEXT.to_string(),
        other => format!("Error during calculation: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(format_lakhs(4.567).unwrap(), "₹ 4.57 Lakhs");
        assert_eq!(format_lakhs(3.3333).unwrap(), "₹ 3.33 Lakhs");
    }

    #[test]
    fn test_negative_estimate_clamps_to_zero() {
        assert_eq!(format_lakhs(-3.4).unwrap(), "₹ 0 Lakhs");
        assert_eq!(format_lakhs(-0.001).unwrap(), "₹ 0 Lakhs");
    }

    #[test]
    fn test_whole_value_keeps_fraction_digit() {
        assert_eq!(format_lakhs(5.0).unwrap(), "₹ 5.0 Lakhs");
        assert_eq!(format_lakhs(0.0).unwrap(), "₹ 0.0 Lakhs");
    }

    #[test]
    fn test_exact_binary_rounding() {
        // 2.675 is stored just below the midpoint.
        assert_eq!(round_price(2.675).unwrap(), Some(2.67));
    }

    #[test]
    fn test_non_finite_estimate_is_computation_error() {
        assert!(matches!(
            format_lakhs(f64::NAN),
            Err(AppError::ComputationError(_))
        ));
    }

    #[test]
    fn test_error_text() {
        assert_eq!(error_text(&AppError::ModelUnavailable), MODEL_MISSING_TEXT);
        let text = error_text(&AppError::ParseError("bad year".to_string()));
        assert_eq!(text, "Error during calculation: Parse error: bad year");
    }
}
