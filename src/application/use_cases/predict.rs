use chrono::Datelike;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::car::{FormState, PredictionRequest};
use crate::domain::error::{AppError, Result};
use crate::domain::features::{engineer, FeatureVector};
use crate::domain::prediction::{error_text, format_lakhs, PredictionResponse};
use crate::domain::reference::ReferenceChoices;
use crate::infrastructure::price_models::PriceModel;

/// Source of the calendar year used to derive vehicle age.
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub request: PredictionRequest,
    pub features: FeatureVector,
    pub estimate: f64,
    pub text: String,
}

pub struct PredictUseCase {
    model: Option<Arc<dyn PriceModel>>,
    clock: Arc<dyn Clock>,
}

impl PredictUseCase {
    pub fn new(model: Option<Arc<dyn PriceModel>>, clock: Arc<dyn Clock>) -> Self {
        Self { model, clock }
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    pub fn execute(&self, fields: &HashMap<String, String>) -> Result<Prediction> {
        let model = self.model.as_ref().ok_or(AppError::ModelUnavailable)?;

        let request = PredictionRequest::from_fields(fields)?;
        let features = engineer(&request, self.clock.current_year())?;
        let estimate = model.predict(&features);
        let text = format_lakhs(estimate)?;

        Ok(Prediction {
            request,
            features,
            estimate,
            text,
        })
    }

    /// Run a prediction and fold any failure into a renderable response.
    pub fn respond(
        &self,
        fields: &HashMap<String, String>,
        choices: &ReferenceChoices,
    ) -> PredictionResponse {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("predict", %request_id);
        let _guard = span.enter();

        match self.execute(fields) {
            Ok(prediction) => {
                tracing::info!(
                    estimate = prediction.estimate,
                    features = ?prediction.features.as_slice(),
                    "Prediction computed"
                );
                PredictionResponse {
                    prediction_text: prediction.text,
                    error_kind: None,
                    form: FormState::from(&prediction.request),
                    choices: choices.clone(),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = err.kind(), "Prediction failed");
                PredictionResponse {
                    prediction_text: error_text(&err),
                    error_kind: Some(err.kind().to_string()),
                    form: FormState::default(),
                    choices: choices.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::FEATURE_COUNT;
    use crate::domain::prediction::MODEL_MISSING_TEXT;
    use crate::infrastructure::price_models::linear::LinearModel;
    use std::sync::Mutex;

    struct FixedYear(i32);

    impl Clock for FixedYear {
        fn current_year(&self) -> i32 {
            self.0
        }
    }

    /// Returns a fixed estimate and remembers what it was asked.
    struct RecordingModel {
        output: f64,
        seen: Mutex<Vec<FeatureVector>>,
    }

    impl RecordingModel {
        fn new(output: f64) -> Arc<Self> {
            Arc::new(Self {
                output,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl PriceModel for RecordingModel {
        fn kind(&self) -> &'static str {
            "recording"
        }

        fn predict(&self, features: &FeatureVector) -> f64 {
            self.seen.lock().unwrap().push(*features);
            self.output
        }
    }

    fn use_case(model: Arc<RecordingModel>) -> PredictUseCase {
        PredictUseCase::new(Some(model), Arc::new(FixedYear(2024)))
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn scenario() -> HashMap<String, String> {
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
    fn test_scenario_feeds_documented_vector() {
        let model = RecordingModel::new(4.567);
        let prediction = use_case(model.clone()).execute(&scenario()).unwrap();

        assert_eq!(prediction.text, "₹ 4.57 Lakhs");
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let values = seen[0].values();
        assert_eq!(values.len(), FEATURE_COUNT);
        assert_eq!(&values[..4], &[9.0, 9.5, 40000.0, 0.0]);
        assert!((values[4] - 10.5f64.ln()).abs() < 1e-12);
        assert_eq!(&values[5..], &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_negative_estimate_renders_zero() {
        let prediction = use_case(RecordingModel::new(-3.4))
            .execute(&scenario())
            .unwrap();
        assert_eq!(prediction.text, "₹ 0 Lakhs");
    }

    #[test]
    fn test_missing_model_short_circuits_without_parsing() {
        let use_case = PredictUseCase::new(None, Arc::new(FixedYear(2024)));
        assert!(!use_case.is_enabled());

        // Garbage input still reports the missing model, not a parse failure.
        let garbage = fields(&[("year", "abc")]);
        assert_eq!(use_case.execute(&garbage).unwrap_err(), AppError::ModelUnavailable);

        let response = use_case.respond(&scenario(), &ReferenceChoices::default());
        assert_eq!(response.prediction_text, MODEL_MISSING_TEXT);
        assert_eq!(response.error_kind.as_deref(), Some("model_unavailable"));
    }

    #[test]
    fn test_price_of_minus_one_never_reaches_model() {
        let model = RecordingModel::new(1.0);
        let mut raw = scenario();
        raw.insert("present_price".to_string(), "-1".to_string());

        let err = use_case(model.clone()).execute(&raw).unwrap_err();
        assert!(matches!(err, AppError::ComputationError(_)));
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failure_response_uses_defaults_and_keeps_choices() {
        let choices = ReferenceChoices {
            fuel_types: vec!["Diesel".to_string(), "Petrol".to_string()],
            years: vec![2018, 2017],
            ..Default::default()
        };
        let mut raw = scenario();
        raw.insert("kms_driven".to_string(), "lots".to_string());

        let response = use_case(RecordingModel::new(1.0)).respond(&raw, &choices);
        assert!(response
            .prediction_text
            .starts_with("Error during calculation: Parse error: invalid value for 'kms_driven'"));
        assert_eq!(response.error_kind.as_deref(), Some("parse_error"));
        assert_eq!(response.form, FormState::default());
        assert_eq!(response.choices, choices);
    }

    #[test]
    fn test_success_response_echoes_form() {
        let response =
            use_case(RecordingModel::new(6.0)).respond(&scenario(), &ReferenceChoices::default());
        assert_eq!(response.prediction_text, "₹ 6.0 Lakhs");
        assert!(response.error_kind.is_none());
        assert_eq!(response.form.year, 2015);
        assert_eq!(response.form.seller_type, "Dealer");
    }

    #[test]
    fn test_with_linear_model() {
        let model = LinearModel {
            coefficients: vec![-0.4, 0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            intercept: 1.0,
            feature_names: None,
        };
        let use_case = PredictUseCase::new(Some(Arc::new(model)), Arc::new(FixedYear(2024)));
        // 1 - 3.6 + 4.75 + 1
        assert_eq!(use_case.execute(&scenario()).unwrap().text, "₹ 3.15 Lakhs");
    }

    #[test]
    fn test_lowest_purchase_year_is_computation_error() {
        let model = RecordingModel::new(1.0);
        let mut raw = scenario();
        raw.insert("year".to_string(), i64::MIN.to_string());

        let response = use_case(model.clone()).respond(&raw, &ReferenceChoices::default());
        assert_eq!(response.error_kind.as_deref(), Some("computation_error"));
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_estimate_is_computation_error() {
        let err = use_case(RecordingModel::new(f64::INFINITY))
            .execute(&scenario())
            .unwrap_err();
        assert_eq!(err.kind(), "computation_error");
    }
}
