use std::sync::Arc;

use crate::application::PredictUseCase;
use crate::domain::reference::ReferenceChoices;
use crate::infrastructure::price_models::ModelSummary;

/// Process-wide state, built once at startup and read-only afterwards.
pub struct AppState {
    pub predict_use_case: PredictUseCase,
    pub choices: Arc<ReferenceChoices>,
    pub model_summary: Option<ModelSummary>,
}
