use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::error;

use crate::application::{load_choices, PredictUseCase, SystemClock};
use crate::domain::app_config::AppConfig;
use crate::domain::error::AppError;
use crate::infrastructure::price_models::{load_model, ModelSummary, PriceModel};
use crate::interfaces::http::{add_log, LogEntry};
use crate::interfaces::state::AppState;

/// Load the startup artifacts and assemble the shared state.
///
/// Missing or broken artifacts degrade features instead of aborting startup.
pub fn setup(config: &AppConfig, logs: &Arc<Mutex<Vec<LogEntry>>>) -> AppState {
    let (model, model_summary) = load_price_model(&config.model_file(), logs);

    let dataset_path = config.dataset_file();
    let choices = load_choices(&dataset_path);
    if choices.is_empty() {
        add_log(
            logs,
            "WARN",
            "Reference",
            &format!(
                "No reference data from {}; choice lists are empty",
                dataset_path.display()
            ),
        );
    } else {
        add_log(
            logs,
            "INFO",
            "Reference",
            &format!("CSV data loaded from {}", dataset_path.display()),
        );
    }

    AppState {
        predict_use_case: PredictUseCase::new(model, Arc::new(SystemClock)),
        choices: Arc::new(choices),
        model_summary,
    }
}

fn load_price_model(
    path: &Path,
    logs: &Arc<Mutex<Vec<LogEntry>>>,
) -> (Option<Arc<dyn PriceModel>>, Option<ModelSummary>) {
    match load_model(path) {
        Ok(loaded) => {
            add_log(
                logs,
                "INFO",
                "Model",
                &format!(
                    "Model loaded from {} (kind={} sha256={})",
                    path.display(),
                    loaded.summary.kind,
                    loaded.summary.fingerprint
                ),
            );
            (Some(loaded.model), Some(loaded.summary))
        }
        Err(AppError::StartupDataMissing(msg)) => {
            add_log(
                logs,
                "ERROR",
                "Model",
                &format!("{}; predictions are disabled", msg),
            );
            (None, None)
        }
        Err(err) => {
            error!(error = %err, path = %path.display(), "Failed to load model artifact");
            add_log(
                logs,
                "ERROR",
                "Model",
                &format!("Model artifact unusable ({}); predictions are disabled", err),
            );
            (None, None)
        }
    }
}
