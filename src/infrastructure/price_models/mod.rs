pub mod forest;
pub mod linear;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::domain::error::{AppError, Result};
use crate::domain::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use forest::ForestModel;
use linear::LinearModel;

/// A fitted regression function over the fixed feature layout.
pub trait PriceModel: Send + Sync {
    fn kind(&self) -> &'static str;
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// On-disk model parameters, tagged by estimator family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    RandomForest(ForestModel),
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::Linear(model) => model.validate(),
            ModelArtifact::RandomForest(model) => model.validate(),
        }
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            ModelArtifact::Linear(model) => model.feature_names.as_deref(),
            ModelArtifact::RandomForest(model) => model.feature_names.as_deref(),
        }
    }

    pub fn tree_count(&self) -> Option<usize> {
        match self {
            ModelArtifact::Linear(_) => None,
            ModelArtifact::RandomForest(model) => Some(model.trees.len()),
        }
    }

    pub fn into_model(self) -> Arc<dyn PriceModel> {
        match self {
            ModelArtifact::Linear(model) => Arc::new(model),
            ModelArtifact::RandomForest(model) => Arc::new(model),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub kind: String,
    pub feature_count: usize,
    pub feature_names: Option<Vec<String>>,
    pub tree_count: Option<usize>,
    pub fingerprint: String,
}

pub struct LoadedModel {
    pub model: Arc<dyn PriceModel>,
    pub summary: ModelSummary,
}

/// Read, validate and instantiate a model artifact.
pub fn load_model(path: &Path) -> Result<LoadedModel> {
    let (artifact, fingerprint) = read_artifact(path)?;

    if let Some(names) = artifact.feature_names() {
        if !feature_names_match(names) {
            tracing::warn!(
                path = %path.display(),
                declared = ?names,
                expected = ?FEATURE_NAMES,
                "Model artifact declares a different feature order; predictions may be wrong"
            );
        }
    }

    let summary = summarize(&artifact, fingerprint);
    Ok(LoadedModel {
        model: artifact.into_model(),
        summary,
    })
}

pub fn read_artifact(path: &Path) -> Result<(ModelArtifact, String)> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            AppError::StartupDataMissing(format!("model artifact {} not found", path.display()))
        }
        _ => AppError::IoError(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let fingerprint = hex::encode(Sha256::digest(&bytes));
    let artifact = parse_artifact(&bytes)?;
    Ok((artifact, fingerprint))
}

pub fn parse_artifact(bytes: &[u8]) -> Result<ModelArtifact> {
    let artifact: ModelArtifact = serde_json::from_slice(bytes)
        .map_err(|e| AppError::ValidationError(format!("Invalid model artifact: {}", e)))?;
    artifact.validate()?;
    Ok(artifact)
}

pub fn summarize(artifact: &ModelArtifact, fingerprint: String) -> ModelSummary {
    let kind = match artifact {
        ModelArtifact::Linear(_) => "linear",
        ModelArtifact::RandomForest(_) => "random_forest",
    };
    ModelSummary {
        kind: kind.to_string(),
        feature_count: FEATURE_COUNT,
        feature_names: artifact.feature_names().map(<[String]>::to_vec),
        tree_count: artifact.tree_count(),
        fingerprint,
    }
}

fn feature_names_match(names: &[String]) -> bool {
    names.len() == FEATURE_COUNT && names.iter().zip(FEATURE_NAMES).all(|(a, b)| a == b)
}
