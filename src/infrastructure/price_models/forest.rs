use serde::{Deserialize, Serialize};

use super::PriceModel;
use crate::domain::error::{AppError, Result};
use crate::domain::features::{FeatureVector, FEATURE_COUNT};

/// A node in a fitted regression tree.
///
/// Samples with `x[feature] <= threshold` descend left.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, x: &[f64]) -> f64 {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            TreeNode::Leaf { value } if !value.is_finite() => Err(AppError::ValidationError(
                "tree leaf holds a non-finite value".to_string(),
            )),
            TreeNode::Leaf { .. } => Ok(()),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= FEATURE_COUNT {
                    return Err(AppError::ValidationError(format!(
                        "tree splits on feature {} but only {} features exist",
                        feature, FEATURE_COUNT
                    )));
                }
                if !threshold.is_finite() {
                    return Err(AppError::ValidationError(
                        "tree split has a non-finite threshold".to_string(),
                    ));
                }
                left.validate()?;
                right.validate()
            }
        }
    }
}

/// Random forest regressor; the estimate is the mean of all tree outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<TreeNode>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl ForestModel {
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(AppError::ValidationError(
                "random forest has no trees".to_string(),
            ));
        }
        self.trees.iter().try_for_each(TreeNode::validate)
    }
}

impl PriceModel for ForestModel {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();
        let total: f64 = self.trees.iter().map(|tree| tree.predict(x)).sum();
        total / self.trees.len() as f64
    }
}
