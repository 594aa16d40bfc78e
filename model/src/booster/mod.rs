//! Gradient-boosted regression trees loaded from an XGBoost JSON model artifact.

mod artifact;
mod objective;
mod tree;

use std::{fs, path::Path};

use log::{debug, info};
use ndarray::{Array1, ArrayView2};

use artifact::{Artifact, GradientBooster};
use tree::Tree;

pub use objective::Objective;

use crate::{ModelErr, ModelService, Result};

/// An immutable tree ensemble ready for inference.
#[derive(Debug, Clone)]
pub struct Booster {
    trees: Vec<Tree>,
    weights: Vec<f32>,
    base_margin: f32,
    objective: Objective,
    num_features: usize,
    feature_names: Vec<String>,
}

impl Booster {
    /// Reads and parses a model artifact from disk.
    ///
    /// # Arguments
    /// * `path` - Where the JSON artifact lives.
    ///
    /// # Returns
    /// The loaded booster or an error if the file can't be read or isn't a valid model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ModelErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let booster = Self::from_json_str(&content)?;
        info!(
            "loaded model from {}: {} trees, {} features, {:?} objective",
            path.display(),
            booster.num_trees(),
            booster.num_features,
            booster.objective
        );

        Ok(booster)
    }

    /// Parses a model artifact already held in memory.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let artifact: Artifact = serde_json::from_str(s)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: Artifact) -> Result<Self> {
        let learner = artifact.learner;
        let param = learner.learner_model_param;

        let num_features = param
            .num_feature
            .trim()
            .parse::<usize>()
            .map_err(|e| ModelErr::InvalidModel(format!("num_feature: {e}")))?;

        if num_features == 0 {
            return Err(ModelErr::InvalidModel("num_feature must be positive".into()));
        }

        for (name, value) in [("num_class", &param.num_class), ("num_target", &param.num_target)] {
            let count = match value {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| ModelErr::InvalidModel(format!("{name}: {e}")))?,
                None => 0,
            };
            if count > 1 {
                return Err(ModelErr::InvalidModel(format!(
                    "{name} is {count}, only single output regressors are supported"
                )));
            }
        }

        let objective = Objective::from_name(&learner.objective.name)?;
        let base_score = parse_base_score(&param.base_score)?;

        let (raw_trees, weights) = match learner.gradient_booster {
            GradientBooster::GbTree { model } => {
                let weights = vec![1.; model.trees.len()];
                (model.trees, weights)
            }
            GradientBooster::Dart {
                gbtree,
                weight_drop,
            } => {
                if weight_drop.len() != gbtree.model.trees.len() {
                    return Err(ModelErr::InvalidModel(format!(
                        "dart has {} weights for {} trees",
                        weight_drop.len(),
                        gbtree.model.trees.len()
                    )));
                }
                (gbtree.model.trees, weight_drop)
            }
        };

        let trees = raw_trees
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Tree::from_artifact(i, raw, num_features))
            .collect::<Result<Vec<_>>>()?;

        let feature_names = learner.feature_names;
        if !feature_names.is_empty() && feature_names.len() != num_features {
            return Err(ModelErr::InvalidModel(format!(
                "{} feature names for {num_features} features",
                feature_names.len()
            )));
        }

        debug!(
            "booster ready, base_score {base_score}, {} total nodes",
            trees.iter().map(Tree::len).sum::<usize>()
        );

        Ok(Self {
            trees,
            weights,
            base_margin: objective.link(base_score),
            objective,
            num_features,
            feature_names,
        })
    }

    /// Returns the amount of trees in the ensemble.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Returns the objective the model was trained with.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    fn predict_one(&self, x: &[f32]) -> f32 {
        let margin = self
            .trees
            .iter()
            .zip(&self.weights)
            .fold(self.base_margin, |acc, (tree, w)| acc + w * tree.leaf_value(x));

        self.objective.inverse_link(margin)
    }
}

impl ModelService for Booster {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let (_, ncols) = rows.dim();
        if ncols != self.num_features {
            return Err(ModelErr::ShapeMismatch {
                got: ncols,
                expected: self.num_features,
            });
        }

        let mut x = vec![0.; ncols];
        let preds = rows
            .outer_iter()
            .map(|row| {
                x.iter_mut().zip(row).for_each(|(dst, &v)| *dst = v as f32);
                self.predict_one(&x) as f64
            })
            .collect();

        Ok(preds)
    }
}

/// Newer writers wrap the value in brackets, e.g. `"[2.0685E0]"`.
fn parse_base_score(s: &str) -> Result<f32> {
    let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');

    trimmed
        .trim()
        .parse::<f32>()
        .map_err(|e| ModelErr::InvalidModel(format!("base_score {s:?}: {e}")))
}
