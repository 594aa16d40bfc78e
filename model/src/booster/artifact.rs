//! Serde mirror of the subset of the XGBoost JSON model schema needed for inference.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct Artifact {
    pub learner: Learner,
}

#[derive(Debug, Deserialize)]
pub(super) struct Learner {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub gradient_booster: GradientBooster,
    pub learner_model_param: LearnerModelParam,
    pub objective: ObjectiveParam,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "name")]
pub(super) enum GradientBooster {
    #[serde(rename = "gbtree")]
    GbTree { model: GbTreeModel },
    #[serde(rename = "dart")]
    Dart {
        gbtree: DartInner,
        weight_drop: Vec<f32>,
    },
}

#[derive(Debug, Deserialize)]
pub(super) struct DartInner {
    pub model: GbTreeModel,
}

#[derive(Debug, Deserialize)]
pub(super) struct GbTreeModel {
    pub trees: Vec<TreeArtifact>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TreeArtifact {
    pub left_children: Vec<i64>,
    pub right_children: Vec<i64>,
    pub split_indices: Vec<i64>,
    pub split_conditions: Vec<f32>,
    pub default_left: Vec<Flag>,
    #[serde(default)]
    pub split_type: Vec<i64>,
}

/// Older writers emit `default_left` as booleans, newer ones as 0/1 integers.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub(super) enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    pub fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

/// Every field is string encoded in the artifact.
#[derive(Debug, Deserialize)]
pub(super) struct LearnerModelParam {
    pub base_score: String,
    pub num_feature: String,
    #[serde(default)]
    pub num_class: Option<String>,
    #[serde(default)]
    pub num_target: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ObjectiveParam {
    pub name: String,
}
