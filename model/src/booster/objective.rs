use crate::{ModelErr, Result};

/// The link between the tree ensemble's additive margin and the reported prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Squared error and friends: the margin is the prediction.
    Identity,
    /// Gamma, tweedie and poisson regression: the margin is `ln(prediction)`.
    Log,
    /// Logistic regression: the margin is `logit(prediction)`.
    Logit,
}

impl Objective {
    /// Resolves an XGBoost objective name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "reg:squarederror" | "reg:linear" | "reg:absoluteerror" | "reg:pseudohubererror"
            | "reg:squaredlogerror" => Ok(Objective::Identity),
            "reg:gamma" | "reg:tweedie" | "count:poisson" => Ok(Objective::Log),
            "reg:logistic" | "binary:logistic" => Ok(Objective::Logit),
            other => Err(ModelErr::UnsupportedObjective(other.to_string())),
        }
    }

    /// Maps a stored `base_score` (prediction space) into margin space.
    pub fn link(self, base_score: f32) -> f32 {
        match self {
            Objective::Identity => base_score,
            Objective::Log => base_score.ln(),
            Objective::Logit => (base_score / (1. - base_score)).ln(),
        }
    }

    /// Maps an accumulated margin back into prediction space.
    pub fn inverse_link(self, margin: f32) -> f32 {
        match self {
            Objective::Identity => margin,
            Objective::Log => margin.exp(),
            Objective::Logit => 1. / (1. + (-margin).exp()),
        }
    }
}
