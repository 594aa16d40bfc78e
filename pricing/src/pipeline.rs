//! Turns form inputs into a price: `prepare` → `predict` → `scale_to_display`.

use std::{fmt, str::FromStr};

use log::debug;
use model::{ModelErr, ModelService};
use ndarray::aview2;
use serde::{Deserialize, Serialize};

use crate::{FeatureVector, PricingErr, RawInputs, features::FEATURE_NAMES, format_usd};

/// Income is shown on a 0 to 100 scale but the model was trained on 0 to 10.
pub const MEDINC_DISPLAY_FACTOR: f64 = 10.0;

/// The regressor predicts in units of $100,000.
pub const PRICE_UNIT_USD: f64 = 100_000.0;

/// Builds the model input row from the raw form values.
pub fn prepare(
    display_medinc: f64,
    house_age: u32,
    avg_rooms: u32,
    lat: f64,
    lon: f64,
) -> FeatureVector {
    FeatureVector {
        med_inc: display_medinc / MEDINC_DISPLAY_FACTOR,
        house_age: house_age as f64,
        ave_rooms: avg_rooms as f64,
        latitude: lat,
        longitude: lon,
    }
}

/// Scores a single feature vector.
///
/// # Errors
/// Any failure of the model service is returned as `PricingErr::ModelInference`, untouched.
pub fn predict<M: ModelService + ?Sized>(vector: &FeatureVector, model: &M) -> Result<f64, PricingErr> {
    let row = vector.to_row();
    let preds = model.predict(aview2(std::slice::from_ref(&row)))?;
    preds.first().copied().ok_or_else(|| {
        PricingErr::ModelInference(ModelErr::ShapeMismatch {
            got: 0,
            expected: 1,
        })
    })
}

/// Converts a raw score into US dollars.
pub fn scale_to_display(raw_score: f64) -> f64 {
    raw_score * PRICE_UNIT_USD
}

/// How the raw model output relates to the price.
///
/// `Linear` assumes the regressor was trained on the price in $100,000 units. `Exp` assumes it
/// was trained on the log of that quantity and exponentiates first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputScale {
    #[default]
    Linear,
    Exp,
}

impl OutputScale {
    pub fn apply(self, raw_score: f64) -> f64 {
        match self {
            OutputScale::Linear => scale_to_display(raw_score),
            OutputScale::Exp => scale_to_display(raw_score.exp()),
        }
    }
}

impl FromStr for OutputScale {
    type Err = PricingErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(OutputScale::Linear),
            "exp" => Ok(OutputScale::Exp),
            other => Err(PricingErr::InvalidConfig(format!(
                "unknown output scale '{other}', expected linear or exp"
            ))),
        }
    }
}

impl fmt::Display for OutputScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputScale::Linear => write!(f, "linear"),
            OutputScale::Exp => write!(f, "exp"),
        }
    }
}

/// The outcome of one successful prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub features: FeatureVector,
    pub raw_score: f64,
    pub price: f64,
}

impl Estimate {
    /// The price as shown to the user, e.g. `$83,421.00`.
    pub fn display(&self) -> String {
        format_usd(self.price)
    }
}

/// A loaded model plus the output scale, shared by every request.
#[derive(Debug, Clone)]
pub struct Pipeline<M> {
    model: M,
    scale: OutputScale,
}

impl<M: ModelService> Pipeline<M> {
    /// Creates a new `Pipeline`.
    ///
    /// # Arguments
    /// * `model` - The model handle, usually an `Arc` to a model loaded at startup.
    /// * `scale` - How to turn raw scores into dollars.
    ///
    /// # Errors
    /// Returns `PricingErr::InvalidConfig` if the model doesn't take five features, or if it
    /// recorded column names that differ from [`FEATURE_NAMES`].
    pub fn new(model: M, scale: OutputScale) -> Result<Self, PricingErr> {
        let expected = FeatureVector::WIDTH;
        if model.num_features() != expected {
            return Err(PricingErr::InvalidConfig(format!(
                "model expects {} features, the form provides {expected}",
                model.num_features()
            )));
        }

        let names = model.feature_names();
        let mismatch = names.len() != FEATURE_NAMES.len()
            || names.iter().zip(FEATURE_NAMES).any(|(got, want)| got != want);
        if !names.is_empty() && mismatch {
            return Err(PricingErr::InvalidConfig(format!(
                "model columns {names:?} don't match the form order {FEATURE_NAMES:?}"
            )));
        }

        Ok(Self { model, scale })
    }

    pub fn scale(&self) -> OutputScale {
        self.scale
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Runs the whole pipeline for one set of form inputs.
    ///
    /// # Errors
    /// Returns `PricingErr::ModelInference` if the model fails; no price is produced then.
    pub fn estimate(&self, inputs: &RawInputs) -> Result<Estimate, PricingErr> {
        let features = prepare(
            inputs.medinc_display,
            inputs.house_age,
            inputs.avg_rooms,
            inputs.latitude,
            inputs.longitude,
        );

        let raw_score = predict(&features, &self.model)?;
        let price = self.scale.apply(raw_score);

        debug!(raw_score = raw_score, price = price; "estimated {features:?} with {} scale", self.scale);

        Ok(Estimate {
            features,
            raw_score,
            price,
        })
    }
}
