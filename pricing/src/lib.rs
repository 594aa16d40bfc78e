pub mod config;
pub mod error;
pub mod features;
pub mod form;
pub mod format;
pub mod pipeline;

pub use config::AppConfig;
pub use error::PricingErr;
pub use features::{FeatureVector, RawInputs};
pub use form::{Field, FieldSpec, FormConfig};
pub use format::format_usd;
pub use pipeline::{Estimate, OutputScale, Pipeline, predict, prepare, scale_to_display};
