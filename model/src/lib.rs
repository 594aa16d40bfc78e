pub mod booster;
pub mod error;
mod service;

pub use booster::{Booster, Objective};
pub use error::{ModelErr, Result};
pub use service::ModelService;
