use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{FormConfig, OutputScale, PricingErr};

const DEFAULT_MODEL_PATH: &str = "model.json";
const DEFAULT_LOG_FILE: &str = "house_price.log";

pub const ENV_MODEL_PATH: &str = "HOUSE_MODEL_PATH";
pub const ENV_OUTPUT_SCALE: &str = "HOUSE_OUTPUT_SCALE";
pub const ENV_LOG_FILE: &str = "HOUSE_LOG_FILE";

/// Everything the application needs at startup.
///
/// Resolved as built-in defaults, then an optional JSON file, then environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub output_scale: OutputScale,
    pub log_file: PathBuf,
    pub form: FormConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.into(),
            output_scale: OutputScale::default(),
            log_file: DEFAULT_LOG_FILE.into(),
            form: FormConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `path` (if any) and the process environment.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or parsed, or the result is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, PricingErr> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(|key| env::var(key).ok())?;
        config.form.validate()?;

        Ok(config)
    }

    /// One line describing the resolved settings, for the startup log.
    pub fn summary(&self) -> String {
        format!(
            "model={} scale={} log={}",
            self.model_path.display(),
            self.output_scale,
            self.log_file.display()
        )
    }

    /// Reads a JSON configuration file. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `PricingErr::Io` if the file can't be read and `PricingErr::InvalidConfig` if it
    /// isn't valid.
    pub fn from_file(path: &Path) -> Result<Self, PricingErr> {
        let content = fs::read_to_string(path).map_err(|source| PricingErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, PricingErr> {
        serde_json::from_str(s).map_err(|e| PricingErr::InvalidConfig(format!("invalid JSON: {e}")))
    }

    /// Overrides fields from environment variables.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, `None` if unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), PricingErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_MODEL_PATH) {
            self.model_path = path.into();
        }
        if let Some(scale) = lookup(ENV_OUTPUT_SCALE) {
            self.output_scale = scale.parse()?;
        }
        if let Some(path) = lookup(ENV_LOG_FILE) {
            self.log_file = path.into();
        }

        Ok(())
    }
}
