use std::{error::Error, fmt, io, path::PathBuf};

use model::ModelErr;

/// All errors that can occur while configuring or running the pricing pipeline.
#[derive(Debug)]
pub enum PricingErr {
    /// The model service could not score the request. The model's own error is kept as is.
    ModelInference(ModelErr),
    /// Invalid configuration, caught before any prediction is made.
    InvalidConfig(String),
    /// A configuration file could not be read.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for PricingErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelInference(e) => write!(f, "model inference failed: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
        }
    }
}

impl Error for PricingErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ModelInference(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<ModelErr> for PricingErr {
    fn from(e: ModelErr) -> Self {
        Self::ModelInference(e)
    }
}
