use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used in the entire model module.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// The model module's error type.
#[derive(Debug)]
pub enum ModelErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json(serde_json::Error),
    InvalidModel(String),
    UnsupportedObjective(String),
    ShapeMismatch {
        got: usize,
        expected: usize,
    },
}

impl Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::Io { path, source } => {
                write!(f, "Failed to read model artifact {}: {source}", path.display())
            }
            ModelErr::Json(e) => write!(f, "The model artifact is not valid JSON: {e}"),
            ModelErr::InvalidModel(msg) => write!(f, "The model artifact is malformed: {msg}"),
            ModelErr::UnsupportedObjective(name) => {
                write!(f, "The model objective {name} is not supported")
            }
            ModelErr::ShapeMismatch { got, expected } => write!(
                f,
                "There's a feature count mismatch, got {got} columns and expected {expected}"
            ),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelErr::Io { source, .. } => Some(source),
            ModelErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ModelErr {
    fn from(e: serde_json::Error) -> Self {
        ModelErr::Json(e)
    }
}
