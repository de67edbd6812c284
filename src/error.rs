use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PremiumError>;

#[derive(Error, Debug)]
pub enum PremiumError {
    #[error("required field {field:?} is missing")]
    MissingField { field: &'static str },
    #[error("invalid input: {error_message}")]
    InvalidInput { error_message: String },
    #[error("schema mismatch: {error_message}")]
    SchemaMismatch { error_message: String },
    #[error("model returned no prediction")]
    EmptyPrediction,
    #[error("model returned a non-finite prediction {value}")]
    NonFinitePrediction { value: f64 },
    #[error("model failure: {error_message}")]
    Model { error_message: String },
    #[error("cannot read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse artifact {path:?}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PremiumError {
    pub fn schema(error_message: impl Into<String>) -> Self {
        PremiumError::SchemaMismatch { error_message: error_message.into() }
    }

    pub fn invalid(error_message: impl Into<String>) -> Self {
        PremiumError::InvalidInput { error_message: error_message.into() }
    }
}
