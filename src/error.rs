//! Error types for ADHD Screen

use thiserror::Error;

use crate::model::{ModelError, PredictError};

/// Errors that can occur while screening a request
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScreeningError {
    /// Stable machine-readable kind, used in HTTP and CLI error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            ScreeningError::InvalidJson(_) => "invalid_json",
            ScreeningError::InvalidRequest(_) => "invalid_request",
            ScreeningError::Prediction(_) => "prediction_failed",
            ScreeningError::Model(_) => "model_error",
            ScreeningError::Config(_) => "config_error",
            ScreeningError::Io(_) => "io_error",
        }
    }

    /// Whether the caller (not the service) is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScreeningError::InvalidJson(_) | ScreeningError::InvalidRequest(_)
        )
    }
}
