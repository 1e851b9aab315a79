//! Screening model interface
//!
//! The pipeline treats the classifier as an opaque black box behind the
//! [`Predictor`] trait: one record in, one probability and label out. The
//! shipped backend is [`LogisticModel`], loaded from a JSON artifact.

mod logistic;

pub use logistic::{CategoricalTerm, LogisticModel, ModelInfo, NumericTerm, BUILTIN_MODEL_JSON};

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::FeatureRecord;

/// Errors raised while loading or validating a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// Errors raised by a predictor for a single record
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Feature {feature} is not a finite number ({value})")]
    NonFiniteFeature { feature: &'static str, value: f64 },

    #[error("Predictor returned probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    #[error("Predictor backend failure: {0}")]
    Backend(String),
}

/// Binary screening label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Unlikely,
    Likely,
}

impl Label {
    pub fn as_u8(&self) -> u8 {
        match self {
            Label::Unlikely => 0,
            Label::Likely => 1,
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Model output for one feature record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Probability of the positive class, in [0, 1]
    pub probability: f64,
    pub label: Label,
}

impl Prediction {
    /// Check a backend's output before it reaches a client
    pub fn validated(self) -> Result<Self, PredictError> {
        if !self.probability.is_finite() || !(0.0..=1.0).contains(&self.probability) {
            return Err(PredictError::ProbabilityOutOfRange(self.probability));
        }
        Ok(self)
    }
}

/// Trait for screening model backends
pub trait Predictor: Send + Sync {
    /// Classify one feature record
    fn predict(&self, features: &FeatureRecord) -> Result<Prediction, PredictError>;
}
