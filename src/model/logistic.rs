//! Standardized logistic-regression backend
//!
//! The artifact stores, per numeric feature, the scaler statistics and the
//! coefficient, and per categorical feature the coefficient of each one-hot
//! level. Levels the model never saw contribute nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::model::{Label, ModelError, PredictError, Prediction, Predictor};
use crate::types::{CategoricalFeature, FeatureRecord, NumericFeature};

/// Artifact embedded in the binary, used when no model path is configured
pub const BUILTIN_MODEL_JSON: &str = include_str!("../../models/screening_logreg.json");

/// Scaled numeric term: `weight * (x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    pub feature: NumericFeature,
    pub mean: f64,
    pub scale: f64,
    pub weight: f64,
}

/// One-hot categorical term: the weight of the record's level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTerm {
    pub feature: CategoricalFeature,
    pub levels: BTreeMap<String, f64>,
}

/// Pre-trained logistic-regression screening model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    /// Probability at or above which the label is positive
    pub threshold: f64,
    pub intercept: f64,
    pub numeric: Vec<NumericTerm>,
    #[serde(default)]
    pub categorical: Vec<CategoricalTerm>,
}

/// Summary of a loaded model
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub trained_at: Option<DateTime<Utc>>,
    pub threshold: f64,
    pub numeric_features: Vec<&'static str>,
    pub categorical_features: Vec<&'static str>,
}

impl LogisticModel {
    /// Parse and validate a model artifact
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: LogisticModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model artifact from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The model shipped with the crate
    pub fn builtin() -> Result<Self, ModelError> {
        Self::from_json(BUILTIN_MODEL_JSON)
    }

    /// Load the artifact at `path`, or the built-in model when none is given
    pub fn load(path: Option<&Path>) -> Result<Self, ModelError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            trained_at: self.trained_at,
            threshold: self.threshold,
            numeric_features: self.numeric.iter().map(|t| t.feature.as_str()).collect(),
            categorical_features: self.categorical.iter().map(|t| t.feature.as_str()).collect(),
        }
    }

    /// Check the artifact is usable for inference
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::Invalid(format!(
                "threshold {} must be within [0, 1]",
                self.threshold
            )));
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::Invalid("intercept must be finite".to_string()));
        }

        let mut seen = HashSet::new();
        for term in &self.numeric {
            let name = term.feature.as_str();
            if !seen.insert(name) {
                return Err(ModelError::Invalid(format!("duplicate term for {name}")));
            }
            if !term.scale.is_finite() || term.scale == 0.0 {
                return Err(ModelError::Invalid(format!(
                    "scale of {name} must be finite and non-zero"
                )));
            }
            if !term.mean.is_finite() || !term.weight.is_finite() {
                return Err(ModelError::Invalid(format!(
                    "mean and weight of {name} must be finite"
                )));
            }
        }
        for term in &self.categorical {
            let name = term.feature.as_str();
            if !seen.insert(name) {
                return Err(ModelError::Invalid(format!("duplicate term for {name}")));
            }
            if let Some((level, _)) = term.levels.iter().find(|(_, w)| !w.is_finite()) {
                return Err(ModelError::Invalid(format!(
                    "weight of {name}={level} must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Linear decision value `z` for a record
    pub fn decision(&self, features: &FeatureRecord) -> Result<f64, PredictError> {
        let mut z = self.intercept;

        for term in &self.numeric {
            let value = features.numeric(term.feature);
            if !value.is_finite() {
                return Err(PredictError::NonFiniteFeature {
                    feature: term.feature.as_str(),
                    value,
                });
            }
            let standardized = saturate((value - term.mean) / term.scale);
            z = saturate(z + saturate(term.weight * standardized));
        }

        for term in &self.categorical {
            let level = features.categorical(term.feature);
            match term.levels.get(level) {
                Some(weight) => z = saturate(z + weight),
                None => tracing::debug!(
                    feature = term.feature.as_str(),
                    category = level,
                    "unseen category level, no contribution"
                ),
            }
        }

        Ok(z)
    }
}

impl Predictor for LogisticModel {
    fn predict(&self, features: &FeatureRecord) -> Result<Prediction, PredictError> {
        let probability = sigmoid(self.decision(features)?);
        let label = if probability >= self.threshold {
            Label::Likely
        } else {
            Label::Unlikely
        };
        Ok(Prediction { probability, label })
    }
}

/// Keep a finite computation finite when it overflows
fn saturate(x: f64) -> f64 {
    x.clamp(-f64::MAX, f64::MAX)
}

/// Logistic function, split on sign so large |z| never overflows
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
