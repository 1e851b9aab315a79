//! Screening report encoding
//!
//! Turns sub-scores and a validated prediction into the response body returned
//! to the frontend.

use serde::Serialize;

use crate::model::{Label, Prediction};
use crate::types::SubScores;

/// Result text shown when the model flags the user
pub const RESULT_TEXT_LIKELY: &str = "ADHD Likely (High correlation with behavioral patterns)";

/// Result text shown otherwise
pub const RESULT_TEXT_UNLIKELY: &str = "No ADHD Likely";

/// Disclaimer attached to every report
pub const DISCLAIMER: &str = "⚠️ This is an AI-based screening tool and NOT a clinical diagnosis. \
Please consult a qualified medical professional for an official assessment.";

/// Response body of a screening
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningReport {
    /// Probability as a percentage rounded to one decimal
    pub probability: f64,
    pub label: Label,
    pub scores: SubScores,
    pub symptom_sum: f64,
    pub result_text: &'static str,
    pub disclaimer: &'static str,
}

impl ScreeningReport {
    pub fn new(scores: SubScores, prediction: Prediction) -> Self {
        Self {
            probability: to_percentage(prediction.probability),
            label: prediction.label,
            symptom_sum: scores.symptom_sum(),
            scores,
            result_text: result_text(prediction.label),
            disclaimer: DISCLAIMER,
        }
    }
}

/// Convert a [0, 1] probability to a percentage with one decimal
///
/// Formula: `round(probability * 1000) / 10`, halves rounded away from zero
fn to_percentage(probability: f64) -> f64 {
    ((probability * 1000.0).round() / 10.0).clamp(0.0, 100.0)
}

fn result_text(label: Label) -> &'static str {
    match label {
        Label::Likely => RESULT_TEXT_LIKELY,
        Label::Unlikely => RESULT_TEXT_UNLIKELY,
    }
}
