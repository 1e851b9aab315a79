//! Sub-score computation module
//!
//! Each behavioral instrument (attention-pilot, reaction-flash, steady-shield)
//! has a calculator that folds its answer bundle into one non-negative score.
//!
//! Calculators never fail: absent answers count as zero, negative or
//! non-finite answers are clamped to zero, totals saturate at `f64::MAX`, and
//! the same bundle always yields the same score.

pub mod hyperactivity;
pub mod impulsivity;
pub mod inattention;

pub use hyperactivity::{HyperactivityCalculator, HyperactivityRubric};
pub use impulsivity::{ImpulsivityCalculator, ImpulsivityRubric};
pub use inattention::{InattentionCalculator, InattentionRubric};

use crate::types::{ScreeningRequest, SubScores};

/// Trait for instrument sub-score calculators
pub trait SubScoreCalculator {
    /// Answer bundle of the instrument this calculator scores
    type Answers: Default;

    /// Fold an answer bundle into a single non-negative score
    fn score(&self, answers: &Self::Answers) -> f64;

    /// Score an optional bundle, treating a missing one as empty
    fn score_or_default(&self, answers: Option<&Self::Answers>) -> f64 {
        match answers {
            Some(answers) => self.score(answers),
            None => self.score(&Self::Answers::default()),
        }
    }
}

/// The three calculators used for one screening
#[derive(Debug, Clone, Default)]
pub struct ScoringSuite {
    pub inattention: InattentionCalculator,
    pub impulsivity: ImpulsivityCalculator,
    pub hyperactivity: HyperactivityCalculator,
}

impl ScoringSuite {
    /// Score all three instruments of a request
    pub fn score_all(&self, request: &ScreeningRequest) -> SubScores {
        let inattention = self
            .inattention
            .score_or_default(request.adaptive_pilot.as_ref());
        let impulsivity = self
            .impulsivity
            .score_or_default(request.flash_reaction.as_ref());
        let hyperactivity = self
            .hyperactivity
            .score_or_default(request.steady_shield.as_ref());

        SubScores {
            inattention,
            hyperactivity,
            impulsivity,
        }
    }
}

/// Read one answer as a non-negative finite value
pub(crate) fn answer(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Keep a weighted total within [0, f64::MAX]
pub(crate) fn bounded(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, f64::MAX)
}
