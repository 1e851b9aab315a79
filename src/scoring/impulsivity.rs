//! Impulsivity sub-score from the reaction-flash go/no-go task

use crate::scoring::{answer, bounded, SubScoreCalculator};
use crate::types::FlashReactionAnswers;

/// Weights of the impulsivity rubric
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulsivityRubric {
    pub false_alarm_weight: f64,
    pub premature_tap_weight: f64,
    pub multi_tap_weight: f64,
    /// Mean reaction time (ms) below which responses count as rushed
    pub rushed_reaction_ms: f64,
    /// Milliseconds below the rushed threshold per point
    pub rushed_ms_per_point: f64,
}

impl Default for ImpulsivityRubric {
    fn default() -> Self {
        Self {
            false_alarm_weight: 1.0,
            premature_tap_weight: 0.75,
            multi_tap_weight: 0.5,
            rushed_reaction_ms: 250.0,
            rushed_ms_per_point: 50.0,
        }
    }
}

/// Calculator for the impulsivity sub-score
#[derive(Debug, Clone, Default)]
pub struct ImpulsivityCalculator {
    rubric: ImpulsivityRubric,
}

impl ImpulsivityCalculator {
    pub fn new(rubric: ImpulsivityRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &ImpulsivityRubric {
        &self.rubric
    }
}

impl SubScoreCalculator for ImpulsivityCalculator {
    type Answers = FlashReactionAnswers;

    /// Compute the impulsivity score
    ///
    /// Formula:
    /// ```text
    /// Impulsivity = 1.0  * false_alarms
    ///             + 0.75 * premature_taps
    ///             + 0.5  * multi_taps
    ///             + max(0, 250 - mean_reaction_ms) / 50   (only when a mean was recorded)
    /// ```
    fn score(&self, answers: &FlashReactionAnswers) -> f64 {
        let r = &self.rubric;

        bounded(
            r.false_alarm_weight * answer(answers.false_alarms)
                + r.premature_tap_weight * answer(answers.premature_taps)
                + r.multi_tap_weight * answer(answers.multi_taps)
                + compute_speed_penalty(answer(answers.mean_reaction_ms), r),
        )
    }
}

/// Penalty for a mean reaction time faster than a considered response allows.
///
/// A zero mean means no go-trial was answered and carries no penalty.
fn compute_speed_penalty(mean_reaction_ms: f64, rubric: &ImpulsivityRubric) -> f64 {
    if mean_reaction_ms <= 0.0 || rubric.rushed_ms_per_point <= 0.0 {
        return 0.0;
    }
    (rubric.rushed_reaction_ms - mean_reaction_ms).max(0.0) / rubric.rushed_ms_per_point
}
