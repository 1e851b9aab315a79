//! Inattention sub-score from the attention-pilot task

use crate::scoring::{answer, bounded, SubScoreCalculator};
use crate::types::AdaptivePilotAnswers;

/// Reaction-time spread (ms) that is still considered steady attention
const STEADY_REACTION_SD_MS: f64 = 120.0;

/// Weights of the inattention rubric
#[derive(Debug, Clone, PartialEq)]
pub struct InattentionRubric {
    pub missed_gate_weight: f64,
    pub late_response_weight: f64,
    pub instruction_repeat_weight: f64,
    /// Seconds off course that count as one point
    pub off_course_seconds_per_point: f64,
    /// Milliseconds of reaction-time spread above the steady level per point
    pub reaction_sd_ms_per_point: f64,
}

impl Default for InattentionRubric {
    fn default() -> Self {
        Self {
            missed_gate_weight: 1.0,
            late_response_weight: 0.5,
            instruction_repeat_weight: 1.0,
            off_course_seconds_per_point: 10.0,
            reaction_sd_ms_per_point: 60.0,
        }
    }
}

/// Calculator for the inattention sub-score
#[derive(Debug, Clone, Default)]
pub struct InattentionCalculator {
    rubric: InattentionRubric,
}

impl InattentionCalculator {
    pub fn new(rubric: InattentionRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &InattentionRubric {
        &self.rubric
    }
}

impl SubScoreCalculator for InattentionCalculator {
    type Answers = AdaptivePilotAnswers;

    /// Compute the inattention score
    ///
    /// Formula:
    /// ```text
    /// Inattention = 1.0 * missed_gates
    ///             + 0.5 * late_responses
    ///             + 1.0 * instructions_repeated
    ///             + off_course_seconds / 10
    ///             + max(0, reaction_time_sd_ms - 120) / 60
    /// ```
    fn score(&self, answers: &AdaptivePilotAnswers) -> f64 {
        let r = &self.rubric;

        bounded(
            r.missed_gate_weight * answer(answers.missed_gates)
                + r.late_response_weight * answer(answers.late_responses)
                + r.instruction_repeat_weight * answer(answers.instructions_repeated)
                + per_point(answer(answers.off_course_seconds), r.off_course_seconds_per_point)
                + compute_reaction_spread_penalty(
                    answer(answers.reaction_time_sd_ms),
                    r.reaction_sd_ms_per_point,
                ),
        )
    }
}

/// Penalty for erratic reaction times beyond the steady level
fn compute_reaction_spread_penalty(reaction_sd_ms: f64, ms_per_point: f64) -> f64 {
    per_point((reaction_sd_ms - STEADY_REACTION_SD_MS).max(0.0), ms_per_point)
}

fn per_point(value: f64, unit: f64) -> f64 {
    if unit <= 0.0 {
        return 0.0;
    }
    value / unit
}
