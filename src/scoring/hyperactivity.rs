//! Hyperactivity sub-score from the steady-shield hold task

use crate::scoring::{answer, bounded, SubScoreCalculator};
use crate::types::SteadyShieldAnswers;

/// Weights of the hyperactivity rubric
#[derive(Debug, Clone, PartialEq)]
pub struct HyperactivityRubric {
    pub touch_release_weight: f64,
    pub wobble_weight: f64,
    pub fidget_tap_weight: f64,
    /// Movement variance (px²) per point
    pub movement_variance_per_point: f64,
}

impl Default for HyperactivityRubric {
    fn default() -> Self {
        Self {
            touch_release_weight: 1.0,
            wobble_weight: 0.5,
            fidget_tap_weight: 0.5,
            movement_variance_per_point: 100.0,
        }
    }
}

/// Calculator for the hyperactivity sub-score
#[derive(Debug, Clone, Default)]
pub struct HyperactivityCalculator {
    rubric: HyperactivityRubric,
}

impl HyperactivityCalculator {
    pub fn new(rubric: HyperactivityRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &HyperactivityRubric {
        &self.rubric
    }
}

impl SubScoreCalculator for HyperactivityCalculator {
    type Answers = SteadyShieldAnswers;

    /// Compute the hyperactivity score
    ///
    /// Formula:
    /// ```text
    /// Hyperactivity = 1.0 * touch_releases
    ///               + 0.5 * shield_wobbles
    ///               + 0.5 * fidget_taps
    ///               + movement_variance / 100
    /// ```
    fn score(&self, answers: &SteadyShieldAnswers) -> f64 {
        let r = &self.rubric;

        let movement = if r.movement_variance_per_point > 0.0 {
            answer(answers.movement_variance) / r.movement_variance_per_point
        } else {
            0.0
        };

        bounded(
            r.touch_release_weight * answer(answers.touch_releases)
                + r.wobble_weight * answer(answers.shield_wobbles)
                + r.fidget_tap_weight * answer(answers.fidget_taps)
                + movement,
        )
    }
}
