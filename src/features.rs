//! Feature assembly
//!
//! Merges the user's demographic answers with the computed sub-scores into the
//! flat record the predictor consumes. Absent or `null` user fields fall back
//! to documented defaults; `SymptomSum` is always derived from the sub-scores.

use crate::types::{
    FeatureRecord, SubScores, UserInfo, DEFAULT_AGE, DEFAULT_EDUCATION_STAGE, DEFAULT_GENDER,
};

/// Assembler for predictor feature records
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Build the eleven-field feature record
    ///
    /// Defaults: `Age=0`, `Gender="Male"`, `EducationStage="Teen"`,
    /// `Daydream=0`, `SleepHours=0`, `ScreenTime=0`, `FamilyHistory=0`.
    pub fn assemble(user: &UserInfo, scores: &SubScores) -> FeatureRecord {
        FeatureRecord {
            age: user.age.unwrap_or(DEFAULT_AGE),
            gender: user
                .gender
                .clone()
                .unwrap_or_else(|| DEFAULT_GENDER.to_string()),
            education_stage: user
                .education_stage
                .clone()
                .unwrap_or_else(|| DEFAULT_EDUCATION_STAGE.to_string()),
            inattention_score: scores.inattention,
            hyperactivity_score: scores.hyperactivity,
            impulsivity_score: scores.impulsivity,
            symptom_sum: scores.symptom_sum(),
            daydream: user.daydream.unwrap_or(0.0),
            sleep_hours: user.sleep_hours.unwrap_or(0.0),
            screen_time: user.screen_time.unwrap_or(0.0),
            family_history: user.family_history.unwrap_or(0.0),
        }
    }

    /// The record used when the user supplied nothing and every score is zero
    pub fn default_record() -> FeatureRecord {
        Self::assemble(&UserInfo::default(), &SubScores::default())
    }
}
