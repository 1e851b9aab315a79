//! Core types for the ADHD Screen pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: the request and its instrument answer bundles, sub-scores, and the
//! feature record handed to the predictor.

use serde::{Deserialize, Serialize};

/// Default age used when the user omits it
pub const DEFAULT_AGE: f64 = 0.0;
/// Default gender used when the user omits it
pub const DEFAULT_GENDER: &str = "Male";
/// Default education stage used when the user omits it
pub const DEFAULT_EDUCATION_STAGE: &str = "Teen";

/// A screening request as posted by the frontend.
///
/// Every sub-object is optional; absent or `null` objects behave as empty ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScreeningRequest {
    #[serde(default, deserialize_with = "lenient::object")]
    pub user: Option<UserInfo>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub adaptive_pilot: Option<AdaptivePilotAnswers>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub flash_reaction: Option<FlashReactionAnswers>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub steady_shield: Option<SteadyShieldAnswers>,
}

/// Demographic and lifestyle answers about the user.
///
/// `None` means the key was absent or `null`; defaults are applied by the
/// feature assembler, not here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfo {
    /// Age in years (default 0)
    #[serde(default, deserialize_with = "lenient::number")]
    pub age: Option<f64>,
    /// Gender category (default "Male")
    #[serde(default, deserialize_with = "lenient::category")]
    pub gender: Option<String>,
    /// Education stage category, e.g. "Child", "Teen", "Adult" (default "Teen")
    #[serde(default, deserialize_with = "lenient::category")]
    pub education_stage: Option<String>,
    /// Frequent daydreaming, 0 or 1 (default 0)
    #[serde(default, deserialize_with = "lenient::number")]
    pub daydream: Option<f64>,
    /// Average nightly sleep in hours (default 0)
    #[serde(default, deserialize_with = "lenient::number")]
    pub sleep_hours: Option<f64>,
    /// Average daily screen time in hours (default 0)
    #[serde(default, deserialize_with = "lenient::number")]
    pub screen_time: Option<f64>,
    /// ADHD in the immediate family, 0 or 1 (default 0)
    #[serde(default, deserialize_with = "lenient::number")]
    pub family_history: Option<f64>,
}

/// Answers from the attention-pilot task (steering through gates on cue)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdaptivePilotAnswers {
    /// Gates the user failed to respond to (omission errors)
    #[serde(default, deserialize_with = "lenient::number")]
    pub missed_gates: Option<f64>,
    /// Responses that arrived after the response window closed
    #[serde(default, deserialize_with = "lenient::number")]
    pub late_responses: Option<f64>,
    /// Times the user asked for the instructions again
    #[serde(default, deserialize_with = "lenient::number")]
    pub instructions_repeated: Option<f64>,
    /// Total seconds spent off the flight path
    #[serde(default, deserialize_with = "lenient::number")]
    pub off_course_seconds: Option<f64>,
    /// Standard deviation of reaction times in milliseconds
    #[serde(default, deserialize_with = "lenient::number")]
    pub reaction_time_sd_ms: Option<f64>,
}

/// Answers from the reaction-flash go/no-go task
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FlashReactionAnswers {
    /// Taps on no-go flashes (commission errors)
    #[serde(default, deserialize_with = "lenient::number")]
    pub false_alarms: Option<f64>,
    /// Taps before the flash appeared
    #[serde(default, deserialize_with = "lenient::number")]
    pub premature_taps: Option<f64>,
    /// Extra taps on a single flash
    #[serde(default, deserialize_with = "lenient::number")]
    pub multi_taps: Option<f64>,
    /// Mean reaction time on go flashes in milliseconds
    #[serde(default, deserialize_with = "lenient::number")]
    pub mean_reaction_ms: Option<f64>,
}

/// Answers from the steady-shield hold task
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SteadyShieldAnswers {
    /// Times the finger left the shield during a hold
    #[serde(default, deserialize_with = "lenient::number")]
    pub touch_releases: Option<f64>,
    /// Wobbles beyond the steadiness tolerance
    #[serde(default, deserialize_with = "lenient::number")]
    pub shield_wobbles: Option<f64>,
    /// Taps outside the shield while holding
    #[serde(default, deserialize_with = "lenient::number")]
    pub fidget_taps: Option<f64>,
    /// Variance of the hold position in px²
    #[serde(default, deserialize_with = "lenient::number")]
    pub movement_variance: Option<f64>,
}

/// The three symptom sub-scores of one request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SubScores {
    pub inattention: f64,
    pub hyperactivity: f64,
    pub impulsivity: f64,
}

impl SubScores {
    /// Symptom sum, always derived from the three sub-scores and capped at `f64::MAX`
    pub fn symptom_sum(&self) -> f64 {
        (self.inattention + self.impulsivity + self.hyperactivity).min(f64::MAX)
    }
}

/// Numeric inputs of the feature record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericFeature {
    Age,
    InattentionScore,
    HyperactivityScore,
    ImpulsivityScore,
    SymptomSum,
    Daydream,
    SleepHours,
    ScreenTime,
    FamilyHistory,
}

impl NumericFeature {
    pub const ALL: [NumericFeature; 9] = [
        NumericFeature::Age,
        NumericFeature::InattentionScore,
        NumericFeature::HyperactivityScore,
        NumericFeature::ImpulsivityScore,
        NumericFeature::SymptomSum,
        NumericFeature::Daydream,
        NumericFeature::SleepHours,
        NumericFeature::ScreenTime,
        NumericFeature::FamilyHistory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NumericFeature::Age => "Age",
            NumericFeature::InattentionScore => "InattentionScore",
            NumericFeature::HyperactivityScore => "HyperactivityScore",
            NumericFeature::ImpulsivityScore => "ImpulsivityScore",
            NumericFeature::SymptomSum => "SymptomSum",
            NumericFeature::Daydream => "Daydream",
            NumericFeature::SleepHours => "SleepHours",
            NumericFeature::ScreenTime => "ScreenTime",
            NumericFeature::FamilyHistory => "FamilyHistory",
        }
    }
}

/// Categorical inputs of the feature record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalFeature {
    Gender,
    EducationStage,
}

impl CategoricalFeature {
    pub const ALL: [CategoricalFeature; 2] =
        [CategoricalFeature::Gender, CategoricalFeature::EducationStage];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalFeature::Gender => "Gender",
            CategoricalFeature::EducationStage => "EducationStage",
        }
    }
}

/// The flat eleven-field record consumed by the predictor.
///
/// Only [`crate::features::FeatureAssembler`] builds records, so `SymptomSum`
/// can never drift from the three sub-scores it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureRecord {
    pub(crate) age: f64,
    pub(crate) gender: String,
    pub(crate) education_stage: String,
    pub(crate) inattention_score: f64,
    pub(crate) hyperactivity_score: f64,
    pub(crate) impulsivity_score: f64,
    pub(crate) symptom_sum: f64,
    pub(crate) daydream: f64,
    pub(crate) sleep_hours: f64,
    pub(crate) screen_time: f64,
    pub(crate) family_history: f64,
}

impl FeatureRecord {
    pub fn numeric(&self, feature: NumericFeature) -> f64 {
        match feature {
            NumericFeature::Age => self.age,
            NumericFeature::InattentionScore => self.inattention_score,
            NumericFeature::HyperactivityScore => self.hyperactivity_score,
            NumericFeature::ImpulsivityScore => self.impulsivity_score,
            NumericFeature::SymptomSum => self.symptom_sum,
            NumericFeature::Daydream => self.daydream,
            NumericFeature::SleepHours => self.sleep_hours,
            NumericFeature::ScreenTime => self.screen_time,
            NumericFeature::FamilyHistory => self.family_history,
        }
    }

    pub fn categorical(&self, feature: CategoricalFeature) -> &str {
        match feature {
            CategoricalFeature::Gender => &self.gender,
            CategoricalFeature::EducationStage => &self.education_stage,
        }
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn education_stage(&self) -> &str {
        &self.education_stage
    }

    pub fn symptom_sum(&self) -> f64 {
        self.symptom_sum
    }
}

/// Request-boundary coercion for loosely typed frontend values.
///
/// Numbers may arrive as JSON numbers, numeric strings or booleans; `null`
/// means absent. Sub-objects must be JSON objects. Anything else is rejected.
mod lenient {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Only a JSON object (or `null`) may fill a sub-object; serde would
    /// otherwise map an array onto the fields by position.
    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value @ Value::Object(_)) => serde_json::from_value(value)
                .map(Some)
                .map_err(D::Error::custom),
            Some(other) => Err(D::Error::custom(format!(
                "expected an object, found {}",
                describe(&other)
            ))),
        }
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("number {n} is out of range"))),
            Some(Value::Bool(b)) => Ok(Some(if b { 1.0 } else { 0.0 })),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(Some(v)),
                    _ => Err(D::Error::custom(format!(
                        "expected a number, found string {s:?}"
                    ))),
                }
            }
            Some(other) => Err(D::Error::custom(format!(
                "expected a number, found {}",
                describe(&other)
            ))),
        }
    }

    pub fn category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(D::Error::custom(format!(
                "expected a string, found {}",
                describe(&other)
            ))),
        }
    }

    fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_request_parses() {
        let request: ScreeningRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, ScreeningRequest::default());
    }

    #[test]
    fn test_null_sub_objects_are_absent() {
        let request: ScreeningRequest =
            serde_json::from_str(r#"{"user": null, "steady_shield": null}"#).unwrap();
        assert!(request.user.is_none());
        assert!(request.steady_shield.is_none());
    }

    #[test]
    fn test_sub_objects_must_be_objects() {
        for json in [
            r#"{"user": [15, "Female", "Adult"]}"#,
            r#"{"steady_shield": [1, 2, 3]}"#,
            r#"{"adaptive_pilot": "5"}"#,
            r#"{"flash_reaction": 3}"#,
        ] {
            assert!(serde_json::from_str::<ScreeningRequest>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_user_info_pascal_case_keys() {
        let json = r#"{
            "Age": 14,
            "Gender": "Female",
            "EducationStage": "Teen",
            "Daydream": 1,
            "SleepHours": 6.5,
            "ScreenTime": 5,
            "FamilyHistory": 0
        }"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();

        assert_eq!(user.age, Some(14.0));
        assert_eq!(user.gender.as_deref(), Some("Female"));
        assert_eq!(user.education_stage.as_deref(), Some("Teen"));
        assert_eq!(user.daydream, Some(1.0));
        assert_eq!(user.sleep_hours, Some(6.5));
        assert_eq!(user.screen_time, Some(5.0));
        assert_eq!(user.family_history, Some(0.0));
    }

    #[test]
    fn test_numeric_strings_and_booleans_are_coerced() {
        let json = r#"{"Age": " 12 ", "Daydream": true, "FamilyHistory": false, "SleepHours": ""}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();

        assert_eq!(user.age, Some(12.0));
        assert_eq!(user.daydream, Some(1.0));
        assert_eq!(user.family_history, Some(0.0));
        // Blank strings count as unanswered
        assert_eq!(user.sleep_hours, None);
    }

    #[test]
    fn test_non_numeric_values_are_rejected() {
        assert!(serde_json::from_str::<UserInfo>(r#"{"Age": "twelve"}"#).is_err());
        assert!(serde_json::from_str::<UserInfo>(r#"{"Age": [12]}"#).is_err());
        assert!(serde_json::from_str::<AdaptivePilotAnswers>(r#"{"missed_gates": {}}"#).is_err());
    }

    #[test]
    fn test_category_must_be_string() {
        assert!(serde_json::from_str::<UserInfo>(r#"{"Gender": 1}"#).is_err());
        let user: UserInfo = serde_json::from_str(r#"{"Gender": null}"#).unwrap();
        assert_eq!(user.gender, None);
    }

    #[test]
    fn test_unknown_answer_keys_are_ignored() {
        let answers: FlashReactionAnswers =
            serde_json::from_str(r#"{"false_alarms": 3, "q_bonus": "x"}"#).unwrap();
        assert_eq!(answers.false_alarms, Some(3.0));
        assert_eq!(answers.premature_taps, None);
    }

    #[test]
    fn test_symptom_sum_is_derived() {
        let scores = SubScores {
            inattention: 4.5,
            hyperactivity: 2.0,
            impulsivity: 3.25,
        };
        assert_eq!(scores.symptom_sum(), 4.5 + 3.25 + 2.0);
    }

    #[test]
    fn test_feature_names_match_serialized_keys() {
        let names: Vec<&str> = NumericFeature::ALL.iter().map(|f| f.as_str()).collect();
        for name in names {
            let parsed: NumericFeature = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }
}
