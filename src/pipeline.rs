//! Screening pipeline orchestration
//!
//! This module provides the public API for screening a request. It runs the
//! fixed sequence parse → score → assemble features → predict → report, with
//! the calculators and the predictor injected at construction time.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::ScreeningError;
use crate::features::FeatureAssembler;
use crate::model::{Prediction, Predictor};
use crate::report::ScreeningReport;
use crate::scoring::ScoringSuite;
use crate::types::{FeatureRecord, ScreeningRequest, SubScores, UserInfo};

/// Intermediate results of one screening, before report encoding
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub scores: SubScores,
    pub features: FeatureRecord,
    pub prediction: Prediction,
}

/// Stateless screening pipeline shared by every request
#[derive(Clone)]
pub struct ScreeningPipeline {
    scoring: ScoringSuite,
    predictor: Arc<dyn Predictor>,
}

impl ScreeningPipeline {
    /// Create a pipeline with the default scoring rubrics
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self::with_scoring(ScoringSuite::default(), predictor)
    }

    /// Create a pipeline with custom calculators
    pub fn with_scoring(scoring: ScoringSuite, predictor: Arc<dyn Predictor>) -> Self {
        Self { scoring, predictor }
    }

    pub fn scoring(&self) -> &ScoringSuite {
        &self.scoring
    }

    /// Score, assemble and predict without encoding the report
    pub fn assess(&self, request: &ScreeningRequest) -> Result<Assessment, ScreeningError> {
        // Stage 1: Sub-scores
        let scores = self.scoring.score_all(request);

        // Stage 2: Feature record
        let features = match &request.user {
            Some(user) => FeatureAssembler::assemble(user, &scores),
            None => FeatureAssembler::assemble(&UserInfo::default(), &scores),
        };

        // Stage 3: Prediction
        let prediction = self.predictor.predict(&features)?.validated()?;

        tracing::debug!(
            inattention = scores.inattention,
            impulsivity = scores.impulsivity,
            hyperactivity = scores.hyperactivity,
            probability = prediction.probability,
            label = prediction.label.as_u8(),
            "screening assessed"
        );

        Ok(Assessment {
            scores,
            features,
            prediction,
        })
    }

    /// Screen a parsed request
    pub fn screen(&self, request: &ScreeningRequest) -> Result<ScreeningReport, ScreeningError> {
        let assessment = self.assess(request)?;
        Ok(ScreeningReport::new(assessment.scores, assessment.prediction))
    }

    /// Screen a raw JSON body
    pub fn screen_json(&self, body: &[u8]) -> Result<ScreeningReport, ScreeningError> {
        let request = parse_request(body)?;
        self.screen(&request)
    }
}

/// Parse a raw request body.
///
/// Syntax errors are [`ScreeningError::InvalidJson`]; well-formed JSON of the
/// wrong shape is [`ScreeningError::InvalidRequest`].
pub fn parse_request(body: &[u8]) -> Result<ScreeningRequest, ScreeningError> {
    let value: Value = serde_json::from_slice(body).map_err(ScreeningError::InvalidJson)?;

    if !value.is_object() {
        return Err(ScreeningError::InvalidRequest(
            "request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ScreeningError::InvalidRequest(e.to_string()))
}
