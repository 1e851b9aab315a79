//! ADHD Screen - Behavioral-task screening service
//!
//! Turns answers from three behavioral mini-tasks into a screening result
//! through a deterministic pipeline: instrument sub-scores → feature assembly
//! → model inference → report encoding.
//!
//! ## Modules
//!
//! - **Scoring**: inattention, impulsivity and hyperactivity calculators
//! - **Model**: the `Predictor` trait and the logistic-regression backend
//! - **Server**: axum HTTP service around the pipeline
//!
//! This is a screening aid, not a diagnostic tool.

pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod server;
pub mod types;

pub use error::ScreeningError;
pub use features::FeatureAssembler;
pub use model::{Label, LogisticModel, Prediction, Predictor};
pub use pipeline::{parse_request, ScreeningPipeline};
pub use report::ScreeningReport;
pub use scoring::ScoringSuite;
pub use types::{FeatureRecord, ScreeningRequest, SubScores, UserInfo};

/// Service version reported by the CLI
pub const SCREEN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name used in logs and CLI output
pub const SERVICE_NAME: &str = "adhd-screen";
