//! HTTP Routes
//!
//! Axum router configuration for the screening server.

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::model::ModelInfo;
use crate::pipeline::ScreeningPipeline;

/// Application state shared across handlers
pub struct AppState {
    pub pipeline: ScreeningPipeline,
    pub model_name: String,
    pub model_version: String,
}

impl AppState {
    /// State for a pipeline whose model carries no metadata
    pub fn new(pipeline: ScreeningPipeline) -> Self {
        Self {
            pipeline,
            model_name: "custom".to_string(),
            model_version: "unknown".to_string(),
        }
    }

    pub fn with_model_info(pipeline: ScreeningPipeline, info: &ModelInfo) -> Self {
        Self {
            pipeline,
            model_name: info.name.clone(),
            model_version: info.version.clone(),
        }
    }
}

/// Create the application router
///
/// # Routes
///
/// - `POST /predict` - Screen a set of answers
/// - `GET /health` - Health check with model identity
/// - `GET /` - Frontend entry page (`index.html`)
/// - `GET /<path>` - Any file under the frontend directory
///
pub fn create_router(state: Arc<AppState>, frontend_dir: impl AsRef<Path>) -> Router {
    // CORS configuration for browser clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ServeDir refuses `..` components, so reads stay inside the frontend tree
    let frontend = ServeDir::new(frontend_dir.as_ref());

    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .fallback_service(frontend)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Label, LogisticModel, PredictError, Prediction, Predictor};
    use crate::report::RESULT_TEXT_UNLIKELY;
    use crate::types::FeatureRecord;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict(&self, _features: &FeatureRecord) -> Result<Prediction, PredictError> {
            Err(PredictError::Backend("boom".to_string()))
        }
    }

    /// Frontend tree inside an outer directory holding a file that must stay private
    fn frontend_fixture() -> (TempDir, std::path::PathBuf) {
        let outer = tempfile::tempdir().unwrap();
        let frontend = outer.path().join("frontend");
        fs::create_dir_all(frontend.join("static")).unwrap();
        fs::write(frontend.join("index.html"), "<h1>Screening</h1>").unwrap();
        fs::write(frontend.join("about.html"), "<p>About</p>").unwrap();
        fs::write(frontend.join("static/app.js"), "console.log('ok');").unwrap();
        fs::write(outer.path().join("secret.txt"), "private").unwrap();
        (outer, frontend)
    }

    fn builtin_router(frontend: &Path) -> Router {
        let model = LogisticModel::builtin().unwrap();
        let info = model.info();
        let pipeline = ScreeningPipeline::new(Arc::new(model));
        create_router(Arc::new(AppState::with_model_info(pipeline, &info)), frontend)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn post_predict(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_predict_empty_object() {
        let (_guard, frontend) = frontend_fixture();
        let (status, body) = send(builtin_router(&frontend), post_predict("{}")).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            json["scores"],
            serde_json::json!({"inattention": 0.0, "hyperactivity": 0.0, "impulsivity": 0.0})
        );
        assert_eq!(json["symptom_sum"], 0.0);
        assert_eq!(json["label"], 0);
        assert_eq!(json["result_text"], RESULT_TEXT_UNLIKELY);
        assert!(json["disclaimer"].as_str().unwrap().contains("NOT a clinical diagnosis"));

        let probability = json["probability"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&probability));
        assert_eq!((probability * 10.0).round() / 10.0, probability);
    }

    #[tokio::test]
    async fn test_predict_symptom_sum_matches_scores() {
        let (_guard, frontend) = frontend_fixture();
        let body = r#"{
            "user": {"Age": 12, "Gender": "Female"},
            "adaptive_pilot": {"missed_gates": 3, "late_responses": 1},
            "flash_reaction": {"false_alarms": 2, "mean_reaction_ms": 230},
            "steady_shield": {"shield_wobbles": 5, "movement_variance": 75}
        }"#;
        let (status, bytes) = send(builtin_router(&frontend), post_predict(body)).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        let scores = &json["scores"];
        let total = scores["inattention"].as_f64().unwrap()
            + scores["impulsivity"].as_f64().unwrap()
            + scores["hyperactivity"].as_f64().unwrap();

        assert_eq!(json["symptom_sum"].as_f64().unwrap(), total);
        let label = json["label"].as_u64().unwrap();
        assert!(label == 0 || label == 1);
    }

    #[tokio::test]
    async fn test_predict_ignores_content_type() {
        let (_guard, frontend) = frontend_fixture();
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("{}"))
            .unwrap();
        let (status, _) = send(builtin_router(&frontend), request).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_predict_invalid_json_is_bad_request() {
        let (_guard, frontend) = frontend_fixture();
        let (status, body) = send(builtin_router(&frontend), post_predict("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_json");
    }

    #[tokio::test]
    async fn test_predict_wrong_shape_is_unprocessable() {
        let (_guard, frontend) = frontend_fixture();

        for payload in [
            r#"{"steady_shield": [1, 2, 3]}"#,
            r#"{"user": [15, "Female", "Adult"]}"#,
            r#"[1, 2]"#,
        ] {
            let (status, body) = send(builtin_router(&frontend), post_predict(payload)).await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"], "invalid_request");
        }
    }

    #[tokio::test]
    async fn test_predict_huge_answers_still_succeed() {
        let (_guard, frontend) = frontend_fixture();
        let (status, body) = send(
            builtin_router(&frontend),
            post_predict(r#"{"adaptive_pilot": {"missed_gates": 1e308, "instructions_repeated": 1e308}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["label"], 1);
    }

    #[tokio::test]
    async fn test_predictor_failure_is_structured_server_error() {
        let (_guard, frontend) = frontend_fixture();
        let pipeline = ScreeningPipeline::new(Arc::new(FailingPredictor));
        let router = create_router(Arc::new(AppState::new(pipeline)), &frontend);

        let (status, body) = send(router, post_predict("{}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "prediction_failed");
        assert!(json["message"].as_str().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let (_guard, frontend) = frontend_fixture();
        let (status, body) = send(builtin_router(&frontend), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "adhd-screen-logreg");
        assert_eq!(json["version"], "1.0.0");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let (_guard, frontend) = frontend_fixture();
        let (status, body) = send(builtin_router(&frontend), get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>Screening</h1>");
    }

    #[tokio::test]
    async fn test_serves_frontend_files_by_path() {
        let (_guard, frontend) = frontend_fixture();

        let (status, body) = send(builtin_router(&frontend), get("/about.html")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<p>About</p>");

        let (status, body) = send(builtin_router(&frontend), get("/static/app.js")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"console.log('ok');");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_guard, frontend) = frontend_fixture();
        let (status, _) = send(builtin_router(&frontend), get("/missing-file.html")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parent_directory_is_not_served() {
        let (_guard, frontend) = frontend_fixture();
        let (status, body) = send(builtin_router(&frontend), get("/..%2Fsecret.txt")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_ne!(body, b"private");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let (_guard, frontend) = frontend_fixture();
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = builtin_router(&frontend).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_label_and_text_agree() {
        let (_guard, frontend) = frontend_fixture();
        let model = LogisticModel::builtin().unwrap();
        let pipeline = ScreeningPipeline::new(Arc::new(model));
        let router = create_router(Arc::new(AppState::new(pipeline)), &frontend);

        let body = r#"{
            "user": {"Age": 15, "Daydream": 1, "SleepHours": 5, "ScreenTime": 8, "FamilyHistory": 1},
            "adaptive_pilot": {"missed_gates": 10, "late_responses": 6, "off_course_seconds": 20},
            "flash_reaction": {"false_alarms": 8, "premature_taps": 4, "multi_taps": 2},
            "steady_shield": {"touch_releases": 8, "shield_wobbles": 6, "fidget_taps": 2}
        }"#;
        let (status, bytes) = send(router, post_predict(body)).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["label"], Label::Likely.as_u8());
        assert_eq!(
            json["result_text"],
            "ADHD Likely (High correlation with behavioral patterns)"
        );
    }
}
