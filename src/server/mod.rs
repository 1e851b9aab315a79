//! Screening HTTP Server
//!
//! Exposes the screening pipeline over HTTP and serves the frontend.
//!
//! # Components
//!
//! - **Config** (`config`): bind address, frontend directory, model artifact
//! - **Routes** (`routes`): axum router and shared application state
//! - **Handlers** (`handlers`): `/predict` and `/health`, error responses
//!
//! # Example
//!
//! ```ignore
//! use adhd_screen::model::LogisticModel;
//! use adhd_screen::pipeline::ScreeningPipeline;
//! use adhd_screen::server::{run, AppState, ServerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), adhd_screen::ScreeningError> {
//!     let config = ServerConfig::from_env()?;
//!     let model = LogisticModel::builtin()?;
//!     let info = model.info();
//!     let pipeline = ScreeningPipeline::new(Arc::new(model));
//!     run(&config, Arc::new(AppState::with_model_info(pipeline, &info))).await
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod routes;

pub use config::{ServerConfig, DEFAULT_PORT};
pub use handlers::{ErrorResponse, HealthResponse};
pub use routes::{create_router, AppState};

use std::sync::Arc;

use crate::error::ScreeningError;

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn run(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ScreeningError> {
    let app = create_router(state, &config.frontend_dir);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!(
        addr = %bind_addr,
        frontend = %config.frontend_dir.display(),
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        },
    }
}
