//! Server configuration

use std::path::PathBuf;

use crate::error::ScreeningError;

/// Default listening port, overridden by `PORT`
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Directory whose files are served at `/` and `/<path>`
    pub frontend_dir: PathBuf,
    /// Model artifact to load; the built-in model when `None`
    pub model_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            frontend_dir: PathBuf::from("frontend"),
            model_path: None,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `PORT` and `FRONTEND_DIR`
    pub fn from_env() -> Result<Self, ScreeningError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScreeningError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| {
                ScreeningError::Config(format!("PORT must be a port number, got {port:?}"))
            })?;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            config.frontend_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
