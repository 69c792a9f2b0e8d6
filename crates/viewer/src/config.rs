//! Viewer app configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VIEWER_BASE_URL` - Public URL for the viewer app
//!
//! ## Optional
//! - `VIEWER_HOST` - Bind address (default: 127.0.0.1)
//! - `VIEWER_PORT` - Listen port (default: 3000)
//! - `VIEWER_OFFLINE` - Serve placeholder content only (default: false)
//! - `LIVE_VIDEO_ID` - YouTube id of the channel's live stream (default: `ixQEmhTbvTI`)
//! - `LCA_API_URL` - Backend base URL (default: `http://localhost:8001/api`)
//! - `LCA_API_TIMEOUT_SECS` - Backend request timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};

use lca_tv_client::ClientConfig;
use lca_tv_core::VideoId;
use thiserror::Error;

/// Live stream shown when the backend does not name one.
pub const DEFAULT_LIVE_VIDEO_ID: &str = "ixQEmhTbvTI";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error(transparent)]
    Backend(#[from] lca_tv_client::ConfigError),
}

/// Viewer app configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL for the viewer app
    pub base_url: String,
    /// Never call the backend for content
    pub offline: bool,
    pub live_video_id: VideoId,
    /// Backend REST API
    pub api: ClientConfig,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl ViewerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("VIEWER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VIEWER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VIEWER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VIEWER_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("VIEWER_BASE_URL")?;
        let offline = parse_flag("VIEWER_OFFLINE", &get_env_or_default("VIEWER_OFFLINE", "false"))?;
        let live_video_id = get_optional_env("LIVE_VIDEO_ID")
            .filter(|id| !id.trim().is_empty())
            .map_or_else(|| VideoId::new(DEFAULT_LIVE_VIDEO_ID), VideoId::new);

        let api = ClientConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            offline,
            live_video_id,
            api,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for tests and local tooling: no Sentry, backend at `api`.
    #[must_use]
    pub fn local(api: ClientConfig) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            offline: false,
            live_video_id: VideoId::new(DEFAULT_LIVE_VIDEO_ID),
            api,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Accepts the usual spellings of a boolean switch.
fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("VIEWER_OFFLINE", "true").unwrap());
        assert!(parse_flag("VIEWER_OFFLINE", " ON ").unwrap());
        assert!(!parse_flag("VIEWER_OFFLINE", "0").unwrap());
        assert!(!parse_flag("VIEWER_OFFLINE", "").unwrap());
        assert!(matches!(
            parse_flag("VIEWER_OFFLINE", "peut-être"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_local_config() {
        let config = ViewerConfig::local(ClientConfig::new("http://127.0.0.1:9/api").unwrap());
        assert_eq!(config.socket_addr().port(), 3000);
        assert_eq!(config.live_video_id.as_str(), DEFAULT_LIVE_VIDEO_ID);
        assert!(!config.offline);
        assert!(!config.is_secure());
    }
}
