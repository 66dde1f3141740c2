//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_VERIFICATION_URL,
};

/// Which identity backend implementation to wire up.
///
/// The in-memory backend is the test/demo fake; the HTTP backend talks to
/// the real identity and document service. Both sit behind the same trait,
/// so the rest of the application never branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Memory,
    Http,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub backend_mode: BackendMode,
    pub backend_url: String,
    backend_api_key: Option<String>,
    pub verification_url: String,
    pub request_timeout_secs: u64,
    /// When true, verification failures produce a tagged simulated outcome
    /// instead of an error.
    pub simulate_on_failure: bool,
    pub session_cache_path: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("backend_mode", &self.backend_mode)
            .field("backend_url", &self.backend_url)
            .field("backend_api_key", &"[REDACTED]")
            .field("verification_url", &self.verification_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("simulate_on_failure", &self.simulate_on_failure)
            .field("session_cache_path", &self.session_cache_path)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let backend_mode = match env::var("BACKEND_MODE").as_deref() {
            Ok("http") => BackendMode::Http,
            Ok("memory") | Err(_) => BackendMode::Memory,
            Ok(other) => {
                tracing::warn!("Unknown BACKEND_MODE '{}', using memory backend", other);
                BackendMode::Memory
            }
        };

        let simulate_on_failure = match env::var("FACE_FALLBACK").as_deref() {
            Ok("strict") => false,
            Ok("simulate") | Err(_) => true,
            Ok(other) => {
                tracing::warn!("Unknown FACE_FALLBACK '{}', using simulate", other);
                true
            }
        };

        Self {
            backend_mode,
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            backend_api_key: env::var("BACKEND_API_KEY").ok(),
            verification_url: env::var("VERIFICATION_URL")
                .unwrap_or_else(|_| DEFAULT_VERIFICATION_URL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            simulate_on_failure,
            session_cache_path: env::var("SESSION_CACHE_PATH").ok().map(PathBuf::from),
        }
    }

    /// Timeout applied to every outbound HTTP request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// API key for the identity backend, if configured.
    pub fn backend_api_key(&self) -> Option<&str> {
        self.backend_api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            backend_mode: BackendMode::Http,
            backend_url: "http://localhost:8080".to_string(),
            backend_api_key: Some("super-secret".to_string()),
            verification_url: "http://localhost:9090".to_string(),
            request_timeout_secs: 10,
            simulate_on_failure: true,
            session_cache_path: None,
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
