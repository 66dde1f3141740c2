//! HTTP client for the remote face verification endpoint.
//!
//! `POST {base}/verify` {image, user_id} -> {verified: bool}
//! `POST {base}/enroll` {image, user_id} -> status only
//!
//! The calling flow must never block on a broken verification service,
//! so failures are absorbed according to the configured fallback policy:
//! either a tagged simulated outcome (demo mode) or an explicit
//! `VerificationUnavailable` error (strict mode). Simulated outcomes are
//! logged at warn so telemetry can tell them apart from confirmed ones.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Config, SIMULATED_SUCCESS_RATE};
use crate::errors::{AppError, AppResult};
use crate::services::{EnrollmentOutcome, VerificationOutcome, VerificationService};

/// What to do when the endpoint cannot produce a verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackPolicy {
    /// Draw a placeholder verdict with the given success probability.
    Simulate { success_rate: f64 },
    /// Surface the failure to the caller.
    Propagate,
}

impl FallbackPolicy {
    fn from_config(config: &Config) -> Self {
        if config.simulate_on_failure {
            FallbackPolicy::Simulate {
                success_rate: SIMULATED_SUCCESS_RATE,
            }
        } else {
            FallbackPolicy::Propagate
        }
    }
}

#[derive(Serialize)]
struct VerificationBody<'a> {
    image: &'a str,
    user_id: &'a str,
}

#[derive(Deserialize)]
struct VerificationVerdict {
    verified: bool,
}

/// [`VerificationService`] implementation over the remote endpoint.
pub struct FaceVerifier {
    http: reqwest::Client,
    base_url: String,
    policy: FallbackPolicy,
}

impl FaceVerifier {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            &config.verification_url,
            config.request_timeout(),
            FallbackPolicy::from_config(config),
        )
    }

    pub fn new(
        base_url: &str,
        timeout: std::time::Duration,
        policy: FallbackPolicy,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        })
    }

    async fn post(&self, path: &str, image: &str, user_id: &str) -> AppResult<reqwest::Response> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&VerificationBody { image, user_id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::backend(format!(
                "verification endpoint returned {}",
                response.status()
            )));
        }
        Ok(response)
    }

    fn simulated_verdict(&self, operation: &str, error: &AppError) -> Option<bool> {
        match self.policy {
            FallbackPolicy::Simulate { success_rate } => {
                let verdict = rand::rng().random_bool(success_rate);
                tracing::warn!(
                    operation,
                    %error,
                    verdict,
                    "Face {} unavailable, returning simulated outcome",
                    operation
                );
                Some(verdict)
            }
            FallbackPolicy::Propagate => None,
        }
    }
}

#[async_trait]
impl VerificationService for FaceVerifier {
    async fn verify(&self, image: &str, user_id: &str) -> AppResult<VerificationOutcome> {
        let verdict = match self.post("/verify", image, user_id).await {
            Ok(response) => response
                .json::<VerificationVerdict>()
                .await
                .map(|v| v.verified)
                .map_err(AppError::from),
            Err(e) => Err(e),
        };

        match verdict {
            Ok(verified) => Ok(VerificationOutcome::Confirmed(verified)),
            Err(e) => match self.simulated_verdict("verification", &e) {
                Some(verdict) => Ok(VerificationOutcome::Simulated(verdict)),
                None => Err(AppError::VerificationUnavailable),
            },
        }
    }

    async fn enroll(&self, image: &str, user_id: &str) -> AppResult<EnrollmentOutcome> {
        match self.post("/enroll", image, user_id).await {
            Ok(_) => Ok(EnrollmentOutcome::Accepted),
            Err(e) => match self.simulated_verdict("enrollment", &e) {
                Some(_) => Ok(EnrollmentOutcome::Simulated),
                None => Err(AppError::VerificationUnavailable),
            },
        }
    }
}
