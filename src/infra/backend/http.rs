//! HTTP adapter for the remote identity and document service.
//!
//! Wire contract:
//! - `POST {base}/auth/sign-in`  {email, password} -> {user_id, token}
//! - `POST {base}/auth/sign-up`  {email, password} -> {user_id, token}
//! - `POST {base}/auth/sign-out` (bearer token)
//! - `GET/PUT {base}/users/{id}` per-user document
//!
//! Error responses carry `{error: {code, message}}`; the codes map onto
//! the application error taxonomy below. Every request is bounded by the
//! configured timeout so a hung call cannot pin the session in its
//! loading state.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use validator::ValidateEmail;

use crate::config::Config;
use crate::domain::{Identity, ProfileDocument, RegistrationRequest};
use crate::errors::{AppError, AppResult};

use super::IdentityBackend;

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SessionBody {
    user_id: String,
    token: String,
}

#[derive(Deserialize)]
struct RemoteError {
    error: RemoteErrorBody,
}

#[derive(Deserialize)]
struct RemoteErrorBody {
    code: String,
    message: String,
}

/// Live backend session: account id, bearer token, and the email the
/// session was established with.
struct RemoteSession {
    user_id: String,
    token: String,
    email: String,
}

/// [`IdentityBackend`] implementation over the remote service.
pub struct HttpIdentityBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    session: RwLock<Option<RemoteSession>>,
    identity_tx: watch::Sender<Option<Identity>>,
}

impl HttpIdentityBackend {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            &config.backend_url,
            config.backend_api_key().map(str::to_string),
            config.request_timeout(),
        )
    }

    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: std::time::Duration,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("HTTP client build failed: {}", e)))?;

        let (identity_tx, _) = watch::channel(None);
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            session: RwLock::new(None),
            identity_tx,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }
        if let Some(token) = self.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn bearer_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    /// Map a non-success response onto the application error taxonomy.
    async fn map_failure(response: reqwest::Response) -> AppError {
        let status = response.status();
        let code = response
            .json::<RemoteError>()
            .await
            .map(|e| e.error)
            .ok();

        match code.as_ref().map(|c| c.code.as_str()) {
            Some("EMAIL_NOT_FOUND") | Some("INVALID_PASSWORD") => AppError::InvalidCredentials,
            Some("INVALID_EMAIL") => AppError::InvalidEmail,
            Some("EMAIL_EXISTS") => AppError::EmailAlreadyRegistered,
            Some("WEAK_PASSWORD") => AppError::WeakPassword,
            _ => AppError::backend(format!(
                "{} {}",
                status,
                code.map(|c| c.message).unwrap_or_default()
            )),
        }
    }

    async fn authenticate(&self, path: &str, email: &str, password: &str) -> AppResult<SessionBody> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(&CredentialsBody { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::map_failure(response).await);
        }
        Ok(response.json::<SessionBody>().await?)
    }

    /// Fetch the per-user document and assemble the published Identity.
    async fn assemble_identity(&self, user_id: &str, email: &str) -> AppResult<Identity> {
        let document = self.get_document(user_id).await?.unwrap_or_default();
        Ok(Identity::from_document(user_id.to_string(), email, document))
    }

    fn publish(&self, identity: Option<Identity>) {
        self.identity_tx.send_replace(identity);
    }
}

#[async_trait]
impl IdentityBackend for HttpIdentityBackend {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<String> {
        if !email.validate_email() {
            return Err(AppError::InvalidEmail);
        }

        let session = self.authenticate("/auth/sign-in", email, password).await?;
        let user_id = session.user_id.clone();
        *self.session.write() = Some(RemoteSession {
            user_id: session.user_id,
            token: session.token,
            email: email.to_string(),
        });

        let identity = self.assemble_identity(&user_id, email).await?;
        self.publish(Some(identity));
        Ok(user_id)
    }

    async fn sign_up(&self, request: &RegistrationRequest) -> AppResult<String> {
        if !request.email.validate_email() {
            return Err(AppError::InvalidEmail);
        }

        let session = self
            .authenticate("/auth/sign-up", &request.email, &request.password)
            .await?;
        let user_id = session.user_id.clone();
        *self.session.write() = Some(RemoteSession {
            user_id: session.user_id,
            token: session.token,
            email: request.email.clone(),
        });

        // The credential exists server-side; the profile document is
        // written as a second step of the same sign-up.
        self.put_document(&user_id, &request.document(Utc::now()))
            .await?;

        let identity = self.assemble_identity(&user_id, &request.email).await?;
        self.publish(Some(identity));
        Ok(user_id)
    }

    async fn sign_out(&self) -> AppResult<()> {
        if let Some(session) = self.session.read().as_ref() {
            tracing::debug!(
                user_id = %session.user_id,
                email = %session.email,
                "signing out backend session"
            );
        }

        let result = self
            .request(reqwest::Method::POST, "/auth/sign-out")
            .send()
            .await;

        // The local session is gone no matter what the wire said.
        *self.session.write() = None;
        self.publish(None);

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(Self::map_failure(response).await),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_document(&self, user_id: &str) -> AppResult<Option<ProfileDocument>> {
        let response = self
            .request(reqwest::Method::GET, &format!("/users/{}", user_id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                Ok(Some(response.json::<ProfileDocument>().await?))
            }
            _ => Err(Self::map_failure(response).await),
        }
    }

    async fn put_document(&self, user_id: &str, document: &ProfileDocument) -> AppResult<()> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/users/{}", user_id))
            .json(document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::map_failure(response).await);
        }
        Ok(())
    }

    fn watch_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.identity_tx.subscribe()
    }
}
