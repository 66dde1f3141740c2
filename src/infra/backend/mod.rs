//! Identity backend boundary.
//!
//! One capability trait covering credential operations and the per-user
//! document store, with two implementations selected by configuration:
//! an in-memory fake for tests and demos, and the HTTP adapter for the
//! real identity service. Nothing above this module branches on which
//! one is active.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{Identity, ProfileDocument, RegistrationRequest};
use crate::errors::AppResult;

pub mod http;
pub mod memory;

pub use http::HttpIdentityBackend;
pub use memory::MemoryIdentityBackend;

/// Capability set of the external identity and document service.
///
/// SOLID (ISP): Contains only the operations the session store needs.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Authenticate with an email/password pair.
    ///
    /// Yields the backend's opaque account identifier on success. The
    /// backend records an updated last-login timestamp as a side effect.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<String>;

    /// Create a new credential and its per-user document.
    async fn sign_up(&self, request: &RegistrationRequest) -> AppResult<String>;

    /// Invalidate the current backend session.
    ///
    /// The result is explicit so callers can log failures, but the local
    /// transition to anonymous never depends on it succeeding.
    async fn sign_out(&self) -> AppResult<()>;

    /// Fetch the per-user document, `None` when no document exists.
    async fn get_document(&self, user_id: &str) -> AppResult<Option<ProfileDocument>>;

    /// Replace the per-user document.
    async fn put_document(&self, user_id: &str, document: &ProfileDocument) -> AppResult<()>;

    /// Observe authentication state transitions.
    ///
    /// Every transition publishes either a populated [`Identity`]
    /// (assembled from the per-user document) or `None`. Dropping the
    /// receiver unsubscribes.
    fn watch_identity(&self) -> watch::Receiver<Option<Identity>>;
}
