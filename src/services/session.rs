//! Session store - the observable holder of the current identity.
//!
//! SOLID (SRP): Translates backend identity events and explicit
//! login/register/logout calls into the canonical session shape.
//!
//! One instance is created at the application root and injected wherever
//! session state is read; observers subscribe to a watch channel, so each
//! published value is fully visible before the next one lands. Login and
//! register resolve with the Identity fetched in the same call; the
//! backend's change stream is a secondary consistency signal that also
//! covers backend-driven sign-outs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{Identity, RegistrationRequest};
use crate::errors::{AppError, AppResult};
use crate::infra::{IdentityBackend, SessionCache};

/// Session value published to observers.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub identity: Option<Identity>,
    /// True only while a credential operation or the initial restore is
    /// in flight.
    pub loading: bool,
}

/// Derived lifecycle state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Restoring,
    Anonymous,
    Authenticated,
}

impl Session {
    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Restoring
        } else if self.identity.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }
}

/// Session store trait for dependency injection.
///
/// SOLID (ISP): Subscribe plus the three mutating operations, nothing else.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Authenticate and resolve with the signed-in identity
    async fn login(&self, email: &str, password: &str) -> AppResult<Identity>;

    /// Create an account and resolve with the new identity
    async fn register(&self, request: RegistrationRequest) -> AppResult<Identity>;

    /// Return the session to anonymous; the backend sign-out result is
    /// reported but the local transition never depends on it
    async fn logout(&self) -> AppResult<()>;

    /// Observe session values as they are published
    fn subscribe(&self) -> watch::Receiver<Session>;

    /// Snapshot of the current session value
    fn current(&self) -> Session;
}

/// Concrete session store over an [`IdentityBackend`].
pub struct SessionService {
    backend: Arc<dyn IdentityBackend>,
    cache: Arc<SessionCache>,
    tx: Arc<watch::Sender<Session>>,
    in_flight: Arc<AtomicBool>,
    forwarder: Mutex<Option<JoinHandle<()>>>,
}

impl SessionService {
    /// Build the store and start forwarding backend identity events.
    ///
    /// The locally cached identity is restored optimistically (published
    /// with `loading = true`); the backend's first event is authoritative
    /// and either confirms it or clears it.
    pub fn start(backend: Arc<dyn IdentityBackend>, cache: Arc<SessionCache>) -> Self {
        let restored = match cache.load() {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!("Session restore failed: {}", e);
                None
            }
        };

        let (tx, _) = watch::channel(Session {
            identity: restored,
            loading: true,
        });
        let tx = Arc::new(tx);
        let in_flight = Arc::new(AtomicBool::new(false));

        let mut events = backend.watch_identity();
        let fw_tx = tx.clone();
        let fw_cache = cache.clone();
        let fw_flight = in_flight.clone();
        let forwarder = tokio::spawn(async move {
            loop {
                let identity = events.borrow_and_update().clone();
                if identity.is_none() {
                    // Backend-driven sign-out or a restore the backend did
                    // not confirm: the cached record is stale.
                    if let Err(e) = fw_cache.clear() {
                        tracing::warn!("Session cache clear failed: {}", e);
                    }
                }
                fw_tx.send_modify(|session| {
                    session.identity = identity;
                    if !fw_flight.load(Ordering::SeqCst) {
                        session.loading = false;
                    }
                });
                if events.changed().await.is_err() {
                    break;
                }
            }
        });

        Self {
            backend,
            cache,
            tx,
            in_flight,
            forwarder: Mutex::new(Some(forwarder)),
        }
    }

    /// Stop forwarding backend events. Called once at application
    /// shutdown so a torn-down consumer is never notified.
    pub fn shutdown(&self) {
        if let Some(handle) = self.forwarder.lock().take() {
            handle.abort();
        }
    }

    fn begin_operation(&self) -> AppResult<OperationGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::SessionBusy);
        }
        self.tx.send_modify(|session| session.loading = true);
        Ok(OperationGuard { store: self })
    }

    async fn resolve_identity(&self, user_id: String, email: &str) -> AppResult<Identity> {
        let document = self.backend.get_document(&user_id).await?.unwrap_or_default();
        Ok(Identity::from_document(user_id, email, document))
    }

    fn publish_identity(&self, identity: &Identity) {
        if let Err(e) = self.cache.store(identity) {
            tracing::warn!("Session cache write failed: {}", e);
        }
        let published = identity.clone();
        self.tx.send_modify(|session| {
            session.identity = Some(published);
            session.loading = false;
        });
    }
}

/// Resets the in-flight flag and the loading bit on every exit path of a
/// credential operation.
struct OperationGuard<'a> {
    store: &'a SessionService,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.store.in_flight.store(false, Ordering::SeqCst);
        self.store.tx.send_if_modified(|session| {
            if session.loading {
                session.loading = false;
                true
            } else {
                false
            }
        });
    }
}

#[async_trait]
impl SessionStore for SessionService {
    async fn login(&self, email: &str, password: &str) -> AppResult<Identity> {
        let _operation = self.begin_operation()?;

        let user_id = self.backend.sign_in(email, password).await?;
        let identity = self.resolve_identity(user_id, email).await?;
        self.publish_identity(&identity);

        tracing::info!(user_id = %identity.id, role = %identity.role, "signed in");
        Ok(identity)
    }

    async fn register(&self, request: RegistrationRequest) -> AppResult<Identity> {
        let request = request.validated()?;
        let _operation = self.begin_operation()?;

        let user_id = self.backend.sign_up(&request).await?;
        let identity = self.resolve_identity(user_id, &request.email).await?;
        self.publish_identity(&identity);

        tracing::info!(user_id = %identity.id, role = %identity.role, "registered");
        Ok(identity)
    }

    async fn logout(&self) -> AppResult<()> {
        // Anonymous first: the user-visible transition is not allowed to
        // fail, whatever the backend says afterwards.
        if let Err(e) = self.cache.clear() {
            tracing::warn!("Session cache clear failed: {}", e);
        }
        self.tx.send_modify(|session| {
            session.identity = None;
            session.loading = false;
        });

        match self.backend.sign_out().await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!("Backend sign-out failed, session already anonymous: {}", e);
                Err(e)
            }
        }
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    fn current(&self) -> Session {
        self.tx.borrow().clone()
    }
}

impl Drop for SessionService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProfileDocument, Role};
    use crate::infra::MockIdentityBackend;

    fn document() -> ProfileDocument {
        ProfileDocument {
            name: "Alice Johnson".to_string(),
            role: Role::Student,
            student_id: Some("CS2024001".to_string()),
            ..ProfileDocument::default()
        }
    }

    fn cache(dir: &tempfile::TempDir) -> Arc<SessionCache> {
        Arc::new(SessionCache::at(dir.path().join("session.json")))
    }

    #[test]
    fn test_session_state_derivation() {
        let restoring = Session {
            identity: None,
            loading: true,
        };
        assert_eq!(restoring.state(), SessionState::Restoring);

        let anonymous = Session::default();
        assert_eq!(anonymous.state(), SessionState::Anonymous);

        let authenticated = Session {
            identity: Some(Identity::from_document(
                "u1".to_string(),
                "a@example.com",
                document(),
            )),
            loading: false,
        };
        assert!(authenticated.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_goes_anonymous_even_when_backend_fails() {
        let (backend_tx, backend_rx) = watch::channel(None);
        let backend_tx = Arc::new(backend_tx);

        let mut backend = MockIdentityBackend::new();
        backend
            .expect_watch_identity()
            .return_once(move || backend_rx);
        let sign_in_tx = backend_tx.clone();
        backend.expect_sign_in().returning(move |email, _| {
            sign_in_tx.send_replace(Some(Identity::from_document(
                "u1".to_string(),
                email,
                document(),
            )));
            Ok("u1".to_string())
        });
        backend
            .expect_get_document()
            .returning(|_| Ok(Some(document())));
        let sign_out_tx = backend_tx.clone();
        backend.expect_sign_out().returning(move || {
            sign_out_tx.send_replace(None);
            Err(AppError::backend("identity service offline"))
        });

        let dir = tempfile::tempdir().unwrap();
        let service = SessionService::start(Arc::new(backend), cache(&dir));

        service.login("a@example.com", "correctpass").await.unwrap();
        assert!(service.current().is_authenticated());

        let result = service.logout().await;
        assert!(result.is_err());
        assert_eq!(service.current().state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_failed_login_resets_loading_and_keeps_state() {
        let (backend_tx, backend_rx) = watch::channel(None);

        let mut backend = MockIdentityBackend::new();
        backend
            .expect_watch_identity()
            .return_once(move || backend_rx);
        backend
            .expect_sign_in()
            .returning(|_, _| Err(AppError::InvalidCredentials));

        let dir = tempfile::tempdir().unwrap();
        let service = SessionService::start(Arc::new(backend), cache(&dir));

        let result = service.login("a@example.com", "wrongpass").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));

        let session = service.current();
        assert!(!session.loading);
        assert!(session.identity.is_none());

        drop(backend_tx);
    }
}
