//! Integration tests for the session store.
//!
//! These drive the full login/register/logout lifecycle against the
//! in-memory identity backend, plus hand-written backends for the
//! failure and concurrency cases.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Notify};

use classtrack::domain::{Identity, ProfileDocument, RegistrationRequest, Role};
use classtrack::errors::{AppError, AppResult};
use classtrack::infra::{IdentityBackend, MemoryIdentityBackend, SessionCache};
use classtrack::services::{Session, SessionService, SessionState, SessionStore};

// =============================================================================
// Fixtures
// =============================================================================

fn student_request() -> RegistrationRequest {
    RegistrationRequest {
        email: "student1@example.com".to_string(),
        password: "correctpass".to_string(),
        name: "Demo Student".to_string(),
        role: Role::Student,
        department: Some("Computer Science".to_string()),
        student_id: Some("CS2024001".to_string()),
        faculty_id: None,
        phone: None,
        profile_image: None,
    }
}

fn faculty_request() -> RegistrationRequest {
    RegistrationRequest {
        email: "faculty1@example.com".to_string(),
        password: "correctpass".to_string(),
        name: "Demo Faculty".to_string(),
        role: Role::Faculty,
        department: Some("Computer Science".to_string()),
        student_id: None,
        faculty_id: Some("FAC001".to_string()),
        phone: Some("+1234567890".to_string()),
        profile_image: None,
    }
}

struct Fixture {
    service: Arc<SessionService>,
    backend: Arc<MemoryIdentityBackend>,
    cache_path: std::path::PathBuf,
    _dir: tempfile::TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("session.json");
    let backend = Arc::new(MemoryIdentityBackend::new());
    let service = Arc::new(SessionService::start(
        backend.clone(),
        Arc::new(SessionCache::at(cache_path.clone())),
    ));
    Fixture {
        service,
        backend,
        cache_path,
        _dir: dir,
    }
}

/// Wait until the store publishes a non-loading session.
async fn settled(service: &SessionService) -> Session {
    let mut rx = service.subscribe();
    loop {
        let session = rx.borrow_and_update().clone();
        if !session.loading {
            return session;
        }
        rx.changed().await.expect("session store alive");
    }
}

/// Wait until the published identity matches the predicate.
async fn published_identity<F>(service: &SessionService, predicate: F) -> Session
where
    F: Fn(&Option<Identity>) -> bool,
{
    let mut rx = service.subscribe();
    loop {
        let session = rx.borrow_and_update().clone();
        if predicate(&session.identity) {
            return session;
        }
        rx.changed().await.expect("session store alive");
    }
}

// =============================================================================
// Credential flows
// =============================================================================

#[tokio::test]
async fn register_yields_authenticated_session_with_request_role() {
    let fx = fixture();

    let identity = fx.service.register(faculty_request()).await.unwrap();
    assert_eq!(identity.role, Role::Faculty);

    let session = settled(&fx.service).await;
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.identity.unwrap().role, Role::Faculty);
}

#[tokio::test]
async fn register_round_trips_optional_fields_exactly() {
    let fx = fixture();

    let identity = fx.service.register(faculty_request()).await.unwrap();

    assert_eq!(identity.department.as_deref(), Some("Computer Science"));
    assert_eq!(identity.faculty_id.as_deref(), Some("FAC001"));
    assert_eq!(identity.phone.as_deref(), Some("+1234567890"));
    // Fields never supplied stay absent, not empty
    assert_eq!(identity.student_id, None);
    assert_eq!(identity.profile_image, None);
    assert!(identity.last_login.is_some());
}

#[tokio::test]
async fn register_rejects_invalid_requests_before_the_backend() {
    let fx = fixture();

    let mut bad_email = student_request();
    bad_email.email = "not-an-email".to_string();
    assert!(matches!(
        fx.service.register(bad_email).await,
        Err(AppError::Validation(_))
    ));

    let session = settled(&fx.service).await;
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn seeded_student_login_scenario() {
    let fx = fixture();
    fx.backend.seed(&student_request()).unwrap();

    let identity = fx
        .service
        .login("student1@example.com", "correctpass")
        .await
        .unwrap();

    assert_eq!(identity.role, Role::Student);
    assert_eq!(identity.student_id.as_deref(), Some("CS2024001"));

    let session = settled(&fx.service).await;
    assert_eq!(session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn wrong_password_fails_and_leaves_session_unchanged() {
    let fx = fixture();
    fx.backend.seed(&student_request()).unwrap();
    fx.backend.seed(&faculty_request()).unwrap();

    // Anonymous before: stays anonymous
    let result = fx.service.login("student1@example.com", "wrong").await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
    let session = settled(&fx.service).await;
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(!session.loading);

    // Authenticated before: the prior identity survives a failed attempt
    fx.service
        .login("faculty1@example.com", "correctpass")
        .await
        .unwrap();
    let result = fx.service.login("student1@example.com", "wrong").await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));

    let session = settled(&fx.service).await;
    assert_eq!(
        session.identity.unwrap().email,
        "faculty1@example.com"
    );
}

#[tokio::test]
async fn unknown_account_reports_invalid_credentials() {
    let fx = fixture();

    let result = fx.service.login("nobody@example.com", "correctpass").await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

// =============================================================================
// Logout and backend-driven transitions
// =============================================================================

#[tokio::test]
async fn logout_returns_session_to_anonymous() {
    let fx = fixture();
    fx.backend.seed(&student_request()).unwrap();
    fx.service
        .login("student1@example.com", "correctpass")
        .await
        .unwrap();

    fx.service.logout().await.unwrap();

    let session = settled(&fx.service).await;
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn backend_driven_sign_out_clears_the_session() {
    let fx = fixture();
    fx.backend.seed(&student_request()).unwrap();
    fx.service
        .login("student1@example.com", "correctpass")
        .await
        .unwrap();

    // Sign out behind the store's back: the change subscription is the
    // only thing that can observe this.
    fx.backend.sign_out().await.unwrap();

    let session = published_identity(&fx.service, |identity| identity.is_none()).await;
    assert_eq!(session.state(), SessionState::Anonymous);
}

// =============================================================================
// Session cache lifecycle
// =============================================================================

#[tokio::test]
async fn cache_follows_login_and_logout() {
    let fx = fixture();
    fx.backend.seed(&student_request()).unwrap();

    fx.service
        .login("student1@example.com", "correctpass")
        .await
        .unwrap();
    assert!(fx.cache_path.exists());

    fx.service.logout().await.unwrap();
    assert!(!fx.cache_path.exists());
}

#[tokio::test]
async fn corrupt_cache_record_is_cleared_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("session.json");
    std::fs::write(&cache_path, "{definitely not an identity").unwrap();

    let backend = Arc::new(MemoryIdentityBackend::new());
    let service = SessionService::start(backend, Arc::new(SessionCache::at(cache_path.clone())));

    let session = settled(&service).await;
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(!cache_path.exists());
}

#[tokio::test]
async fn unconfirmed_restore_ends_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("session.json");

    // A previous process persisted an identity the fresh backend knows
    // nothing about.
    let stale = Identity::from_document(
        "u-stale".to_string(),
        "student1@example.com",
        ProfileDocument {
            name: "Demo Student".to_string(),
            role: Role::Student,
            student_id: Some("CS2024001".to_string()),
            ..ProfileDocument::default()
        },
    );
    SessionCache::at(cache_path.clone()).store(&stale).unwrap();

    let backend = Arc::new(MemoryIdentityBackend::new());
    let service = SessionService::start(backend, Arc::new(SessionCache::at(cache_path.clone())));

    let session = settled(&service).await;
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(!cache_path.exists());
}

// =============================================================================
// Concurrency contract
// =============================================================================

/// Backend whose sign-in blocks until the test opens the gate.
struct GatedBackend {
    inner: MemoryIdentityBackend,
    gate: Arc<Notify>,
}

#[async_trait]
impl IdentityBackend for GatedBackend {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<String> {
        self.gate.notified().await;
        self.inner.sign_in(email, password).await
    }

    async fn sign_up(&self, request: &RegistrationRequest) -> AppResult<String> {
        self.inner.sign_up(request).await
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.inner.sign_out().await
    }

    async fn get_document(&self, user_id: &str) -> AppResult<Option<ProfileDocument>> {
        self.inner.get_document(user_id).await
    }

    async fn put_document(&self, user_id: &str, document: &ProfileDocument) -> AppResult<()> {
        self.inner.put_document(user_id, document).await
    }

    fn watch_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.inner.watch_identity()
    }
}

#[tokio::test]
async fn overlapping_credential_calls_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let gate = Arc::new(Notify::new());

    let inner = MemoryIdentityBackend::new();
    inner.seed(&student_request()).unwrap();
    let backend = Arc::new(GatedBackend {
        inner,
        gate: gate.clone(),
    });

    let service = Arc::new(SessionService::start(
        backend,
        Arc::new(SessionCache::at(dir.path().join("session.json"))),
    ));

    let first = {
        let service = service.clone();
        tokio::spawn(async move { service.login("student1@example.com", "correctpass").await })
    };
    // Let the first call reach the gate
    tokio::task::yield_now().await;

    let second = service.login("student1@example.com", "correctpass").await;
    assert!(matches!(second, Err(AppError::SessionBusy)));

    let third = service.register(faculty_request()).await;
    assert!(matches!(third, Err(AppError::SessionBusy)));

    gate.notify_one();
    first.await.unwrap().unwrap();
    assert!(service.current().is_authenticated());
}
