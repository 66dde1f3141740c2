//! In-memory identity backend.
//!
//! The configuration-selected fake: full credential and document
//! semantics, no network. Accounts live for the life of the process,
//! which is exactly what the demo mode and the test suite need.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::watch;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::domain::{Identity, Password, ProfileDocument, RegistrationRequest};
use crate::errors::{AppError, AppResult};

use super::IdentityBackend;

struct Account {
    user_id: String,
    password: Password,
    document: ProfileDocument,
}

/// Password shared by all demo accounts
pub const DEMO_PASSWORD: &str = "correctpass";

/// The three demo accounts, one per role, mirroring the product demo data.
fn demo_accounts() -> Vec<RegistrationRequest> {
    use crate::domain::Role;

    let base = RegistrationRequest {
        email: String::new(),
        password: DEMO_PASSWORD.to_string(),
        name: String::new(),
        role: Role::Student,
        department: Some("Computer Science".to_string()),
        student_id: None,
        faculty_id: None,
        phone: Some("+1234567890".to_string()),
        profile_image: None,
    };

    vec![
        RegistrationRequest {
            email: "student1@example.com".to_string(),
            name: "Demo Student".to_string(),
            student_id: Some("CS2024001".to_string()),
            ..base.clone()
        },
        RegistrationRequest {
            email: "faculty1@example.com".to_string(),
            name: "Demo Faculty".to_string(),
            role: Role::Faculty,
            faculty_id: Some("FAC001".to_string()),
            ..base.clone()
        },
        RegistrationRequest {
            email: "admin@example.com".to_string(),
            name: "Demo Admin".to_string(),
            role: Role::Admin,
            department: None,
            ..base
        },
    ]
}

/// In-memory implementation of [`IdentityBackend`].
pub struct MemoryIdentityBackend {
    /// Keyed by email, the credential lookup key
    accounts: RwLock<HashMap<String, Account>>,
    /// Email of the currently signed-in account, if any
    signed_in: RwLock<Option<String>>,
    identity_tx: watch::Sender<Option<Identity>>,
}

impl Default for MemoryIdentityBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIdentityBackend {
    pub fn new() -> Self {
        let (identity_tx, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            signed_in: RwLock::new(None),
            identity_tx,
        }
    }

    /// Backend pre-populated with the product demo accounts, one per
    /// role, all sharing [`DEMO_PASSWORD`].
    pub fn with_demo_accounts() -> AppResult<Self> {
        let backend = Self::new();
        let accounts = demo_accounts();
        for request in &accounts {
            backend.seed(request)?;
        }
        tracing::debug!("Seeded {} demo accounts", accounts.len());
        Ok(backend)
    }

    /// Create an account without signing it in. Used to pre-populate
    /// demo and test fixtures.
    pub fn seed(&self, request: &RegistrationRequest) -> AppResult<String> {
        let user_id = Uuid::new_v4().to_string();
        let account = Account {
            user_id: user_id.clone(),
            password: Password::new(&request.password)?,
            document: request.document(Utc::now()),
        };
        self.accounts
            .write()
            .insert(request.email.clone(), account);
        Ok(user_id)
    }

    /// Adopt a previously persisted session as the current signed-in
    /// state. This is the mock-mode restore path: the cached record is
    /// authoritative because there is no remote session to re-confirm it.
    pub fn restore(&self, identity: Identity) {
        *self.signed_in.write() = Some(identity.email.clone());
        self.publish(Some(identity));
    }

    fn publish(&self, identity: Option<Identity>) {
        self.identity_tx.send_replace(identity);
    }
}

#[async_trait]
impl IdentityBackend for MemoryIdentityBackend {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<String> {
        if !email.validate_email() {
            return Err(AppError::InvalidEmail);
        }

        let identity = {
            let mut accounts = self.accounts.write();

            // Verify against a dummy hash when the account is missing so
            // response timing does not reveal which emails exist.
            let dummy =
                "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";
            let (stored, exists) = match accounts.get(email) {
                Some(account) => (account.password.clone(), true),
                None => (Password::from_hash(dummy.to_string()), false),
            };

            let password_valid = stored.verify(password);
            if !exists || !password_valid {
                return Err(AppError::InvalidCredentials);
            }

            let account = accounts.get_mut(email).expect("account exists");
            account.document.last_login = Some(Utc::now());
            Identity::from_document(account.user_id.clone(), email, account.document.clone())
        };

        let user_id = identity.id.clone();
        *self.signed_in.write() = Some(email.to_string());
        self.publish(Some(identity));
        Ok(user_id)
    }

    async fn sign_up(&self, request: &RegistrationRequest) -> AppResult<String> {
        if !request.email.validate_email() {
            return Err(AppError::InvalidEmail);
        }
        if self.accounts.read().contains_key(&request.email) {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let password = Password::new(&request.password)?;
        let document = request.document(Utc::now());
        let user_id = Uuid::new_v4().to_string();

        let identity =
            Identity::from_document(user_id.clone(), &request.email, document.clone());
        self.accounts.write().insert(
            request.email.clone(),
            Account {
                user_id: user_id.clone(),
                password,
                document,
            },
        );

        *self.signed_in.write() = Some(request.email.clone());
        self.publish(Some(identity));
        Ok(user_id)
    }

    async fn sign_out(&self) -> AppResult<()> {
        if let Some(email) = self.signed_in.write().take() {
            tracing::debug!(email = %email, "signing out in-memory session");
        }
        self.publish(None);
        Ok(())
    }

    async fn get_document(&self, user_id: &str) -> AppResult<Option<ProfileDocument>> {
        let accounts = self.accounts.read();
        Ok(accounts
            .values()
            .find(|a| a.user_id == user_id)
            .map(|a| a.document.clone()))
    }

    async fn put_document(&self, user_id: &str, document: &ProfileDocument) -> AppResult<()> {
        let mut accounts = self.accounts.write();
        let account = accounts
            .values_mut()
            .find(|a| a.user_id == user_id)
            .ok_or(AppError::NotFound)?;
        account.document = document.clone();
        Ok(())
    }

    fn watch_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.identity_tx.subscribe()
    }
}
