//! CLI command implementations.

pub mod dashboard;
pub mod enroll;
pub mod login;
pub mod logout;
pub mod register;
pub mod status;
pub mod verify;

use std::path::Path;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::domain::Identity;
use crate::errors::{AppError, AppResult};
use crate::services::{Session, SessionStore};

/// Wait until the session store has left its loading state.
pub(crate) async fn settled_session(store: &Arc<dyn SessionStore>) -> Session {
    let mut rx = store.subscribe();
    loop {
        let session = rx.borrow_and_update().clone();
        if !session.loading {
            return session;
        }
        if rx.changed().await.is_err() {
            return session;
        }
    }
}

/// Read an image file and encode it for the wire.
pub(crate) fn read_image(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::validation(format!("Could not read image {}: {}", path.display(), e))
    })?;
    Ok(STANDARD.encode(bytes))
}

pub(crate) fn print_identity(identity: &Identity) {
    println!("  id:          {}", identity.id);
    println!("  email:       {}", identity.email);
    println!("  name:        {}", identity.name);
    println!("  role:        {}", identity.role);
    if let Some(department) = &identity.department {
        println!("  department:  {}", department);
    }
    if let Some(id) = identity.role_identifier() {
        println!("  {} id:  {}", identity.role, id);
    }
    if let Some(phone) = &identity.phone {
        println!("  phone:       {}", phone);
    }
    if let Some(last_login) = identity.last_login {
        println!("  last login:  {}", last_login.format("%Y-%m-%d %H:%M UTC"));
    }
}
