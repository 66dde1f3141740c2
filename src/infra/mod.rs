//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - The identity/document backend boundary (HTTP and in-memory)
//! - The face verification endpoint client
//! - The locally persisted session record

pub mod backend;
pub mod session_cache;
pub mod verification;

pub use backend::{HttpIdentityBackend, IdentityBackend, MemoryIdentityBackend};
pub use session_cache::SessionCache;
pub use verification::{FaceVerifier, FallbackPolicy};

#[cfg(any(test, feature = "test-utils"))]
pub use backend::MockIdentityBackend;
