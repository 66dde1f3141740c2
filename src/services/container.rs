//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use crate::config::{BackendMode, Config};
use crate::errors::AppResult;
use crate::infra::{
    FaceVerifier, HttpIdentityBackend, IdentityBackend, MemoryIdentityBackend, SessionCache,
};
use crate::services::{DashboardService, DemoRecords, SessionService, SessionStore, VerificationService};

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get the session store
    fn session(&self) -> Arc<dyn SessionStore>;

    /// Get the verification service
    fn verification(&self) -> Arc<dyn VerificationService>;

    /// Get the dashboard data provider
    fn dashboards(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    session_service: Arc<SessionService>,
    verification_service: Arc<dyn VerificationService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Wire all services from configuration.
    ///
    /// The identity backend implementation is selected here and nowhere
    /// else; everything downstream sees only the trait.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let cache = Arc::new(SessionCache::from_config(config)?);
        let backend: Arc<dyn IdentityBackend> = match config.backend_mode {
            BackendMode::Memory => {
                let backend = MemoryIdentityBackend::with_demo_accounts()?;
                // Mock-mode restore: the cached record is the session.
                match cache.load() {
                    Ok(Some(identity)) => backend.restore(identity),
                    Ok(None) => {}
                    Err(e) => tracing::warn!("Session restore failed: {}", e),
                }
                Arc::new(backend)
            }
            BackendMode::Http => Arc::new(HttpIdentityBackend::from_config(config)?),
        };

        Ok(Self {
            session_service: Arc::new(SessionService::start(backend, cache)),
            verification_service: Arc::new(FaceVerifier::from_config(config)?),
            dashboard_service: Arc::new(DemoRecords::new()),
        })
    }

    /// Release the session store's backend subscription.
    pub fn shutdown(&self) {
        self.session_service.shutdown();
    }
}

impl ServiceContainer for Services {
    fn session(&self) -> Arc<dyn SessionStore> {
        self.session_service.clone()
    }

    fn verification(&self) -> Arc<dyn VerificationService> {
        self.verification_service.clone()
    }

    fn dashboards(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}
