//! Local persisted session record.
//!
//! A single serialized Identity blob under the platform data directory:
//! read once at startup for session restore, written on every successful
//! login or registration, removed on logout. A corrupt record is removed
//! and reported as absent so a bad write can never wedge startup.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{Config, DATA_DIR_NAME, SESSION_CACHE_FILE};
use crate::domain::Identity;
use crate::errors::{AppError, AppResult};

pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Cache at the configured path, or the platform default.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        match &config.session_cache_path {
            Some(path) => Ok(Self::at(path.clone())),
            None => {
                let dir = dirs::data_dir()
                    .ok_or_else(|| AppError::internal("No platform data directory"))?;
                Ok(Self::at(dir.join(DATA_DIR_NAME).join(SESSION_CACHE_FILE)))
            }
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the cached identity. Absent and corrupt records both come
    /// back as `None`; a corrupt record is removed on the way.
    pub fn load(&self) -> AppResult<Option<Identity>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Corrupt session record ({}), removing it",
                    e
                );
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Persist the identity, replacing any previous record atomically.
    pub fn store(&self, identity: &Identity) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_vec_pretty(identity)
            .map_err(|e| AppError::internal(format!("Session serialization failed: {}", e)))?;

        // Write-then-rename so a crash mid-write leaves the old record intact.
        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&body)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Remove the record. Missing files are fine.
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProfileDocument, Role};

    fn identity() -> Identity {
        let doc = ProfileDocument {
            name: "Alice Johnson".to_string(),
            role: Role::Student,
            student_id: Some("CS2024001".to_string()),
            ..ProfileDocument::default()
        };
        Identity::from_document("u1".to_string(), "a@example.com", doc)
    }

    fn cache_in(dir: &tempfile::TempDir) -> SessionCache {
        SessionCache::at(dir.path().join("session.json"))
    }

    #[test]
    fn test_store_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let stored = identity();

        cache.store(&stored).unwrap();
        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded, stored);
        assert_eq!(loaded.department, None);
    }

    #[test]
    fn test_absent_record_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cache_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        fs::write(dir.path().join("session.json"), "{not json").unwrap();

        assert!(cache.load().unwrap().is_none());
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.store(&identity()).unwrap();

        cache.clear().unwrap();
        cache.clear().unwrap();
        assert!(cache.load().unwrap().is_none());
    }
}
