//! Durable storage for the login session.
//!
//! The session is the bearer token plus the email it was issued for, kept
//! under the fixed keys `auth_token` and `auth_email`. It is read once at
//! startup (hydration), written on successful login, and wiped on logout or
//! failed login.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use catalog_admin_core::Email;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SessionError;

/// A persisted session.
#[derive(Clone)]
pub struct StoredSession {
    /// Bearer token.
    pub token: SecretString,
    /// Email the token was issued for, when known.
    pub email: Option<Email>,
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("token", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

/// On-disk layout.
#[derive(Serialize, Deserialize)]
struct SessionRecord {
    auth_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_email: Option<String>,
}

impl From<&StoredSession> for SessionRecord {
    fn from(session: &StoredSession) -> Self {
        Self {
            auth_token: session.token.expose_secret().to_string(),
            auth_email: session.email.as_ref().map(ToString::to_string),
        }
    }
}

impl SessionRecord {
    fn into_session(self) -> Option<StoredSession> {
        if self.auth_token.trim().is_empty() {
            return None;
        }
        // A malformed stored email is dropped; the token alone is enough.
        let email = self.auth_email.and_then(|raw| Email::parse(&raw).ok());
        Some(StoredSession {
            token: SecretString::from(self.auth_token),
            email,
        })
    }
}

/// Where the session lives between runs.
pub trait SessionStorage: Send + Sync {
    /// Read the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if storage exists but cannot be read.
    fn load(&self) -> Result<Option<StoredSession>, SessionError>;

    /// Persist a session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if storage cannot be written.
    fn save(&self, session: &StoredSession) -> Result<(), SessionError>;

    /// Remove any stored session. Clearing empty storage succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if storage cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// File storage
// =============================================================================

/// Session stored as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Storage backed by the file at `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let record: SessionRecord = serde_json::from_str(&contents)?;
        Ok(record.into_session())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&SessionRecord::from(session))?;
        std::fs::write(&self.path, contents)?;
        restrict_permissions(&self.path);

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        warn!(path = %path.display(), error = %e, "Failed to restrict session file permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

// =============================================================================
// In-memory storage
// =============================================================================

/// Session held in memory only; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    session: Mutex<Option<StoredSession>>,
}

impl MemorySessionStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `session`.
    #[must_use]
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session() -> StoredSession {
        StoredSession {
            token: SecretString::from("tok-abc".to_string()),
            email: Some(Email::parse("admin@example.com").unwrap()),
        }
    }

    #[test]
    fn test_file_round_trip_uses_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested").join("session.json"));

        storage.save(&session()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(raw["auth_token"], "tok-abc");
        assert_eq!(raw["auth_email"], "admin@example.com");

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.token.expose_secret(), "tok-abc");
        assert_eq!(loaded.email.unwrap().as_str(), "admin@example.com");
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));
        assert!(storage.load().unwrap().is_none());
        // Clearing nothing is fine
        storage.clear().unwrap();
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));
        storage.save(&session()).unwrap();

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileSessionStorage::new(path).load().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt(_)));
    }

    #[test]
    fn test_token_only_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"auth_token":"legacy"}"#).unwrap();

        let loaded = FileSessionStorage::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded.token.expose_secret(), "legacy");
        assert!(loaded.email.is_none());

        std::fs::write(&path, r#"{"auth_token":"  "}"#).unwrap();
        assert!(FileSessionStorage::new(&path).load().unwrap().is_none());
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemorySessionStorage::new();
        assert!(storage.load().unwrap().is_none());

        storage.save(&session()).unwrap();
        assert!(storage.load().unwrap().is_some());

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", session());
        assert!(!debug.contains("tok-abc"));
        assert!(debug.contains("[REDACTED]"));
    }
}
