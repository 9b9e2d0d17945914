//! Session Cookie Store
//!
//! The backend tracks authentication through a session cookie. This client
//! persists the cookie pairs to a file under the state dir so a login
//! survives across invocations. Only cookie pairs are stored, never
//! credentials.

use std::fs;
use std::path::PathBuf;

use crate::domain::{DomainError, DomainResult};

/// File-backed persistence for the backend session cookie
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored `Cookie` header value, if a session was saved
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let cookie = raw.trim();
        if cookie.is_empty() {
            None
        } else {
            Some(cookie.to_string())
        }
    }

    /// Persist the cookie pairs captured from a login response
    pub fn save(&self, cookies: &[String]) -> DomainResult<()> {
        if cookies.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DomainError::Backend(format!("cannot create state dir: {}", e)))?;
        }
        fs::write(&self.path, cookies.join("; "))
            .map_err(|e| DomainError::Backend(format!("cannot save session: {}", e)))
    }

    /// Forget the stored session. Missing file is fine.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("failed to clear session file: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!("worthit-session-test-{}", name));
        let _ = fs::remove_file(&path);
        SessionStore::new(path)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = temp_store("round-trip");
        store
            .save(&["session=abc123".to_string(), "csrf=xyz".to_string()])
            .expect("save failed");
        assert_eq!(store.load(), Some("session=abc123; csrf=xyz".to_string()));
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_missing_file_means_no_session() {
        let store = temp_store("missing");
        assert_eq!(store.load(), None);
        // clearing an absent session is a no-op
        store.clear();
    }

    #[test]
    fn test_empty_cookie_list_is_ignored() {
        let store = temp_store("empty");
        store.save(&[]).expect("save failed");
        assert_eq!(store.load(), None);
    }
}
