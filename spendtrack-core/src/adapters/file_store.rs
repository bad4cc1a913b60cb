//! File-backed token storage
//!
//! The durable analogue of the browser's localStorage: a small JSON file
//! (`auth.json`) in the app directory. Reads go to disk on every call so
//! that concurrent processes (CLI invocations) observe each other's
//! logins.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::domain::{Error, Result, User};
use crate::ports::TokenStore;

const AUTH_FILE: &str = "auth.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredAuth {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// Durable token store backed by `<app_dir>/auth.json`
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(app_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(app_dir)?;
        Ok(Self {
            path: app_dir.join(AUTH_FILE),
            write_lock: Mutex::new(()),
        })
    }

    fn read(&self) -> Result<StoredAuth> {
        if !self.path.exists() {
            return Ok(StoredAuth::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        // A corrupt auth file means logged out, not a hard failure
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn write(&self, auth: &StoredAuth) -> Result<()> {
        let content = serde_json::to_string_pretty(auth)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut StoredAuth)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::storage("auth file lock poisoned"))?;
        let mut auth = self.read()?;
        f(&mut auth);
        self.write(&auth)
    }
}

impl TokenStore for FileTokenStore {
    fn scope(&self) -> &'static str {
        "durable"
    }

    fn get_token(&self) -> Result<Option<String>> {
        Ok(self.read()?.token)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.update(|auth| auth.token = Some(token.to_string()))
    }

    fn get_user(&self) -> Result<Option<User>> {
        Ok(self.read()?.user)
    }

    fn set_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.update(|auth| auth.user = Some(user))
    }

    fn clear(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::storage("auth file lock poisoned"))?;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_user() -> User {
        serde_json::from_str(r#"{"id": "u1", "username": "ada"}"#).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path()).unwrap();

        assert!(store.get_token().unwrap().is_none());

        store.set_token("tok-123").unwrap();
        store.set_user(&test_user()).unwrap();

        assert_eq!(store.get_token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(store.get_user().unwrap().unwrap().username, "ada");
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path()).unwrap();

        store.set_token("tok-123").unwrap();
        store.clear().unwrap();

        assert!(store.get_token().unwrap().is_none());
        assert!(store.get_user().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_reads_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path()).unwrap();
        std::fs::write(dir.path().join(AUTH_FILE), "not json").unwrap();

        assert!(store.get_token().unwrap().is_none());
    }
}
