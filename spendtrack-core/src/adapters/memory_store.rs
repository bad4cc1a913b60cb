//! In-memory token storage
//!
//! The session-scoped analogue of the browser's sessionStorage: contents
//! live only as long as the process.

use std::sync::Mutex;

use crate::domain::{Error, Result, User};
use crate::ports::TokenStore;

#[derive(Debug, Default)]
struct Session {
    token: Option<String>,
    user: Option<User>,
}

/// Session-scoped token store
#[derive(Default)]
pub struct MemoryTokenStore {
    session: Mutex<Session>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::storage("session store lock poisoned"))?;
        Ok(f(&mut session))
    }
}

impl TokenStore for MemoryTokenStore {
    fn scope(&self) -> &'static str {
        "session"
    }

    fn get_token(&self) -> Result<Option<String>> {
        self.with_session(|s| s.token.clone())
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.with_session(|s| s.token = Some(token.to_string()))
    }

    fn get_user(&self) -> Result<Option<User>> {
        self.with_session(|s| s.user.clone())
    }

    fn set_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.with_session(|s| s.user = Some(user))
    }

    fn clear(&self) -> Result<()> {
        self.with_session(|s| {
            s.token = None;
            s.user = None;
        })
    }
}
