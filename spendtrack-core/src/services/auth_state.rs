//! Auth state service
//!
//! Owns the two token stores (durable and session-scoped) and the typed
//! event bus that replaces ad-hoc cross-component notification. Durable
//! storage takes precedence on read; logout of any kind clears both.
//!
//! Token issuance is the backend's job. This service only stores a token
//! handed to it at login, attaches no meaning to its contents, and treats
//! its presence as "logged in" until a request proves otherwise.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::broadcast;

use crate::domain::{AuthState, Result, User};
use crate::ports::TokenStore;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Process-wide auth state: token/user storage plus change notification
pub struct AuthStateStore {
    durable: Arc<dyn TokenStore>,
    session: Arc<dyn TokenStore>,
    events: broadcast::Sender<AuthState>,
}

impl AuthStateStore {
    pub fn new(durable: Arc<dyn TokenStore>, session: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            durable,
            session,
            events,
        }
    }

    /// The bearer token, durable store first, then session
    pub fn token(&self) -> Option<String> {
        self.read_from_stores(|store| store.get_token())
    }

    /// The cached user, durable store first, then session
    pub fn user(&self) -> Option<User> {
        self.read_from_stores(|store| store.get_user())
    }

    /// A stored token means "logged in" until a request returns unauthorized
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store a token (and user) obtained from a login flow
    ///
    /// `remember` selects durable storage; otherwise the session store,
    /// which forgets at process exit.
    pub fn login(&self, token: &str, user: Option<&User>, remember: bool) -> Result<()> {
        let store = if remember { &self.durable } else { &self.session };
        store.set_token(token)?;
        if let Some(user) = user {
            store.set_user(user)?;
        }
        debug!("stored credentials in {} scope", store.scope());
        let _ = self.events.send(AuthState::signed_in(user.cloned()));
        Ok(())
    }

    /// Explicit logout: clear both stores and announce the signed-out state
    pub fn logout(&self) -> Result<()> {
        self.clear_stores();
        let _ = self.events.send(AuthState::signed_out());
        Ok(())
    }

    /// Logout forced by an unauthorized response
    ///
    /// Clears both stores and publishes exactly one signed-out event,
    /// regardless of whether credentials were present.
    pub fn force_logout(&self) {
        warn!("unauthorized response, clearing stored credentials");
        self.clear_stores();
        let _ = self.events.send(AuthState::signed_out());
    }

    /// Subscribe to auth state changes (login, logout, forced logout)
    pub fn subscribe(&self) -> broadcast::Receiver<AuthState> {
        self.events.subscribe()
    }

    fn clear_stores(&self) {
        for store in [&self.durable, &self.session] {
            if let Err(e) = store.clear() {
                warn!("failed to clear {} token store: {}", store.scope(), e);
            }
        }
    }

    fn read_from_stores<T>(
        &self,
        read: impl Fn(&Arc<dyn TokenStore>) -> Result<Option<T>>,
    ) -> Option<T> {
        for store in [&self.durable, &self.session] {
            match read(store) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => continue,
                Err(e) => {
                    warn!("failed to read {} token store: {}", store.scope(), e);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryTokenStore;

    fn make_store() -> (AuthStateStore, Arc<MemoryTokenStore>, Arc<MemoryTokenStore>) {
        let durable = Arc::new(MemoryTokenStore::new());
        let session = Arc::new(MemoryTokenStore::new());
        let auth = AuthStateStore::new(durable.clone(), session.clone());
        (auth, durable, session)
    }

    fn test_user() -> User {
        serde_json::from_str(r#"{"id": "u1", "username": "ada"}"#).unwrap()
    }

    #[test]
    fn test_durable_takes_precedence() {
        let (auth, durable, session) = make_store();
        session.set_token("session-tok").unwrap();
        durable.set_token("durable-tok").unwrap();

        assert_eq!(auth.token().as_deref(), Some("durable-tok"));
    }

    #[test]
    fn test_session_fallback() {
        let (auth, _durable, session) = make_store();
        session.set_token("session-tok").unwrap();

        assert_eq!(auth.token().as_deref(), Some("session-tok"));
        assert!(auth.is_logged_in());
    }

    #[test]
    fn test_login_remember_selects_durable() {
        let (auth, durable, session) = make_store();
        auth.login("tok", Some(&test_user()), true).unwrap();

        assert!(durable.get_token().unwrap().is_some());
        assert!(session.get_token().unwrap().is_none());
    }

    #[test]
    fn test_login_without_remember_selects_session() {
        let (auth, durable, session) = make_store();
        auth.login("tok", None, false).unwrap();

        assert!(durable.get_token().unwrap().is_none());
        assert!(session.get_token().unwrap().is_some());
    }

    #[test]
    fn test_force_logout_clears_both_and_emits_once() {
        let (auth, durable, session) = make_store();
        durable.set_token("a").unwrap();
        session.set_token("b").unwrap();

        let mut rx = auth.subscribe();
        auth.force_logout();

        assert!(durable.get_token().unwrap().is_none());
        assert!(session.get_token().unwrap().is_none());

        let event = rx.try_recv().unwrap();
        assert!(!event.is_authenticated);
        assert!(event.user.is_none());
        assert!(rx.try_recv().is_err()); // exactly one event
    }

    #[test]
    fn test_force_logout_emits_even_when_already_logged_out() {
        let (auth, _durable, _session) = make_store();
        let mut rx = auth.subscribe();
        auth.force_logout();
        assert!(rx.try_recv().is_ok());
    }
}
