//! Token storage port

use crate::domain::{Result, User};

/// Storage for the bearer token and the cached user
///
/// Two implementations exist: a durable file-backed store (survives
/// restarts, the "remember me" location) and a session-scoped in-memory
/// store. The auth state service layers precedence and eventing on top;
/// implementations only persist.
pub trait TokenStore: Send + Sync {
    /// Human-readable scope name, for log messages
    fn scope(&self) -> &'static str;

    fn get_token(&self) -> Result<Option<String>>;
    fn set_token(&self, token: &str) -> Result<()>;

    fn get_user(&self) -> Result<Option<User>>;
    fn set_user(&self, user: &User) -> Result<()>;

    /// Remove both the token and the cached user
    fn clear(&self) -> Result<()>;
}
