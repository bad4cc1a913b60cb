//! State services
//!
//! The stateful pieces that sit between the REST client and a front-end:
//! auth state with change notification, the background connection/auth
//! monitor, and the paginated transaction list store.

mod auth_state;
mod connection;
mod transactions;

pub use auth_state::AuthStateStore;
pub use connection::{
    ConnectionMonitor, ConnectionState, AUTH_POLL_INTERVAL, CONNECTION_POLL_INTERVAL,
};
pub use transactions::{TransactionStore, DEFAULT_PAGE_LIMIT};
