//! Spendtrack Core - data access and state synchronization for the
//! Spendtrack personal finance tracker
//!
//! This crate implements the client-side core following hexagonal
//! architecture:
//!
//! - **domain**: Transport-shape models (Transaction, Budget, ApiResult, etc.)
//! - **ports**: Trait definitions for external dependencies (FinanceApi, TokenStore)
//! - **services**: Stateful pieces (auth state, connection monitor, transaction list)
//! - **adapters**: Concrete implementations (REST client, token storage)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::{FileTokenStore, MemoryTokenStore, RestClient};
use config::Config;
use domain::TransactionFilters;
use services::{AuthStateStore, ConnectionMonitor, TransactionStore};

// Re-export commonly used types at crate root
pub use domain::{
    ApiResult, AuthState, Error, Paginated, Transaction, TransactionFilters as Filters,
    TransactionForm, TransactionPatch, TransactionType, User,
};
pub use services::ConnectionState;

/// Main context for Spendtrack client operations
///
/// The primary entry point: wires configuration, token storage, the auth
/// state store, and the REST client together. State services
/// (`TransactionStore`, `ConnectionMonitor`) are created from it per
/// consumer.
pub struct SpendtrackContext {
    pub config: Config,
    pub auth: Arc<AuthStateStore>,
    pub api: Arc<RestClient>,
}

impl SpendtrackContext {
    /// Create a new context rooted at the given app directory
    pub fn new(app_dir: &Path) -> domain::Result<Self> {
        let config = Config::load(app_dir).map_err(|e| Error::config(e.to_string()))?;

        let durable = Arc::new(FileTokenStore::new(app_dir)?);
        let session = Arc::new(MemoryTokenStore::new());
        let auth = Arc::new(AuthStateStore::new(durable, session));

        let api = Arc::new(RestClient::new(&config.api_base_url, Arc::clone(&auth))?);

        Ok(Self { config, auth, api })
    }

    /// A transaction list store bound to this context
    pub fn transaction_store(&self, filters: TransactionFilters) -> TransactionStore {
        TransactionStore::new(
            Arc::clone(&self.api) as Arc<dyn ports::FinanceApi>,
            Arc::clone(&self.auth),
            filters,
        )
    }

    /// A connection+auth monitor bound to this context (10s cadence)
    pub fn connection_monitor(&self) -> ConnectionMonitor {
        ConnectionMonitor::with_auth(
            Arc::clone(&self.api) as Arc<dyn ports::FinanceApi>,
            Arc::clone(&self.auth),
        )
    }
}
