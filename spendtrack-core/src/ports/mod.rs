//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod api;
mod token_store;

pub use api::FinanceApi;
pub use token_store::TokenStore;
