//! Concrete implementations of the ports

pub mod file_store;
pub mod memory_store;
pub mod rest;

pub use file_store::FileTokenStore;
pub use memory_store::MemoryTokenStore;
pub use rest::RestClient;
