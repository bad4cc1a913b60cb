//! Result and error types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Covers local faults only (configuration, token storage). Transport
/// outcomes never surface here; the REST client returns [`ApiResult`]
/// instead so that no request error can propagate as a panic or `Err`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a single API request: a payload or an error message,
/// never both.
///
/// Every resource method returns this type. The enum makes the
/// data-xor-error contract structural rather than conventional.
#[derive(Debug, Clone)]
pub enum ApiResult<T> {
    Data(T),
    Error(String),
}

impl<T> ApiResult<T> {
    /// Build an error result from any displayable message
    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The payload, if the request succeeded
    pub fn data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// The error message, if the request failed
    pub fn err_message(&self) -> Option<&str> {
        match self {
            Self::Data(_) => None,
            Self::Error(msg) => Some(msg),
        }
    }

    /// Map the payload, leaving errors untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Data(data) => ApiResult::Data(f(data)),
            Self::Error(msg) => ApiResult::Error(msg),
        }
    }

    /// Convert into a plain `Result` with a string error
    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(msg) => Err(msg),
        }
    }
}

/// A page of results as reported by the server
///
/// `page` is 1-based; `total_pages` is trusted as-is and never recomputed
/// client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: i64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_result_data() {
        let result: ApiResult<i32> = ApiResult::Data(42);
        assert!(result.is_data());
        assert!(!result.is_error());
        assert!(result.err_message().is_none());
        assert_eq!(result.data(), Some(42));
    }

    #[test]
    fn test_api_result_error() {
        let result: ApiResult<i32> = ApiResult::error("boom");
        assert!(result.is_error());
        assert_eq!(result.err_message(), Some("boom"));
        assert_eq!(result.data(), None);
    }

    #[test]
    fn test_api_result_map_preserves_error() {
        let result: ApiResult<i32> = ApiResult::error("boom");
        let mapped = result.map(|n| n * 2);
        assert_eq!(mapped.err_message(), Some("boom"));
    }

    #[test]
    fn test_paginated_defaults() {
        let page: Paginated<i32> = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
    }
}
