//! Error types for vpncheck-rs
//!
//! This module defines custom error types using thiserror for better error handling.

use thiserror::Error;

/// Main error type for vpncheck-rs
#[derive(Error, Debug)]
pub enum CheckError {
    /// A bounded wait elapsed before the remote answered
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Remote endpoint reachable but reported failure
    #[error("Service error: {0}")]
    Service(String),

    /// Malformed or missing user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network error (connection refused, DNS, TLS...)
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Map backend error
    #[error("Map error: {0}")]
    Map(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    Yaml(String),
}

/// Result type alias for vpncheck-rs
pub type Result<T> = std::result::Result<T, CheckError>;

impl CheckError {
    /// Create a service error
    pub fn service<S: Into<String>>(msg: S) -> Self {
        CheckError::Service(msg.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        CheckError::Validation(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CheckError::Config(msg.into())
    }

    /// Create a network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        CheckError::Network(msg.into())
    }

    /// Create a map error
    pub fn map<S: Into<String>>(msg: S) -> Self {
        CheckError::Map(msg.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CheckError::Timeout(_))
    }
}
