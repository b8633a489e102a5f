//! Error types for netaint
//!
//! Provides unified error handling across the crate. Checker callbacks never
//! return these: a callback that cannot complete its check simply reports
//! nothing. Errors come from loading configuration and traces, and from
//! registering checkers.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for netaint operations
#[derive(Debug, Error)]
pub enum NetaintError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON trace parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML trace parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A checker with the same name is already registered
    #[error("Checker '{0}' is already registered")]
    DuplicateChecker(String),

    /// Trace file extension is not one of json/yaml/yml
    #[error("Unsupported trace format '{0}'. Expected .json, .yaml or .yml")]
    UnsupportedTraceFormat(String),

    /// Malformed trace content
    #[error("Trace error: {0}")]
    Trace(String),
}

impl NetaintError {
    /// Create a trace error
    pub fn trace(msg: impl Into<String>) -> Self {
        NetaintError::Trace(msg.into())
    }

    /// Create a duplicate checker error
    pub fn duplicate_checker(name: impl Into<String>) -> Self {
        NetaintError::DuplicateChecker(name.into())
    }
}

/// Result type alias for netaint operations
pub type Result<T> = std::result::Result<T, NetaintError>;
