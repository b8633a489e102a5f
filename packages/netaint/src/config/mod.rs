//! Configuration System
//!
//! Versioned YAML configuration with validation.
//!
//! # Examples
//!
//! ```rust,ignore
//! use netaint::config::AnalysisConfig;
//!
//! // Defaults: ntohl/ntohs sources, memcpy sink, threshold 5000
//! let config = AnalysisConfig::default();
//!
//! // From a file
//! let config = AnalysisConfig::from_yaml("netaint.yaml")?;
//! ```

pub mod analysis_config;
pub mod checker_configs;
pub mod error;
pub mod validation;

// Re-exports
pub use analysis_config::{AnalysisConfig, KNOWN_CHECKERS, SUPPORTED_VERSIONS};
pub use checker_configs::{
    NetworkTaintConfig, ReplayConfig, DEFAULT_COPY_SINKS, DEFAULT_TAINT_SOURCES,
    DEFAULT_THRESHOLD, DEFAULT_THRESHOLD_BIT_WIDTH,
};
pub use error::{ConfigError, ConfigResult};
pub use validation::Validatable;
