//! Checker and engine configuration types
//!
//! Each component has its own configuration struct with validation.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::{validate_identifiers, Validatable};
use crate::features::smt::infrastructure::DEFAULT_MAX_CONSTRAINTS;

/// Network byte-order conversions whose return value is attacker controlled
pub const DEFAULT_TAINT_SOURCES: &[&str] = &["ntohl", "ntohs"];

/// Bulk-copy primitives whose 3rd argument is a size
pub const DEFAULT_COPY_SINKS: &[&str] = &["memcpy"];

/// Sentinel bound for the "is the value practically unconstrained" query
pub const DEFAULT_THRESHOLD: u64 = 5000;

/// Width of the threshold constant
pub const DEFAULT_THRESHOLD_BIT_WIDTH: u32 = 32;

// ============================================================================
// Network Taint Checker Configuration
// ============================================================================

/// `ci.NetworkTaint` checker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkTaintConfig {
    /// Callees whose return value becomes tainted (exact names)
    pub taint_sources: Vec<String>,

    /// Callees checked as copy sinks, size taken from argument index 2
    pub copy_sinks: Vec<String>,

    /// Threshold used by the boundedness query (1..=i64::MAX)
    pub threshold: u64,

    /// Bit width of the threshold constant (1..=64)
    pub threshold_bit_width: u32,
}

impl Default for NetworkTaintConfig {
    fn default() -> Self {
        Self {
            taint_sources: DEFAULT_TAINT_SOURCES.iter().map(|s| s.to_string()).collect(),
            copy_sinks: DEFAULT_COPY_SINKS.iter().map(|s| s.to_string()).collect(),
            threshold: DEFAULT_THRESHOLD,
            threshold_bit_width: DEFAULT_THRESHOLD_BIT_WIDTH,
        }
    }
}

impl NetworkTaintConfig {
    /// Add a taint source name
    pub fn with_taint_source(mut self, name: impl Into<String>) -> Self {
        self.taint_sources.push(name.into());
        self
    }

    /// Set the threshold
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Validatable for NetworkTaintConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_identifiers("taint_sources", &self.taint_sources)?;
        validate_identifiers("copy_sinks", &self.copy_sinks)?;

        if self.threshold_bit_width == 0 || self.threshold_bit_width > 64 {
            return Err(ConfigError::out_of_range(
                "threshold_bit_width",
                self.threshold_bit_width,
                1..=64,
                "the threshold is a machine integer",
            ));
        }

        let max = if self.threshold_bit_width >= 63 {
            i64::MAX as u64
        } else {
            (1u64 << self.threshold_bit_width) - 1
        };
        if self.threshold == 0 || self.threshold > max {
            return Err(ConfigError::out_of_range(
                "threshold",
                self.threshold,
                1..=max,
                "must be positive and fit in threshold_bit_width bits",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Trace Replay Configuration
// ============================================================================

/// Reference trace engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Constraints recorded per path; symbols constrained past it become opaque (1..=4096)
    pub max_constraints_per_path: usize,

    /// Replay independent paths on the rayon pool
    pub parallel: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_constraints_per_path: DEFAULT_MAX_CONSTRAINTS,
            parallel: true,
        }
    }
}

impl Validatable for ReplayConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_constraints_per_path == 0 || self.max_constraints_per_path > 4096 {
            return Err(ConfigError::out_of_range(
                "max_constraints_per_path",
                self.max_constraints_per_path,
                1..=4096,
                "the solver needs a finite, non-zero budget",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = NetworkTaintConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.taint_sources, vec!["ntohl", "ntohs"]);
        assert_eq!(config.copy_sinks, vec!["memcpy"]);
        assert_eq!(config.threshold, 5000);

        let replay = ReplayConfig::default();
        assert!(replay.validate().is_ok());
        assert_eq!(replay.max_constraints_per_path, DEFAULT_MAX_CONSTRAINTS);
    }

    #[test]
    fn test_threshold_must_fit_width() {
        let mut config = NetworkTaintConfig::default();
        config.threshold_bit_width = 8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Range { ref field, .. }) if field == "threshold"
        ));

        config.threshold = 255;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = NetworkTaintConfig::default().with_threshold(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wide_threshold_capped_at_i64_max() {
        let mut config = NetworkTaintConfig::default();
        config.threshold_bit_width = 64;
        config.threshold = i64::MAX as u64;
        assert!(config.validate().is_ok());

        config.threshold = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_replay_budget_range() {
        let config = ReplayConfig {
            max_constraints_per_path: 0,
            parallel: false,
        };
        assert!(config.validate().is_err());
    }
}
