//! Top-level analysis configuration and its YAML schema (v1)

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::checker_configs::{NetworkTaintConfig, ReplayConfig};
use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

/// Schema versions this crate can read
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Checkers known to this crate
pub const KNOWN_CHECKERS: &[&str] = &["ci.NetworkTaint"];

/// YAML Schema v1
///
/// ```yaml
/// version: 1
/// enabled_checkers: [ci.NetworkTaint]
/// network_taint:
///   taint_sources: [ntohl, ntohs]
///   threshold: 5000
/// replay:
///   parallel: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Checkers to register
    #[serde(default = "default_enabled_checkers")]
    pub enabled_checkers: Vec<String>,

    #[serde(default)]
    pub network_taint: NetworkTaintConfig,

    #[serde(default)]
    pub replay: ReplayConfig,
}

fn default_enabled_checkers() -> Vec<String> {
    KNOWN_CHECKERS.iter().map(|s| s.to_string()).collect()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            version: Some(1),
            enabled_checkers: default_enabled_checkers(),
            network_taint: NetworkTaintConfig::default(),
            replay: ReplayConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Whether a checker is enabled
    pub fn is_enabled(&self, checker: &str) -> bool {
        self.enabled_checkers.iter().any(|name| name == checker)
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        let version = self.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS,
            });
        }

        for name in &self.enabled_checkers {
            if !KNOWN_CHECKERS.contains(&name.as_str()) {
                return Err(ConfigError::unknown_checker(name.clone(), KNOWN_CHECKERS));
            }
        }

        if self.enabled_checkers.is_empty() {
            tracing::warn!("No checkers enabled; analysis will not report anything");
        }

        self.network_taint.validate()?;
        self.replay.validate()?;
        Ok(())
    }
}
