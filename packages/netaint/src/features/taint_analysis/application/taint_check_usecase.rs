//! Taint Check UseCase

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{AnalysisConfig, Validatable};
use crate::errors::Result;
use crate::features::symbolic_trace::{AnalysisReport, ProgramTrace, ReplayContext, TraceReplayer};
use crate::features::taint_analysis::infrastructure::{CheckerRegistry, NetworkTaintChecker};

/// Taint Check UseCase Trait
pub trait TaintCheckUseCase: Send + Sync {
    /// Run the enabled checkers over every path of `trace`
    fn analyze_trace(&self, trace: &ProgramTrace) -> AnalysisReport;

    /// Load a JSON or YAML trace and analyze it
    fn analyze_trace_file(&self, path: &Path) -> Result<AnalysisReport>;
}

/// Taint Check UseCase Implementation
#[derive(Debug)]
pub struct TaintCheckService {
    config: AnalysisConfig,
    registry: CheckerRegistry<ReplayContext>,
}

impl TaintCheckService {
    /// Validate `config` and register the checkers it enables
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let mut registry = CheckerRegistry::new();
        if config.is_enabled(NetworkTaintChecker::NAME) {
            Arc::new(NetworkTaintChecker::from_config(&config.network_taint))
                .register(&mut registry)?;
        }
        debug!(checkers = registry.checkers().len(), "Taint check service ready");

        Ok(Self { config, registry })
    }

    /// Load the configuration from a YAML file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(AnalysisConfig::from_yaml(path)?)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn registry(&self) -> &CheckerRegistry<ReplayContext> {
        &self.registry
    }
}

impl TaintCheckUseCase for TaintCheckService {
    fn analyze_trace(&self, trace: &ProgramTrace) -> AnalysisReport {
        TraceReplayer::new(&self.registry, self.config.replay.clone()).replay(trace)
    }

    fn analyze_trace_file(&self, path: &Path) -> Result<AnalysisReport> {
        let trace = ProgramTrace::from_path(path)?;
        info!(path = %path.display(), paths = trace.paths.len(), "Loaded trace");
        Ok(self.analyze_trace(&trace))
    }
}
