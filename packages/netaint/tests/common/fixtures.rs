//! Canned traces and services

use netaint::features::smt::ComparisonOp;
use netaint::{AnalysisConfig, ProgramTrace, ReplayConfig, SVal, TaintCheckService};

use super::builders::*;

/// Service with the default configuration, replaying sequentially
pub fn default_service() -> TaintCheckService {
    service_with(AnalysisConfig::default())
}

pub fn service_with(mut config: AnalysisConfig) -> TaintCheckService {
    config.replay = ReplayConfig {
        parallel: false,
        ..config.replay
    };
    TaintCheckService::new(config).expect("valid test configuration")
}

/// Heartbeat handler shape: length read from the wire, then copied
///
/// ```c
/// n = ntohs(hdr->len);
/// memcpy(bp, pl, n);
/// ```
pub fn heartbeat_trace() -> ProgramTrace {
    TraceBuilder::new()
        .with_path(|p| p.receive("ntohs", 0).memcpy(SVal::symbol(0)))
        .build()
}

/// Same as `heartbeat_trace` with a `n <= bound` check taken before the copy
pub fn checked_heartbeat_trace(bound: i64) -> ProgramTrace {
    TraceBuilder::new()
        .with_path(|p| {
            p.receive("ntohs", 0)
                .branch(cmp(sym(0), ComparisonOp::Le, bound), true)
                .memcpy(SVal::symbol(0))
        })
        .build()
}
