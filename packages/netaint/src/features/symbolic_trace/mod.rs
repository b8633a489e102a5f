//! Symbolic Trace Feature
//!
//! Reference engine for the taint checker. Replays already-explored paths
//! (calls, memory accesses and branch outcomes with resolved symbolic values)
//! and delivers checker events for them.
//!
//! # Architecture
//!
//! ```text
//! symbolic_trace/
//! ├── domain/          # ProgramTrace, PathTrace, AnalysisReport
//! └── infrastructure/  # SimplePathState, SimpleSValBuilder, TraceReplayer
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{
    AnalysisReport, PathId, PathOutcome, PathReport, PathTermination, PathTrace,
    PathTraceBuilder, ProgramTrace, TraceEvent, TraceStep,
};
pub use infrastructure::{ReplayContext, SimplePathState, SimpleSValBuilder, TraceReplayer};
