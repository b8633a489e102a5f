//! Symbolic trace domain models

pub mod report;
pub mod trace;

pub use report::{AnalysisReport, PathOutcome, PathReport, PathTermination};
pub use trace::{PathId, PathTrace, PathTraceBuilder, ProgramTrace, TraceEvent, TraceStep};
