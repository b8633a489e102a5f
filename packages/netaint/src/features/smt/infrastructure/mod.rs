//! SMT Infrastructure
//!
//! Infrastructure layer for constraint checking and path feasibility.

pub mod interval_tracker;

pub use interval_tracker::{IntInterval, IntervalTracker, DEFAULT_MAX_CONSTRAINTS};

/// Path feasibility result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFeasibility {
    /// Path is definitely feasible
    Feasible,
    /// Path is definitely infeasible (contradiction detected)
    Infeasible,
    /// Cannot determine: the constraint mentions an opaque symbol
    Unknown,
}
