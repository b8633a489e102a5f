//! SMT (Satisfiability Modulo Theories) Module
//!
//! Constraint representation and path feasibility for the reference engine
//! and the boundedness query.
//!
//! ## Architecture
//!
//! ```text
//! SMT
//! ├── domain/               # Domain models
//! │   └── path_condition    # Comparison operators, symbol constraints
//! └── infrastructure/       # Implementation
//!     └── interval_tracker  # Closed integer ranges per symbol
//! ```

pub mod domain;
pub mod infrastructure;

// Domain models
pub use domain::{ComparisonOp, PathCondition};

pub use infrastructure::{IntInterval, IntervalTracker, PathFeasibility};
