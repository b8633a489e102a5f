//! SMT Domain Models

pub mod path_condition;

pub use path_condition::{ComparisonOp, PathCondition};
