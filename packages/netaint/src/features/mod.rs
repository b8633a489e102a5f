//! Feature modules
//!
//! - `smt`: comparison predicates, interval constraints, path feasibility
//! - `taint_analysis`: network taint checker (sources, sinks, oracles)
//! - `symbolic_trace`: reference engine replaying recorded symbolic traces

pub mod smt;
pub mod symbolic_trace;
pub mod taint_analysis;
