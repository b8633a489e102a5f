//! Taint analysis infrastructure
//!
//! - `taint_oracle`: taint marks on path states
//! - `boundedness`: threshold satisfiability query
//! - `network_taint`: the `ci.NetworkTaint` checker
//! - `registry`: event dispatch table

pub mod boundedness;
pub mod network_taint;
pub mod registry;
pub mod taint_oracle;

pub use boundedness::BoundednessOracle;
pub use network_taint::{NetworkTaintChecker, COPY_SIZE_ARG};
pub use registry::{CheckerInfo, CheckerRegistry, EventHandler};
pub use taint_oracle::TaintOracle;
