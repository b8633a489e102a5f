//! Taint Analysis Feature
//!
//! The `ci.NetworkTaint` checker: values returned by network byte-order
//! conversions are tainted, and a tainted value used as a copy size or array
//! index is reported while `value > threshold` remains satisfiable.
//!
//! # Architecture
//!
//! ```text
//! taint_analysis/
//! ├── domain/          # SinkClass, Finding, TaintSourceRegistry
//! ├── ports/           # Engine boundary: PathState, SValBuilder, CheckerContext
//! ├── infrastructure/  # TaintOracle, BoundednessOracle, checker, registry
//! └── application/     # TaintCheckService
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{TaintCheckService, TaintCheckUseCase};
pub use domain::{Finding, SinkClass, SinkSite, TaintSourceRegistry};
pub use infrastructure::{
    BoundednessOracle, CheckerInfo, CheckerRegistry, EventHandler, NetworkTaintChecker,
    TaintOracle,
};
pub use ports::{
    BugReport, CallEvent, CheckerContext, CheckerEvent, ErrorNode, EventKind, LocationEvent,
    PathState, SValBuilder,
};
