//! Taint Analysis Domain Models

pub mod finding;
pub mod sink;
pub mod taint_source;

pub use finding::Finding;
pub use sink::{SinkClass, SinkSite};
pub use taint_source::TaintSourceRegistry;
