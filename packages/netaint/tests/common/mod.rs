//! Common test utilities for netaint
//!
//! Trace builders, fixtures and report assertions shared by the integration
//! tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
