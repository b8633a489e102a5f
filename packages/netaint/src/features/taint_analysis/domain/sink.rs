//! Sink classification

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{ProgramPoint, SVal};

/// Shape of a size- or address-sensitive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkClass {
    /// Bulk copy whose 3rd argument is a byte count (memcpy)
    CopySink,
    /// Element access `base[index]`
    IndexSink,
}

impl SinkClass {
    /// Diagnostic text for a tainted, unconstrained operand at this sink
    pub fn message(self) -> &'static str {
        match self {
            SinkClass::CopySink => "Tainted, unconstrained value used as copy size",
            SinkClass::IndexSink => "Tainted, unconstrained value used as array index",
        }
    }

    /// Error-node tag; the reporter deduplicates per point, path and tag
    pub fn tag(self) -> &'static str {
        match self {
            SinkClass::CopySink => "network-taint.copy-size",
            SinkClass::IndexSink => "network-taint.array-index",
        }
    }
}

impl fmt::Display for SinkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkClass::CopySink => write!(f, "copy sink"),
            SinkClass::IndexSink => write!(f, "index sink"),
        }
    }
}

/// A call or memory access whose operand has to be checked
#[derive(Debug, Clone, PartialEq)]
pub struct SinkSite {
    pub class: SinkClass,
    /// Copy size or element index
    pub operand: SVal,
    pub point: ProgramPoint,
}

impl SinkSite {
    pub fn new(class: SinkClass, operand: SVal, point: ProgramPoint) -> Self {
        Self {
            class,
            operand,
            point,
        }
    }
}
