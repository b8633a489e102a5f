//! Value and trace builders

use netaint::features::smt::ComparisonOp;
use netaint::features::symbolic_trace::{PathTrace, PathTraceBuilder};
use netaint::shared::models::MemRegion;
use netaint::{NonLoc, ProgramTrace, SVal, SymbolId};

pub fn sym(id: u32) -> NonLoc {
    NonLoc::Symbol(SymbolId(id))
}

/// `lhs <op> bound`
pub fn cmp(lhs: NonLoc, op: ComparisonOp, bound: i64) -> NonLoc {
    NonLoc::compare(lhs, op, NonLoc::ConcreteInt(bound))
}

/// Pointer to `name[index]`
pub fn element(name: &str, index: SVal) -> SVal {
    SVal::element(MemRegion::var(name), index)
}

pub fn var(name: &str) -> SVal {
    SVal::region(MemRegion::var(name))
}

/// Shorthands for the calls the scenarios are made of
pub trait ScenarioSteps: Sized {
    /// `ret = source(arg)` with a symbolic argument
    fn receive(self, source: &str, ret: u32) -> Self;

    /// `memcpy(dst, src, size)`
    fn memcpy(self, size: SVal) -> Self;
}

impl ScenarioSteps for PathTraceBuilder {
    fn receive(self, source: &str, ret: u32) -> Self {
        self.call(source, vec![SVal::symbol(ret + 1000)], SVal::symbol(ret))
    }

    fn memcpy(self, size: SVal) -> Self {
        self.call("memcpy", vec![var("dst"), var("src"), size], var("dst"))
    }
}

/// Builder for multi-path traces
#[derive(Debug, Default)]
pub struct TraceBuilder {
    paths: Vec<PathTrace>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path; ids are assigned in insertion order
    pub fn with_path(mut self, steps: impl FnOnce(PathTraceBuilder) -> PathTraceBuilder) -> Self {
        let id = self.paths.len() as u32;
        self.paths.push(steps(PathTraceBuilder::new(id, "process")).build());
        self
    }

    pub fn build(self) -> ProgramTrace {
        ProgramTrace::new(self.paths)
    }
}
