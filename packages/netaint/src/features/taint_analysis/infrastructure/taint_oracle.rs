//! Taint Oracle
//!
//! Taint queries and marks against a path state. Membership lives in the
//! engine's state; this type holds the marking policy: marks only ever add,
//! and re-marking a tainted symbol leaves the state untouched.

use crate::features::taint_analysis::ports::PathState;
use crate::shared::models::{NonLoc, SVal, SymbolId};

#[derive(Debug, Clone, Copy, Default)]
pub struct TaintOracle;

impl TaintOracle {
    pub fn new() -> Self {
        Self
    }

    /// Whether `value` is tainted in `state`
    pub fn is_tainted<S: PathState>(&self, value: &SVal, state: &S) -> bool {
        state.is_tainted(value)
    }

    /// State identical to `state` except that `symbol` is tainted
    pub fn mark_tainted<S: PathState>(&self, symbol: SymbolId, state: &S) -> S {
        if state.is_tainted(&SVal::NonLoc(NonLoc::Symbol(symbol))) {
            return state.clone();
        }
        state.add_taint(symbol)
    }
}
