//! Persistent path state
//!
//! Taint set and interval constraints behind `Arc`s. Deriving a state shares
//! both with its parent until one of them is written, so states forked at a
//! query (`assume(value > T)`) cost a pointer copy until the constraint is
//! recorded.
//!
//! `feasibility()` is the verdict of the most recent assumption. Infeasibility
//! is permanent; an undecidable constraint only clouds the symbols it
//! mentions.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::features::smt::domain::PathCondition;
use crate::features::smt::infrastructure::{IntervalTracker, PathFeasibility, DEFAULT_MAX_CONSTRAINTS};
use crate::features::taint_analysis::ports::PathState;
use crate::shared::models::{NonLoc, SVal, SymbolId};

#[derive(Debug, Clone)]
pub struct SimplePathState {
    tainted: Arc<FxHashSet<SymbolId>>,
    constraints: Arc<IntervalTracker>,
    feasibility: PathFeasibility,
}

impl Default for SimplePathState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONSTRAINTS)
    }
}

impl SimplePathState {
    /// Empty state recording at most `max_constraints` constraints
    pub fn new(max_constraints: usize) -> Self {
        Self {
            tainted: Arc::new(FxHashSet::default()),
            constraints: Arc::new(IntervalTracker::with_max_constraints(max_constraints)),
            feasibility: PathFeasibility::Feasible,
        }
    }

    /// Tainted symbols, sorted
    pub fn tainted_symbols(&self) -> Vec<SymbolId> {
        let mut symbols: Vec<SymbolId> = self.tainted.iter().copied().collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn constraints(&self) -> &IntervalTracker {
        &self.constraints
    }

    fn with_condition(&self, condition: PathCondition) -> Self {
        let mut next = self.clone();
        let verdict = Arc::make_mut(&mut next.constraints).add_constraint(&condition);
        trace!(%condition, ?verdict, "Assumed");
        next.feasibility = verdict;
        next
    }

    fn with_opaque(&self, condition: &NonLoc) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.constraints).mark_opaque(condition.symbols());
        trace!(%condition, "Unsupported constraint shape");
        next.feasibility = PathFeasibility::Unknown;
        next
    }

    fn with_feasibility(&self, verdict: PathFeasibility) -> Self {
        let mut next = self.clone();
        next.feasibility = verdict;
        next
    }
}

impl PathState for SimplePathState {
    fn is_tainted(&self, value: &SVal) -> bool {
        value.symbols().iter().any(|s| self.tainted.contains(s))
    }

    fn add_taint(&self, symbol: SymbolId) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.tainted).insert(symbol);
        next
    }

    fn assume(&self, condition: &NonLoc, assumption: bool) -> Self {
        if self.feasibility == PathFeasibility::Infeasible {
            return self.clone();
        }

        match condition {
            NonLoc::ConcreteInt(v) => {
                if (*v != 0) == assumption {
                    self.with_feasibility(PathFeasibility::Feasible)
                } else {
                    self.with_feasibility(PathFeasibility::Infeasible)
                }
            }
            NonLoc::Symbol(symbol) => {
                let condition = if assumption {
                    PathCondition::neq(*symbol, 0)
                } else {
                    PathCondition::eq(*symbol, 0)
                };
                self.with_condition(condition)
            }
            NonLoc::Compare { lhs, op, rhs } => {
                let op = if assumption { *op } else { op.negate() };
                match (lhs.as_ref(), rhs.as_ref()) {
                    (NonLoc::Symbol(s), NonLoc::ConcreteInt(v)) => {
                        self.with_condition(PathCondition::new(*s, op, *v))
                    }
                    (NonLoc::ConcreteInt(v), NonLoc::Symbol(s)) => {
                        self.with_condition(PathCondition::new(*s, op.swap(), *v))
                    }
                    (NonLoc::ConcreteInt(a), NonLoc::ConcreteInt(b)) => {
                        if op.evaluate(*a, *b) {
                            self.with_feasibility(PathFeasibility::Feasible)
                        } else {
                            self.with_feasibility(PathFeasibility::Infeasible)
                        }
                    }
                    _ => self.with_opaque(condition),
                }
            }
        }
    }

    fn feasibility(&self) -> PathFeasibility {
        self.feasibility
    }
}
