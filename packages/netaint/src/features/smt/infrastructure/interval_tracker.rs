//! Interval Tracker - Range-based constraint tracking
//!
//! Tracks the feasible integer range of each symbol to detect contradictions.
//! Bounds are closed: `x > 5` is stored as `x >= 6`.
//!
//! # Examples
//!
//! ```rust
//! use netaint::features::smt::domain::PathCondition;
//! use netaint::features::smt::infrastructure::{IntervalTracker, PathFeasibility};
//! use netaint::SymbolId;
//!
//! let mut tracker = IntervalTracker::new();
//! let x = SymbolId(0);
//!
//! assert_eq!(tracker.add_constraint(&PathCondition::le(x, 100)), PathFeasibility::Feasible);
//! assert_eq!(tracker.add_constraint(&PathCondition::gt(x, 5000)), PathFeasibility::Infeasible);
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

use super::PathFeasibility;
use crate::features::smt::domain::{ComparisonOp, PathCondition};
use crate::shared::models::SymbolId;

/// Default budget of constraints per tracker
pub const DEFAULT_MAX_CONSTRAINTS: usize = 64;

/// Closed integer interval [lower, upper], `None` meaning unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntInterval {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl IntInterval {
    /// (-∞, +∞)
    pub fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// [lower, upper]
    pub fn bounded(lower: i64, upper: i64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// [lower, +∞)
    pub fn at_least(lower: i64) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// (-∞, upper]
    pub fn at_most(upper: i64) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }

    /// Canonical empty interval
    pub fn empty() -> Self {
        Self::bounded(1, 0)
    }

    pub fn is_empty(&self) -> bool {
        matches!((self.lower, self.upper), (Some(l), Some(u)) if l > u)
    }

    /// Single member, if the interval pins the value
    pub fn singleton(&self) -> Option<i64> {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) if l == u => Some(l),
            _ => None,
        }
    }

    pub fn intersect(&self, other: &IntInterval) -> IntInterval {
        let lower = match (self.lower, other.lower) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let upper = match (self.upper, other.upper) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        IntInterval { lower, upper }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lower.map_or(true, |l| value >= l) && self.upper.map_or(true, |u| value <= u)
    }

    /// Interval of values satisfying `cond`; `None` when `!=` (not an interval)
    pub fn from_condition(cond: &PathCondition) -> Option<Self> {
        let v = cond.bound;
        Some(match cond.op {
            ComparisonOp::Eq => Self::bounded(v, v),
            ComparisonOp::Neq => return None,
            ComparisonOp::Lt => v.checked_sub(1).map_or_else(Self::empty, Self::at_most),
            ComparisonOp::Le => Self::at_most(v),
            ComparisonOp::Gt => v.checked_add(1).map_or_else(Self::empty, Self::at_least),
            ComparisonOp::Ge => Self::at_least(v),
        })
    }
}

/// Interval-based constraint tracker
///
/// Symbols are independent, so a verdict only depends on the constrained
/// symbol. A symbol becomes opaque once a constraint on it could not be
/// recorded; later verdicts on it are `Unknown` unless the recorded bounds
/// already contradict.
#[derive(Debug, Clone)]
pub struct IntervalTracker {
    /// Symbol intervals
    intervals: FxHashMap<SymbolId, IntInterval>,
    /// Points excluded by `!=` constraints
    excluded: FxHashMap<SymbolId, FxHashSet<i64>>,
    /// Symbols with constraints the tracker dropped
    opaque: FxHashSet<SymbolId>,
    /// Constraints recorded so far
    constraint_count: usize,
    /// Budget of recorded constraints
    max_constraints: usize,
}

impl Default for IntervalTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalTracker {
    /// Create new interval tracker
    pub fn new() -> Self {
        Self::with_max_constraints(DEFAULT_MAX_CONSTRAINTS)
    }

    pub fn with_max_constraints(max_constraints: usize) -> Self {
        Self {
            intervals: FxHashMap::default(),
            excluded: FxHashMap::default(),
            opaque: FxHashSet::default(),
            constraint_count: 0,
            max_constraints,
        }
    }

    /// Add constraint to tracker
    ///
    /// Returns the verdict of `cond` against the constraints recorded so far.
    /// Past the budget the constraint is still decided but not recorded, and
    /// its symbol becomes opaque.
    pub fn add_constraint(&mut self, cond: &PathCondition) -> PathFeasibility {
        let verdict = self.check(cond);

        if self.constraint_count >= self.max_constraints {
            self.opaque.insert(cond.symbol);
            return verdict;
        }
        self.constraint_count += 1;

        match IntInterval::from_condition(cond) {
            Some(new_interval) => {
                let current = self
                    .intervals
                    .entry(cond.symbol)
                    .or_insert_with(IntInterval::unbounded);
                *current = current.intersect(&new_interval);
            }
            None => {
                self.excluded.entry(cond.symbol).or_default().insert(cond.bound);
            }
        }

        verdict
    }

    /// Decide `cond` without recording it
    pub fn check(&self, cond: &PathCondition) -> PathFeasibility {
        if self.contradicts(cond) {
            PathFeasibility::Infeasible
        } else if self.opaque.contains(&cond.symbol) {
            PathFeasibility::Unknown
        } else {
            PathFeasibility::Feasible
        }
    }

    fn contradicts(&self, cond: &PathCondition) -> bool {
        let current = self.interval(cond.symbol);
        let Some(new_interval) = IntInterval::from_condition(cond) else {
            return current.singleton() == Some(cond.bound);
        };

        let merged = current.intersect(&new_interval);
        if merged.is_empty() {
            return true;
        }
        match (merged.singleton(), self.excluded.get(&cond.symbol)) {
            (Some(v), Some(excluded)) => excluded.contains(&v),
            _ => false,
        }
    }

    /// Record that `symbols` carry constraints the tracker cannot express
    pub fn mark_opaque(&mut self, symbols: impl IntoIterator<Item = SymbolId>) {
        self.opaque.extend(symbols);
    }

    pub fn is_opaque(&self, symbol: SymbolId) -> bool {
        self.opaque.contains(&symbol)
    }

    /// Current interval of a symbol (unbounded if never constrained)
    pub fn interval(&self, symbol: SymbolId) -> IntInterval {
        self.intervals
            .get(&symbol)
            .copied()
            .unwrap_or_else(IntInterval::unbounded)
    }

    /// Number of constrained symbols
    pub fn var_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraint_count
    }
}
