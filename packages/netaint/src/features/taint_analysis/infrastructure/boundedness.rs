//! Boundedness Oracle
//!
//! Decides whether a value is practically unconstrained on the current path.
//!
//! The real bound would be the size of the destination buffer, which is
//! usually opaque to local reasoning. Instead a fixed threshold `T` is used:
//! the value is unconstrained iff `value > T` is still satisfiable under the
//! path's constraints. A value that no branch has pinned below `T` is
//! reported even if some smaller bound holds implicitly.
//!
//! ```text
//! T      = make_int_val(threshold, width)
//! P      = value > T
//! state' = assume(state, P)
//! result = feasibility(state') == Feasible
//! ```

use tracing::trace;

use crate::config::NetworkTaintConfig;
use crate::features::smt::domain::ComparisonOp;
use crate::features::smt::infrastructure::PathFeasibility;
use crate::features::taint_analysis::ports::{PathState, SValBuilder};
use crate::shared::models::SVal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundednessOracle {
    threshold: u64,
    bit_width: u32,
}

impl BoundednessOracle {
    pub fn new(threshold: u64, bit_width: u32) -> Self {
        Self {
            threshold,
            bit_width,
        }
    }

    pub fn from_config(config: &NetworkTaintConfig) -> Self {
        Self::new(config.threshold, config.threshold_bit_width)
    }

    /// Whether `value > threshold` is satisfiable in `state`.
    ///
    /// Values without a numeric interpretation are treated as constrained, and
    /// so is any query the solver cannot decide.
    pub fn is_unconstrained<S: PathState>(
        &self,
        value: &SVal,
        builder: &dyn SValBuilder,
        state: &S,
    ) -> bool {
        let Some(value) = value.as_non_loc() else {
            trace!("operand {} is not numeric, treating as constrained", value);
            return false;
        };

        let threshold = builder.make_int_val(self.threshold, self.bit_width);
        let Some(threshold) = threshold.as_non_loc() else {
            trace!("threshold {} not representable in {} bits", self.threshold, self.bit_width);
            return false;
        };

        let exceeds = builder.eval_comparison(ComparisonOp::Gt, value, threshold);
        let Some(exceeds) = exceeds.as_non_loc() else {
            trace!("operand {} cannot be compared against threshold", value);
            return false;
        };

        match state.assume(exceeds, true).feasibility() {
            PathFeasibility::Feasible => true,
            PathFeasibility::Infeasible => false,
            PathFeasibility::Unknown => {
                trace!("solver could not decide {}, treating as constrained", exceeds);
                false
            }
        }
    }
}

impl Default for BoundednessOracle {
    fn default() -> Self {
        Self::from_config(&NetworkTaintConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic_trace::infrastructure::{SimplePathState, SimpleSValBuilder};
    use crate::shared::models::{MemRegion, NonLoc, SymbolId};

    fn bounded_by(op: ComparisonOp, bound: i64) -> SimplePathState {
        let cond = NonLoc::compare(NonLoc::Symbol(SymbolId(0)), op, NonLoc::ConcreteInt(bound));
        SimplePathState::default().assume(&cond, true)
    }

    #[test]
    fn test_fresh_symbol_is_unconstrained() {
        let oracle = BoundednessOracle::default();
        assert!(oracle.is_unconstrained(
            &SVal::symbol(0),
            &SimpleSValBuilder,
            &SimplePathState::default()
        ));
    }

    #[test]
    fn test_bound_below_threshold_constrains() {
        let oracle = BoundednessOracle::default();
        let state = bounded_by(ComparisonOp::Le, 100);
        assert!(!oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state));
    }

    #[test]
    fn test_bound_at_threshold_constrains() {
        let oracle = BoundednessOracle::default();
        let state = bounded_by(ComparisonOp::Le, 5000);
        assert!(!oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state));

        let state = bounded_by(ComparisonOp::Le, 5001);
        assert!(oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state));
    }

    #[test]
    fn test_lower_bound_does_not_constrain() {
        let oracle = BoundednessOracle::default();
        let state = bounded_by(ComparisonOp::Ge, 0);
        assert!(oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state));
    }

    #[test]
    fn test_pointer_operand_is_constrained() {
        let oracle = BoundednessOracle::default();
        let ptr = SVal::region(MemRegion::Symbolic { symbol: SymbolId(0) });
        assert!(!oracle.is_unconstrained(&ptr, &SimpleSValBuilder, &SimplePathState::default()));
        assert!(!oracle.is_unconstrained(
            &SVal::Unknown,
            &SimpleSValBuilder,
            &SimplePathState::default()
        ));
    }

    #[test]
    fn test_unrepresentable_threshold_is_constrained() {
        let oracle = BoundednessOracle::new(5000, 8);
        assert!(!oracle.is_unconstrained(
            &SVal::symbol(0),
            &SimpleSValBuilder,
            &SimplePathState::default()
        ));
    }

    fn le(symbol: u32, bound: i64) -> NonLoc {
        NonLoc::compare(
            NonLoc::Symbol(SymbolId(symbol)),
            ComparisonOp::Le,
            NonLoc::ConcreteInt(bound),
        )
    }

    #[test]
    fn test_solver_unknown_fails_closed() {
        let oracle = BoundednessOracle::default();
        // Budget of one constraint, spent on sym#1; the bound on sym#0 is dropped.
        let state = SimplePathState::new(1).assume(&le(1, 10), true).assume(&le(0, 100), true);
        assert!(!oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state));
    }

    #[test]
    fn test_exhausted_budget_still_answers_for_fresh_symbol() {
        let oracle = BoundednessOracle::default();
        let state = SimplePathState::new(1).assume(&le(1, 10), true);
        assert!(oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state));
    }

    #[test]
    fn test_symbol_pair_on_other_symbols_does_not_mask_query() {
        let oracle = BoundednessOracle::default();
        let pair = NonLoc::compare(
            NonLoc::Symbol(SymbolId(5)),
            ComparisonOp::Lt,
            NonLoc::Symbol(SymbolId(6)),
        );
        let state = SimplePathState::default().assume(&pair, true);

        assert!(oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state));
        assert!(!oracle.is_unconstrained(&SVal::symbol(5), &SimpleSValBuilder, &state));
    }

    #[test]
    fn test_query_is_deterministic() {
        let oracle = BoundednessOracle::default();
        let state = bounded_by(ComparisonOp::Lt, 9000);
        let first = oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state);
        for _ in 0..10 {
            assert_eq!(
                oracle.is_unconstrained(&SVal::symbol(0), &SimpleSValBuilder, &state),
                first
            );
        }
    }
}
