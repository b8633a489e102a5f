//! Value construction for the trace engine

use crate::features::smt::domain::ComparisonOp;
use crate::features::taint_analysis::ports::SValBuilder;
use crate::shared::models::{NonLoc, SVal};

/// Builds concrete integers and comparison values; folds comparisons of two
/// constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSValBuilder;

impl SValBuilder for SimpleSValBuilder {
    fn make_int_val(&self, value: u64, bit_width: u32) -> SVal {
        if bit_width == 0 || bit_width > 64 {
            return SVal::Unknown;
        }
        if bit_width < 64 && value >> bit_width != 0 {
            return SVal::Unknown;
        }
        i64::try_from(value).map_or(SVal::Unknown, SVal::int)
    }

    fn eval_comparison(&self, op: ComparisonOp, lhs: &NonLoc, rhs: &NonLoc) -> SVal {
        if !lhs.is_arithmetic() || !rhs.is_arithmetic() {
            return SVal::Unknown;
        }
        match (lhs.as_concrete_int(), rhs.as_concrete_int()) {
            (Some(a), Some(b)) => SVal::int(i64::from(op.evaluate(a, b))),
            _ => NonLoc::compare(lhs.clone(), op, rhs.clone()).into(),
        }
    }
}
