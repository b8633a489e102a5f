//! Path Condition Domain Models
//!
//! Represents integer constraints on symbols along an execution path.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::SymbolId;

/// Comparison operators for path conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    /// Equal (==)
    #[default]
    Eq,
    /// Not equal (!=)
    Neq,
    /// Less than (<)
    Lt,
    /// Greater than (>)
    Gt,
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
}

impl ComparisonOp {
    /// Operator holding exactly when `self` does not: `!(a < b)` is `a >= b`
    pub fn negate(self) -> Self {
        match self {
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
            Self::Lt => Self::Ge,
            Self::Gt => Self::Le,
            Self::Le => Self::Gt,
            Self::Ge => Self::Lt,
        }
    }

    /// Operator for swapped operands: `a < b` is `b > a`
    pub fn swap(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Neq => Self::Neq,
            Self::Lt => Self::Gt,
            Self::Gt => Self::Lt,
            Self::Le => Self::Ge,
            Self::Ge => Self::Le,
        }
    }

    /// Evaluate on two integers
    pub fn evaluate(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Neq => lhs != rhs,
            Self::Lt => lhs < rhs,
            Self::Gt => lhs > rhs,
            Self::Le => lhs <= rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "=="),
            Self::Neq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::Le => write!(f, "<="),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// `symbol <op> bound`, one constraint along an execution path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathCondition {
    /// Symbol being constrained
    pub symbol: SymbolId,

    /// Comparison operator
    pub op: ComparisonOp,

    /// Integer bound
    pub bound: i64,
}

impl PathCondition {
    /// Create new path condition
    pub fn new(symbol: SymbolId, op: ComparisonOp, bound: i64) -> Self {
        Self { symbol, op, bound }
    }

    /// Create less than or equal condition: symbol <= bound
    pub fn le(symbol: SymbolId, bound: i64) -> Self {
        Self::new(symbol, ComparisonOp::Le, bound)
    }

    /// Create greater than condition: symbol > bound
    pub fn gt(symbol: SymbolId, bound: i64) -> Self {
        Self::new(symbol, ComparisonOp::Gt, bound)
    }

    /// Create less than condition: symbol < bound
    pub fn lt(symbol: SymbolId, bound: i64) -> Self {
        Self::new(symbol, ComparisonOp::Lt, bound)
    }

    /// Create equality condition: symbol == bound
    pub fn eq(symbol: SymbolId, bound: i64) -> Self {
        Self::new(symbol, ComparisonOp::Eq, bound)
    }

    /// Create inequality condition: symbol != bound
    pub fn neq(symbol: SymbolId, bound: i64) -> Self {
        Self::new(symbol, ComparisonOp::Neq, bound)
    }

    /// Negated condition
    pub fn negate(&self) -> Self {
        Self::new(self.symbol, self.op.negate(), self.bound)
    }

    /// Evaluate condition for a concrete value of the symbol
    pub fn evaluate(&self, value: i64) -> bool {
        self.op.evaluate(value, self.bound)
    }
}

impl fmt::Display for PathCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.symbol, self.op, self.bound)
    }
}
