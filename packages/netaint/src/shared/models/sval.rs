//! Symbolic Values
//!
//! Per-path handles to values at a program point. The checker only queries and
//! compares these, it never mutates them.
//!
//! ```text
//! SVal
//! ├── NonLoc    # numeric: concrete int, symbol, comparison
//! ├── Loc       # address: memory region or null
//! ├── Unknown   # engine could not model the value
//! └── Undefined # uninitialized / garbage
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::features::smt::domain::ComparisonOp;

/// Symbol identifier, unique within one analyzed program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sym#{}", self.0)
    }
}

/// Symbolic value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SVal {
    /// Numeric (non-location) value
    NonLoc(NonLoc),
    /// Location (pointer) value
    Loc(Loc),
    /// Value the engine could not model
    Unknown,
    /// Uninitialized value
    Undefined,
}

impl SVal {
    /// Concrete integer value
    pub fn int(value: i64) -> Self {
        SVal::NonLoc(NonLoc::ConcreteInt(value))
    }

    /// Symbolic integer value
    pub fn symbol(id: u32) -> Self {
        SVal::NonLoc(NonLoc::Symbol(SymbolId(id)))
    }

    /// Pointer to a memory region
    pub fn region(region: MemRegion) -> Self {
        SVal::Loc(Loc::Region(region))
    }

    /// Pointer to `base[index]`
    pub fn element(base: MemRegion, index: SVal) -> Self {
        SVal::region(MemRegion::element(base, index))
    }

    /// Numeric view of this value, if it has one
    pub fn as_non_loc(&self) -> Option<&NonLoc> {
        match self {
            SVal::NonLoc(nl) => Some(nl),
            _ => None,
        }
    }

    /// Region this value points to, if it is a region location
    pub fn as_region(&self) -> Option<&MemRegion> {
        match self {
            SVal::Loc(Loc::Region(region)) => Some(region),
            _ => None,
        }
    }

    /// The symbol this value directly stands for.
    ///
    /// A symbolic region location yields its base symbol; expressions and
    /// concrete values yield `None`.
    pub fn as_symbol(&self) -> Option<SymbolId> {
        match self {
            SVal::NonLoc(NonLoc::Symbol(sym)) => Some(*sym),
            SVal::Loc(Loc::Region(MemRegion::Symbolic { symbol })) => Some(*symbol),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, SVal::Undefined)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SVal::Unknown)
    }

    /// All symbols this value depends on
    pub fn symbols(&self) -> Vec<SymbolId> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut Vec<SymbolId>) {
        match self {
            SVal::NonLoc(nl) => nl.collect_symbols(out),
            SVal::Loc(Loc::Region(region)) => region.collect_symbols(out),
            SVal::Loc(Loc::Null) | SVal::Unknown | SVal::Undefined => {}
        }
    }
}

impl From<NonLoc> for SVal {
    fn from(value: NonLoc) -> Self {
        SVal::NonLoc(value)
    }
}

impl fmt::Display for SVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SVal::NonLoc(nl) => write!(f, "{}", nl),
            SVal::Loc(loc) => write!(f, "{}", loc),
            SVal::Unknown => write!(f, "unknown"),
            SVal::Undefined => write!(f, "undefined"),
        }
    }
}

/// Numeric symbolic value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonLoc {
    /// Known integer
    ConcreteInt(i64),
    /// Opaque symbol (e.g. the return value of a call)
    Symbol(SymbolId),
    /// Boolean result of `lhs <op> rhs`
    Compare {
        lhs: Box<NonLoc>,
        op: ComparisonOp,
        rhs: Box<NonLoc>,
    },
}

impl NonLoc {
    /// Build `lhs <op> rhs`
    pub fn compare(lhs: NonLoc, op: ComparisonOp, rhs: NonLoc) -> Self {
        NonLoc::Compare {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn as_concrete_int(&self) -> Option<i64> {
        match self {
            NonLoc::ConcreteInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this value can be ordered against an integer
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, NonLoc::ConcreteInt(_) | NonLoc::Symbol(_))
    }

    /// All symbols this value depends on
    pub fn symbols(&self) -> Vec<SymbolId> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut Vec<SymbolId>) {
        match self {
            NonLoc::ConcreteInt(_) => {}
            NonLoc::Symbol(sym) => out.push(*sym),
            NonLoc::Compare { lhs, rhs, .. } => {
                lhs.collect_symbols(out);
                rhs.collect_symbols(out);
            }
        }
    }
}

impl fmt::Display for NonLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonLoc::ConcreteInt(v) => write!(f, "{}", v),
            NonLoc::Symbol(sym) => write!(f, "{}", sym),
            NonLoc::Compare { lhs, op, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

/// Location value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loc {
    Region(MemRegion),
    Null,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loc::Region(region) => write!(f, "&{}", region),
            Loc::Null => write!(f, "null"),
        }
    }
}

/// Memory region model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemRegion {
    /// Storage of a named variable
    Var { name: String },
    /// Memory pointed to by a symbolic pointer
    Symbolic { symbol: SymbolId },
    /// `base[index]`
    Element { base: Box<MemRegion>, index: Box<SVal> },
}

impl MemRegion {
    pub fn var(name: impl Into<String>) -> Self {
        MemRegion::Var { name: name.into() }
    }

    pub fn element(base: MemRegion, index: SVal) -> Self {
        MemRegion::Element {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    /// Index of an element region
    pub fn element_index(&self) -> Option<&SVal> {
        match self {
            MemRegion::Element { index, .. } => Some(&**index),
            _ => None,
        }
    }

    fn collect_symbols(&self, out: &mut Vec<SymbolId>) {
        match self {
            MemRegion::Var { .. } => {}
            MemRegion::Symbolic { symbol } => out.push(*symbol),
            MemRegion::Element { base, index } => {
                base.collect_symbols(out);
                index.collect_symbols(out);
            }
        }
    }
}

impl fmt::Display for MemRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemRegion::Var { name } => write!(f, "{}", name),
            MemRegion::Symbolic { symbol } => write!(f, "*{}", symbol),
            MemRegion::Element { base, index } => write!(f, "{}[{}]", base, index),
        }
    }
}
