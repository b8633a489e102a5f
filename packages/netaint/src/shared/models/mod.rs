//! Shared domain models
//!
//! Symbolic values and program points exchanged between the engine and
//! the checkers.

pub mod program_point;
pub mod sval;

pub use program_point::ProgramPoint;
pub use sval::{Loc, MemRegion, NonLoc, SVal, SymbolId};
