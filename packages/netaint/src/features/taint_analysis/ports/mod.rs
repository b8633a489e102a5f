/*
 * Taint Analysis Ports (Hexagonal Architecture)
 *
 * Boundary between the checker and the symbolic-execution engine driving it.
 *
 * Architecture:
 * ```
 *                    +-------------------------+
 *                    |  Symbolic Exec Engine   |
 *                    | (paths, solver, regions)|
 *                    +------------+------------+
 *                                 |  CheckerEvent (PreCall / PostCall / Location)
 *                    +------------v------------+
 *                    |    CheckerRegistry      | ← dispatch table per EventKind
 *                    +------------+------------+
 *                                 |
 *                    +------------v------------+
 *                    |   NetworkTaintChecker   |
 *                    +------------+------------+
 *                                 |  PathState / SValBuilder / CheckerContext
 *                    +------------v------------+
 *                    |  Engine implementation  |
 *                    +-------------------------+
 * ```
 *
 * The engine owns path states. A state is never mutated in place: taint marks
 * and assumptions return a new state, and the engine threads the latest one
 * forward along the path.
 */

use serde::{Deserialize, Serialize};

use super::domain::Finding;
use crate::features::smt::domain::ComparisonOp;
use crate::features::smt::infrastructure::PathFeasibility;
use crate::shared::models::{NonLoc, ProgramPoint, SVal, SymbolId};

// ============================================================================
// Output Ports (implemented by the engine)
// ============================================================================

/// Constraints and taint marks of one explored path
pub trait PathState: Clone + Send + Sync {
    /// Whether `value` depends on a tainted symbol on this path
    fn is_tainted(&self, value: &SVal) -> bool;

    /// New state with `symbol` in the taint set
    fn add_taint(&self, symbol: SymbolId) -> Self;

    /// New state with `condition` assumed to evaluate to `assumption`
    fn assume(&self, condition: &NonLoc, assumption: bool) -> Self;

    /// Verdict of the most recent assumption; `Infeasible` once any
    /// assumption contradicted the path
    fn feasibility(&self) -> PathFeasibility;
}

/// Value construction
pub trait SValBuilder: Send + Sync {
    /// Integer constant of the given width; `Unknown` if it does not fit
    fn make_int_val(&self, value: u64, bit_width: u32) -> SVal;

    /// `lhs <op> rhs` as a condition value; `Unknown` if not comparable
    fn eval_comparison(&self, op: ComparisonOp, lhs: &NonLoc, rhs: &NonLoc) -> SVal;
}

/// Terminal node of a path on which a bug was found
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorNode {
    pub point: ProgramPoint,
    pub tag: String,
}

/// A finding attached to the error node it was reported on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReport {
    pub node: ErrorNode,
    pub finding: Finding,
}

/// What a checker callback sees of the engine
pub trait CheckerContext {
    type State: PathState;

    /// Current state of the path
    fn state(&self) -> &Self::State;

    fn sval_builder(&self) -> &dyn SValBuilder;

    /// Point of the event being checked
    fn program_point(&self) -> &ProgramPoint;

    /// Continue exploring this path from `state`
    fn add_transition(&mut self, state: Self::State);

    /// Error node for the current point, or `None` if this path already has
    /// one with the same tag here
    fn generate_error_node(&mut self, state: &Self::State, tag: &'static str) -> Option<ErrorNode>;

    fn emit_report(&mut self, report: BugReport);
}

// ============================================================================
// Events (delivered by the engine)
// ============================================================================

/// A function call, seen before entry and after return
#[derive(Debug, Clone, PartialEq)]
pub struct CallEvent {
    /// Callee identifier; `None` for indirect calls
    pub callee: Option<String>,
    pub args: Vec<SVal>,
    /// Return value (meaningful after return)
    pub return_value: SVal,
}

impl CallEvent {
    pub fn new(callee: impl Into<String>, args: Vec<SVal>, return_value: SVal) -> Self {
        Self {
            callee: Some(callee.into()),
            args,
            return_value,
        }
    }

    pub fn callee_identifier(&self) -> Option<&str> {
        self.callee.as_deref()
    }

    /// Argument value, `Unknown` if the call has fewer arguments
    pub fn arg_sval(&self, index: usize) -> SVal {
        self.args.get(index).cloned().unwrap_or(SVal::Unknown)
    }

    pub fn num_args(&self) -> usize {
        self.args.len()
    }

    pub fn return_value(&self) -> &SVal {
        &self.return_value
    }
}

/// A load from or store to a location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationEvent {
    pub location: SVal,
    pub is_load: bool,
}

/// Closed set of events checkers can subscribe to
#[derive(Debug, Clone, Copy)]
pub enum CheckerEvent<'a> {
    PreCall(&'a CallEvent),
    PostCall(&'a CallEvent),
    Location(&'a LocationEvent),
}

impl CheckerEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            CheckerEvent::PreCall(_) => EventKind::PreCall,
            CheckerEvent::PostCall(_) => EventKind::PostCall,
            CheckerEvent::Location(_) => EventKind::Location,
        }
    }
}

/// Discriminant of [`CheckerEvent`], key of the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PreCall,
    PostCall,
    Location,
}
