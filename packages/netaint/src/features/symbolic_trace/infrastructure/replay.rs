/*
 * Trace Replay Engine
 *
 * Drives registered checkers over recorded paths:
 *
 * ```text
 * Call   ──► PreCall ──► PostCall
 * Access ──► Location
 * Branch ──► assume(condition, taken) ──► stop if infeasible
 * ```
 *
 * Every path starts from an empty state. A path ends at its last step, at an
 * infeasible branch, or at the first error node a checker generates.
 * Paths are replayed in parallel with rayon unless disabled in ReplayConfig.
 */

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::path_state::SimplePathState;
use super::sval_builder::SimpleSValBuilder;
use crate::config::ReplayConfig;
use crate::features::smt::infrastructure::PathFeasibility;
use crate::features::symbolic_trace::domain::{
    AnalysisReport, PathId, PathOutcome, PathTermination, PathTrace, ProgramTrace, TraceEvent,
};
use crate::features::taint_analysis::infrastructure::CheckerRegistry;
use crate::features::taint_analysis::ports::{
    BugReport, CallEvent, CheckerContext, CheckerEvent, ErrorNode, LocationEvent, PathState,
    SValBuilder,
};
use crate::shared::models::ProgramPoint;

// ============================================================================
// Per-path checker context
// ============================================================================

/// Engine side of one path while it is being replayed
#[derive(Debug)]
pub struct ReplayContext {
    path_id: PathId,
    state: SimplePathState,
    builder: SimpleSValBuilder,
    point: ProgramPoint,
    error_nodes: FxHashSet<ErrorNode>,
    reports: Vec<BugReport>,
    sunk: bool,
}

impl ReplayContext {
    pub fn new(path_id: PathId, state: SimplePathState) -> Self {
        Self {
            path_id,
            state,
            builder: SimpleSValBuilder,
            point: ProgramPoint::new("<entry>", 0, 0),
            error_nodes: FxHashSet::default(),
            reports: Vec::new(),
            sunk: false,
        }
    }

    pub fn path_id(&self) -> PathId {
        self.path_id
    }

    pub fn set_program_point(&mut self, point: ProgramPoint) {
        self.point = point;
    }

    /// Whether an error node ended this path
    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn reports(&self) -> &[BugReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<BugReport> {
        self.reports
    }
}

impl CheckerContext for ReplayContext {
    type State = SimplePathState;

    fn state(&self) -> &SimplePathState {
        &self.state
    }

    fn sval_builder(&self) -> &dyn SValBuilder {
        &self.builder
    }

    fn program_point(&self) -> &ProgramPoint {
        &self.point
    }

    fn add_transition(&mut self, state: SimplePathState) {
        self.state = state;
    }

    fn generate_error_node(
        &mut self,
        state: &SimplePathState,
        tag: &'static str,
    ) -> Option<ErrorNode> {
        let node = ErrorNode {
            point: self.point.clone(),
            tag: tag.to_string(),
        };
        if !self.error_nodes.insert(node.clone()) {
            debug!(path = self.path_id, point = %self.point, tag, "Error node already generated");
            return None;
        }
        self.state = state.clone();
        self.sunk = true;
        Some(node)
    }

    fn emit_report(&mut self, report: BugReport) {
        self.reports.push(report);
    }
}

// ============================================================================
// Replayer
// ============================================================================

pub struct TraceReplayer<'r> {
    registry: &'r CheckerRegistry<ReplayContext>,
    config: ReplayConfig,
}

impl<'r> TraceReplayer<'r> {
    pub fn new(registry: &'r CheckerRegistry<ReplayContext>, config: ReplayConfig) -> Self {
        Self { registry, config }
    }

    /// Replay every path of `trace`
    pub fn replay(&self, trace: &ProgramTrace) -> AnalysisReport {
        let outcomes: Vec<PathOutcome> = if self.config.parallel {
            trace.paths.par_iter().map(|p| self.replay_path(p)).collect()
        } else {
            trace.paths.iter().map(|p| self.replay_path(p)).collect()
        };

        let report = AnalysisReport::from_outcomes(outcomes);
        info!(
            paths = report.paths_explored,
            steps = trace.step_count(),
            infeasible = report.paths_infeasible,
            findings = report.reports.len(),
            "Trace replayed"
        );
        report
    }

    pub fn replay_path(&self, path: &PathTrace) -> PathOutcome {
        let mut ctx = ReplayContext::new(
            path.id,
            SimplePathState::new(self.config.max_constraints_per_path),
        );
        let mut termination = PathTermination::Completed;
        let mut steps_replayed = 0;

        for step in &path.steps {
            steps_replayed += 1;
            ctx.set_program_point(step.point.clone());

            match &step.event {
                TraceEvent::Call { callee, args, ret } => {
                    let call = CallEvent {
                        callee: callee.clone(),
                        args: args.clone(),
                        return_value: ret.clone(),
                    };
                    self.registry.dispatch(&CheckerEvent::PreCall(&call), &mut ctx);
                    if !ctx.is_sunk() {
                        self.registry.dispatch(&CheckerEvent::PostCall(&call), &mut ctx);
                    }
                }
                TraceEvent::Access { location, is_load } => {
                    let access = LocationEvent {
                        location: location.clone(),
                        is_load: *is_load,
                    };
                    self.registry.dispatch(&CheckerEvent::Location(&access), &mut ctx);
                }
                TraceEvent::Branch { condition, taken } => {
                    let next = ctx.state().assume(condition, *taken);
                    if next.feasibility() == PathFeasibility::Infeasible {
                        debug!(path = path.id, point = %step.point, %condition, taken, "Infeasible branch");
                        termination = PathTermination::Infeasible;
                        break;
                    }
                    ctx.add_transition(next);
                }
            }

            if ctx.is_sunk() {
                termination = PathTermination::ErrorNode;
                break;
            }
        }

        PathOutcome {
            path_id: path.id,
            termination,
            steps_replayed,
            reports: ctx.into_reports(),
        }
    }
}
