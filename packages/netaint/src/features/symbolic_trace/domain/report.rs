//! Replay results

use serde::{Deserialize, Serialize};

use super::trace::PathId;
use crate::features::taint_analysis::domain::{Finding, SinkClass};
use crate::features::taint_analysis::ports::BugReport;

/// How replay of a path ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathTermination {
    /// All steps replayed
    Completed,
    /// A branch contradicted the path's constraints
    Infeasible,
    /// A checker generated an error node
    ErrorNode,
}

/// Result of replaying one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOutcome {
    pub path_id: PathId,
    pub termination: PathTermination,
    pub steps_replayed: usize,
    pub reports: Vec<BugReport>,
}

/// A bug report and the path it was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub path_id: PathId,
    #[serde(flatten)]
    pub report: BugReport,
}

/// Findings of one trace, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub reports: Vec<PathReport>,
    pub paths_explored: usize,
    pub paths_infeasible: usize,
    pub paths_with_errors: usize,
}

impl AnalysisReport {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = PathOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            report.paths_explored += 1;
            match outcome.termination {
                PathTermination::Completed => {}
                PathTermination::Infeasible => report.paths_infeasible += 1,
                PathTermination::ErrorNode => report.paths_with_errors += 1,
            }
            let path_id = outcome.path_id;
            report
                .reports
                .extend(outcome.reports.into_iter().map(|report| PathReport { path_id, report }));
        }
        report
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.reports.iter().map(|r| &r.report.finding)
    }

    pub fn count_of(&self, sink_class: SinkClass) -> usize {
        self.findings().filter(|f| f.sink_class == sink_class).count()
    }

    pub fn is_clean(&self) -> bool {
        self.reports.is_empty()
    }
}
