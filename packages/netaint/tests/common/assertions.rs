//! Report assertions

use netaint::{AnalysisReport, SinkClass};

pub fn assert_clean(report: &AnalysisReport) {
    assert!(
        report.is_clean(),
        "Expected no findings, got: {:?}",
        report.findings().map(ToString::to_string).collect::<Vec<_>>()
    );
}

pub fn assert_findings(report: &AnalysisReport, sink_class: SinkClass, expected: usize) {
    assert_eq!(
        report.count_of(sink_class),
        expected,
        "Expected {expected} {sink_class} findings, got: {:?}",
        report.findings().map(ToString::to_string).collect::<Vec<_>>()
    );
}

/// Exactly one finding in total, of `sink_class`
pub fn assert_single_finding(report: &AnalysisReport, sink_class: SinkClass) {
    assert_eq!(report.reports.len(), 1, "Expected exactly one finding: {:?}", report.reports);
    assert_findings(report, sink_class, 1);
}
