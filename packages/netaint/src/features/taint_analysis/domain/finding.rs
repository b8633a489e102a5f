//! Finding: one diagnostic emitted at a sink

use serde::{Deserialize, Serialize};
use std::fmt;

use super::sink::{SinkClass, SinkSite};
use crate::shared::models::ProgramPoint;

/// A tainted, unconstrained value reaching a sink
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// Registered name of the reporting checker
    pub checker: String,
    pub sink_class: SinkClass,
    /// Human-readable description of the issue
    pub message: String,
    pub point: ProgramPoint,
}

impl Finding {
    /// Create the finding for a sink site
    pub fn at_site(checker: impl Into<String>, site: &SinkSite) -> Self {
        Self {
            checker: checker.into(),
            sink_class: site.class,
            message: site.class.message().to_string(),
            point: site.point.clone(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.point, self.message, self.checker)
    }
}
