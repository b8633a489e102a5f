//! Taint source registry
//!
//! Fixed set of callees whose return value is attacker controlled. Matching is
//! exact: no prefixes, no patterns.

use std::collections::BTreeSet;

use crate::config::DEFAULT_TAINT_SOURCES;

/// Callees whose return value introduces taint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaintSourceRegistry {
    names: BTreeSet<String>,
}

impl Default for TaintSourceRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TAINT_SOURCES.iter().copied())
    }
}

impl TaintSourceRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a call to `callee` returns tainted data
    pub fn is_taint_source(&self, callee: &str) -> bool {
        self.names.contains(callee)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
