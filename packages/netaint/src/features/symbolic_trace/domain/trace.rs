//! Symbolic execution traces
//!
//! A trace is the already-explored path set of one analyzed function, with
//! symbolic values resolved. Paths are independent: each starts from an empty
//! state and no state flows between them.
//!
//! JSON form:
//!
//! ```json
//! {
//!   "paths": [
//!     {
//!       "id": 0,
//!       "steps": [
//!         { "point": { "function": "f", "line": 3 },
//!           "event": "call", "callee": "ntohl",
//!           "args": [ { "non_loc": { "symbol": 1 } } ],
//!           "ret":  { "non_loc": { "symbol": 2 } } }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{NetaintError, Result};
use crate::shared::models::{NonLoc, ProgramPoint, SVal};

pub type PathId = u32;

/// Explored paths of one function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramTrace {
    #[serde(default)]
    pub paths: Vec<PathTrace>,
}

impl ProgramTrace {
    pub fn new(paths: Vec<PathTrace>) -> Self {
        Self { paths }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let trace: Self = serde_json::from_str(content)?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let trace: Self = serde_yaml::from_str(content)?;
        trace.validate()?;
        Ok(trace)
    }

    /// Load a trace, format chosen by extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "yaml" | "yml" => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            _ => Err(NetaintError::UnsupportedTraceFormat(path.display().to_string())),
        }
    }

    /// Path ids must be unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = rustc_hash::FxHashSet::default();
        for path in &self.paths {
            if !seen.insert(path.id) {
                return Err(NetaintError::trace(format!("duplicate path id {}", path.id)));
            }
        }
        Ok(())
    }

    pub fn step_count(&self) -> usize {
        self.paths.iter().map(|p| p.steps.len()).sum()
    }
}

/// One explored path, steps in execution order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathTrace {
    pub id: PathId,
    #[serde(default)]
    pub steps: Vec<TraceStep>,
}

impl PathTrace {
    pub fn builder(id: PathId, function: impl Into<String>) -> PathTraceBuilder {
        PathTraceBuilder::new(id, function)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub point: ProgramPoint,
    #[serde(flatten)]
    pub event: TraceEvent,
}

/// What happened at a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Call with its arguments and the value it returned
    Call {
        #[serde(default)]
        callee: Option<String>,
        #[serde(default)]
        args: Vec<SVal>,
        #[serde(default = "unknown_sval")]
        ret: SVal,
    },
    /// Load or store through `location`
    Access {
        location: SVal,
        #[serde(default)]
        is_load: bool,
    },
    /// Conditional branch; `taken` is the outcome this path followed
    Branch { condition: NonLoc, taken: bool },
}

fn unknown_sval() -> SVal {
    SVal::Unknown
}

/// Builds a path one event per line of a single function
#[derive(Debug, Clone)]
pub struct PathTraceBuilder {
    id: PathId,
    function: String,
    line: u32,
    steps: Vec<TraceStep>,
}

impl PathTraceBuilder {
    pub fn new(id: PathId, function: impl Into<String>) -> Self {
        Self {
            id,
            function: function.into(),
            line: 1,
            steps: Vec::new(),
        }
    }

    /// Line of the next step; later steps continue from here
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn call(self, callee: impl Into<String>, args: Vec<SVal>, ret: SVal) -> Self {
        self.step(TraceEvent::Call {
            callee: Some(callee.into()),
            args,
            ret,
        })
    }

    pub fn indirect_call(self, args: Vec<SVal>, ret: SVal) -> Self {
        self.step(TraceEvent::Call {
            callee: None,
            args,
            ret,
        })
    }

    pub fn load(self, location: SVal) -> Self {
        self.step(TraceEvent::Access {
            location,
            is_load: true,
        })
    }

    pub fn store(self, location: SVal) -> Self {
        self.step(TraceEvent::Access {
            location,
            is_load: false,
        })
    }

    pub fn branch(self, condition: NonLoc, taken: bool) -> Self {
        self.step(TraceEvent::Branch { condition, taken })
    }

    /// Append `event` at the current line and advance
    pub fn step(mut self, event: TraceEvent) -> Self {
        self.steps.push(TraceStep {
            point: ProgramPoint::new(self.function.clone(), self.line, 1),
            event,
        });
        self.line += 1;
        self
    }

    pub fn build(self) -> PathTrace {
        PathTrace {
            id: self.id,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_assigns_lines() {
        let path = PathTrace::builder(3, "f")
            .call("ntohl", vec![], SVal::symbol(0))
            .at_line(10)
            .load(SVal::Unknown)
            .load(SVal::Unknown)
            .build();

        let lines: Vec<u32> = path.steps.iter().map(|s| s.point.line).collect();
        assert_eq!(lines, vec![1, 10, 11]);
        assert_eq!(path.id, 3);

        let empty = PathTrace::builder(4, "g").build();
        assert_eq!(ProgramTrace::new(vec![path, empty]).step_count(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let trace = ProgramTrace::new(vec![PathTrace::builder(0, "f")
            .call("ntohs", vec![SVal::symbol(1)], SVal::symbol(2))
            .branch(NonLoc::Symbol(crate::shared::models::SymbolId(2)), true)
            .build()]);

        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"event\":\"call\""));
        assert_eq!(ProgramTrace::from_json_str(&json).unwrap(), trace);
    }

    #[test]
    fn test_call_defaults() {
        let json = r#"{"paths":[{"id":0,"steps":[
            {"point":{"function":"f","line":1},"event":"call","callee":"ntohl"}
        ]}]}"#;
        let trace = ProgramTrace::from_json_str(json).unwrap();

        match &trace.paths[0].steps[0].event {
            TraceEvent::Call { args, ret, .. } => {
                assert!(args.is_empty());
                assert!(ret.is_unknown());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_path_ids_rejected() {
        let json = r#"{"paths":[{"id":1},{"id":1}]}"#;
        let err = ProgramTrace::from_json_str(json).unwrap_err();
        assert!(matches!(err, NetaintError::Trace(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ProgramTrace::from_path("trace.txt").unwrap_err();
        assert!(matches!(err, NetaintError::UnsupportedTraceFormat(_)));
    }
}
