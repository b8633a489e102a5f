//! Program point: where in the analyzed program an event happens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source position of an event along an explored path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramPoint {
    /// Enclosing function
    pub function: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    #[serde(default)]
    pub column: u32,
}

impl ProgramPoint {
    pub fn new(function: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            function: function.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for ProgramPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.function, self.line, self.column)
    }
}
