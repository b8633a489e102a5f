//! Configuration errors

use std::fmt::Display;
use std::ops::RangeInclusive;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numeric field outside its allowed range
    #[error("{field} = {value} is outside {allowed}: {hint}")]
    Range {
        field: String,
        value: String,
        allowed: String,
        hint: String,
    },

    /// Name in `enabled_checkers` that no checker registers under
    #[error("Unknown checker '{name}'{}", did_you_mean(suggestion.as_deref()))]
    UnknownChecker {
        name: String,
        suggestion: Option<String>,
    },

    /// A callee list is empty
    #[error("{field} lists no functions")]
    EmptyList { field: String },

    /// A callee list entry is not a plain identifier
    #[error("{field} entry '{name}' is not a function identifier (exact names only, no patterns)")]
    InvalidName { field: String, name: String },

    #[error("Configuration has no 'version' key; add 'version: 1'")]
    MissingVersion,

    #[error("Configuration version {found} is not supported (readable: {supported:?})")]
    UnsupportedVersion {
        found: u32,
        supported: &'static [u32],
    },

    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn out_of_range<T: Display>(
        field: impl Into<String>,
        value: impl Display,
        allowed: RangeInclusive<T>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            allowed: format!("{}..={}", allowed.start(), allowed.end()),
            hint: hint.into(),
        }
    }

    /// Unknown checker, suggesting the closest known name if it is within a
    /// third of that name's length
    pub fn unknown_checker(name: impl Into<String>, known: &[&str]) -> Self {
        let name = name.into();
        let suggestion = known
            .iter()
            .map(|k| (edit_distance(&name, k), *k))
            .filter(|(d, k)| *d <= k.chars().count() / 3)
            .min()
            .map(|(_, k)| k.to_string());
        Self::UnknownChecker { name, suggestion }
    }
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion
        .map(|s| format!(", did you mean '{}'?", s))
        .unwrap_or_default()
}

/// Levenshtein distance over chars, single-row table
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}
