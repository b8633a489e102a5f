//! Configuration validation

use super::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// fn build_checker<C: Validatable>(config: C) -> Result<Checker, ConfigError> {
///     config.validate()?;
///     // ... build checker
/// }
/// ```
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;
}

/// Check that every name in a list is a plain C identifier.
///
/// Callee matching is exact, so a pattern like `ntoh*` would silently match
/// nothing.
pub fn validate_identifiers(field: &str, names: &[String]) -> ConfigResult<()> {
    if names.is_empty() {
        return Err(ConfigError::EmptyList {
            field: field.to_string(),
        });
    }

    for name in names {
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };
        if !valid {
            return Err(ConfigError::InvalidName {
                field: field.to_string(),
                name: name.clone(),
            });
        }
    }

    Ok(())
}
