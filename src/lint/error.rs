//! Lint-specific error handling.

use thiserror::Error;

/// Errors raised while building the rule engine from its configuration.
///
/// Rule evaluation itself never fails; these only surface at startup.
#[derive(Error, Debug)]
pub enum LintError {
    /// A pattern derived from the configuration failed to compile.
    #[error("Failed to compile rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The rule configuration contains inconsistent values.
    #[error("Invalid rule configuration: {0}")]
    InvalidConfig(String),
}
