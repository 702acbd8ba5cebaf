//! Commit message linting: configuration, parsing, rules and suggestions.

pub mod config;
pub mod error;
pub mod issue;
pub mod message;
pub mod rules;
pub mod suggestions;

pub use config::RuleConfig;
pub use error::LintError;
pub use issue::{Issue, IssueKind};
pub use message::ParsedMessage;
pub use rules::{RuleEngine, RuleSet};
pub use suggestions::fix_suggestions;
