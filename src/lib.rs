//! # commit-lint
//!
//! Commit message validation and repository history auditing.
//!
//! ## Features
//!
//! - Fast `commit-msg` hook validation with a readable failure report
//! - Whole-history audits that produce a JSON fix plan
//! - Review and verification of corrected messages
//! - YAML-configurable thresholds
//!
//! ## Quick Start
//!
//! ```rust
//! use commit_lint::lint::{RuleConfig, RuleEngine, RuleSet};
//!
//! let config = RuleConfig::default();
//! let engine = RuleEngine::new(&config, RuleSet::Full).unwrap();
//! assert!(engine.check_message("feat: add flag\n\nExplains why.").is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod data;
pub mod git;
pub mod lint;

pub use crate::cli::Cli;

/// The current version of commit-lint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
