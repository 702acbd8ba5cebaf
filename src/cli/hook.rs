//! Hook command: validates a single commit message file from `commit-msg`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::formatting::format_hook_report;
use crate::lint::{Issue, RuleConfig, RuleEngine, RuleSet};

/// Hook command options.
#[derive(Parser)]
pub struct HookCommand {
    /// Path to the file holding the commit message (passed by git as `$1`).
    #[arg(value_name = "COMMIT_MSG_FILE")]
    pub message_file: PathBuf,
}

/// Result of validating one message in the hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Merge or revert message, not checked.
    Exempt,
    /// No rule fired.
    Passed,
    /// At least one rule fired.
    Failed(Vec<Issue>),
}

impl HookOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            HookOutcome::Exempt | HookOutcome::Passed => 0,
            HookOutcome::Failed(_) => 1,
        }
    }
}

impl HookCommand {
    /// Executes the hook command. Passing messages produce no output.
    pub fn execute(self, config: &RuleConfig) -> Result<()> {
        let outcome = self.run(config)?;

        if let HookOutcome::Failed(issues) = &outcome {
            println!();
            println!("{}", format_hook_report(issues));
            println!();
        }

        let exit_code = outcome.exit_code();
        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }

    /// Reads and validates the message file.
    pub fn run(&self, config: &RuleConfig) -> Result<HookOutcome> {
        let message = fs::read_to_string(&self.message_file).with_context(|| {
            format!(
                "Error reading commit message file: {}",
                self.message_file.display()
            )
        })?;

        validate_message(&message, config)
    }
}

/// Validates raw message text with the hook rule set.
pub fn validate_message(message: &str, config: &RuleConfig) -> Result<HookOutcome> {
    let message = message.replace("\r\n", "\n");

    if config.is_exempt(&message) {
        tracing::debug!("Message is exempt from validation");
        return Ok(HookOutcome::Exempt);
    }

    let engine = RuleEngine::new(config, RuleSet::Hook)?;
    let issues = engine.check_message(&message);

    if issues.is_empty() {
        Ok(HookOutcome::Passed)
    } else {
        Ok(HookOutcome::Failed(issues))
    }
}
