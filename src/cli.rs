//! CLI interface for commit-lint.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::lint::RuleConfig;

pub mod check;
pub mod config;
pub(crate) mod formatting;
pub mod hook;
pub mod review;
pub mod verify;

/// commit-lint: Validates commit messages and audits repository history.
#[derive(Parser)]
#[command(name = "commit-lint")]
#[command(about = "Validates commit messages and audits repository history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// YAML file overriding rule thresholds (defaults to .commit-lint/rules.yaml when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validates a commit message file (for use as a commit-msg hook).
    Hook(hook::HookCommand),
    /// Checks every commit in the repository and writes a fix plan.
    Check(check::CheckCommand),
    /// Displays a fix plan with suggestions for each flagged commit.
    Review(review::ReviewCommand),
    /// Lints the corrected messages filled into a fix plan.
    Verify(verify::VerifyCommand),
    /// Rule configuration.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        let config = RuleConfig::resolve(self.rules.as_deref(), Path::new("."))?;

        match self.command {
            Commands::Hook(hook_cmd) => hook_cmd.execute(&config),
            Commands::Check(check_cmd) => check_cmd.execute(&config),
            Commands::Review(review_cmd) => review_cmd.execute(&config),
            Commands::Verify(verify_cmd) => verify_cmd.execute(&config),
            Commands::Config(config_cmd) => config_cmd.execute(&config),
        }
    }
}
