//! Verify command: lints the corrected messages written into a fix plan.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::formatting::format_verify_line;
use crate::data::{default_fix_plan_path, FixPlanEntry, JsonReportSink, ReportSink};
use crate::git::FULL_HASH_LEN;
use crate::lint::{Issue, RuleConfig, RuleEngine, RuleSet};

/// Verify command options.
#[derive(Parser)]
pub struct VerifyCommand {
    /// Fix plan to verify (defaults to unified_commit_fixes.json in the temp directory).
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Verification result for one populated fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixVerdict {
    /// Abbreviated commit hash.
    pub hash: String,
    /// Issues the corrected message still triggers.
    pub issues: Vec<Issue>,
}

/// Verification results for a whole plan.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// One verdict per entry with a corrected subject.
    pub verdicts: Vec<FixVerdict>,
    /// Entries still awaiting a fix.
    pub pending: usize,
    /// Entries whose full hash is not a 40-character lowercase hex string.
    pub malformed_hashes: Vec<String>,
}

impl VerifyReport {
    /// Returns whether any populated fix still fails a rule.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.verdicts.iter().any(|v| !v.issues.is_empty())
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}

impl VerifyCommand {
    /// Executes the verify command.
    pub fn execute(self, config: &RuleConfig) -> Result<()> {
        let sink = JsonReportSink::new(self.file.clone().unwrap_or_else(default_fix_plan_path));
        let entries = sink.load().context("Run `commit-lint check` first")?;

        let report = verify_entries(&entries, config)?;

        for verdict in &report.verdicts {
            println!("{}", format_verify_line(&verdict.hash, &verdict.issues));
        }
        for hash in &report.malformed_hashes {
            println!("\u{26a0}\u{fe0f}  {hash} - full_hash is not a {FULL_HASH_LEN}-character commit id");
        }

        println!();
        println!(
            "\u{1f4ca} {} fixes checked, {} awaiting a fix",
            report.verdicts.len(),
            report.pending
        );

        let exit_code = report.exit_code();
        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }
}

/// Lints every populated fix with the full rule set.
pub fn verify_entries(entries: &[FixPlanEntry], config: &RuleConfig) -> Result<VerifyReport> {
    let engine = RuleEngine::new(config, RuleSet::Full)?;
    let mut report = VerifyReport::default();

    for entry in entries {
        if !is_full_hash(&entry.full_hash) {
            tracing::warn!("Fix plan entry {} has a malformed full hash", entry.hash);
            report.malformed_hashes.push(entry.hash.clone());
        }

        match entry.fixed_message() {
            Some(message) => report.verdicts.push(FixVerdict {
                hash: entry.hash.clone(),
                issues: engine.evaluate(&message),
            }),
            None => report.pending += 1,
        }
    }

    Ok(report)
}

fn is_full_hash(hash: &str) -> bool {
    hash.len() == FULL_HASH_LEN
        && hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
