//! Review command: displays a fix plan so corrected messages can be written.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::formatting::{format_review_entry, rule, WIDE_RULE_WIDTH};
use crate::data::{default_fix_plan_path, FixPlanEntry, JsonReportSink, ReportSink};
use crate::lint::{fix_suggestions, RuleConfig};

/// Review command options.
#[derive(Parser)]
pub struct ReviewCommand {
    /// Fix plan to display (defaults to unified_commit_fixes.json in the temp directory).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Only shows entries that have no corrected subject yet.
    #[arg(long)]
    pub pending: bool,
}

/// What the review command found in the plan file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The plan file does not exist.
    Missing(PathBuf),
    /// The plan holds no entries.
    Empty,
    /// Entries selected for display.
    Displayed {
        /// Entries to print, in plan order.
        selected: Vec<FixPlanEntry>,
        /// Entries in the whole plan.
        plan_size: usize,
        /// Entries in the whole plan still awaiting a fix.
        pending: usize,
    },
}

impl ReviewOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReviewOutcome::Missing(_) => 1,
            ReviewOutcome::Empty | ReviewOutcome::Displayed { .. } => 0,
        }
    }
}

impl ReviewCommand {
    /// Executes the review command.
    pub fn execute(self, config: &RuleConfig) -> Result<()> {
        let outcome = self.run()?;

        let banner = rule(WIDE_RULE_WIDTH);
        println!("{banner}");
        println!("Fix Plan Review");
        println!("{banner}");
        println!();

        match &outcome {
            ReviewOutcome::Missing(path) => {
                println!("\u{274c} Error: File not found {}", path.display());
                println!();
                println!("Please run the checker first:");
                println!("  commit-lint check");
                println!();
            }
            ReviewOutcome::Empty => println!("\u{2705} No commits need fixing!"),
            ReviewOutcome::Displayed {
                selected,
                plan_size,
                pending,
            } => self.print_entries(selected, *plan_size, *pending, config),
        }

        let exit_code = outcome.exit_code();
        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }

    /// Loads the plan and selects the entries to display.
    pub fn run(&self) -> Result<ReviewOutcome> {
        let sink = JsonReportSink::new(self.plan_path());
        if !sink.exists() {
            return Ok(ReviewOutcome::Missing(sink.path().to_path_buf()));
        }

        let entries = sink.load()?;
        if entries.is_empty() {
            return Ok(ReviewOutcome::Empty);
        }

        let pending = entries.iter().filter(|e| e.is_pending()).count();
        let plan_size = entries.len();
        let selected = entries
            .into_iter()
            .filter(|entry| !self.pending || entry.is_pending())
            .collect();

        Ok(ReviewOutcome::Displayed {
            selected,
            plan_size,
            pending,
        })
    }

    fn plan_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_fix_plan_path)
    }

    fn print_entries(
        &self,
        selected: &[FixPlanEntry],
        plan_size: usize,
        pending: usize,
        config: &RuleConfig,
    ) {
        let banner = rule(WIDE_RULE_WIDTH);
        let plan_path = self.plan_path();

        println!("\u{1f4ca} Total commits to fix: {plan_size}");
        println!("   Awaiting a fix: {pending}");
        println!();

        let total = selected.len();
        for (i, entry) in selected.iter().enumerate() {
            let suggestions = fix_suggestions(&entry.issues, &entry.original_body, config);
            println!(
                "{}",
                format_review_entry(entry, i + 1, total, &suggestions)
            );
            println!();
        }

        println!("{banner}");
        println!("\u{1f4dd} Next Steps:");
        println!("{banner}");
        println!();
        println!("1. For each commit above, write:");
        println!(
            "   - fixed_subject: corrected subject (at most {} characters)",
            config.max_subject_length
        );
        println!("   - fixed_body: corrected body (preserve meaningful content)");
        println!();
        println!("2. Save them into: {}", plan_path.display());
        println!();
        println!(
            "3. Check the result: commit-lint verify --file {}",
            plan_path.display()
        );
        println!();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn entry(hash: &str, fixed_subject: &str) -> FixPlanEntry {
        FixPlanEntry {
            hash: hash.to_string(),
            full_hash: hash.repeat(6)[..40].to_string(),
            original_subject: "Add thing".to_string(),
            original_body: String::new(),
            issues: vec!["invalid-format".to_string()],
            fixed_subject: fixed_subject.to_string(),
            fixed_body: String::new(),
        }
    }

    fn review(file: PathBuf, pending: bool) -> ReviewOutcome {
        ReviewCommand {
            file: Some(file),
            pending,
        }
        .run()
        .unwrap()
    }

    fn write_plan(entries: &[FixPlanEntry]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unified_commit_fixes.json");
        JsonReportSink::new(&path).save(entries).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_plan_exits_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let outcome = review(path.clone(), false);
        assert_eq!(outcome, ReviewOutcome::Missing(path));
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn empty_plan_needs_no_fixing() {
        let (_dir, path) = write_plan(&[]);

        let outcome = review(path, false);
        assert_eq!(outcome, ReviewOutcome::Empty);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn empty_plan_written_by_hand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "[]").unwrap();

        assert_eq!(review(path, true), ReviewOutcome::Empty);
    }

    #[test]
    fn all_entries_by_default() {
        let entries = vec![entry("aaaaaaa", ""), entry("bbbbbbb", "feat: add thing")];
        let (_dir, path) = write_plan(&entries);

        let outcome = review(path, false);
        assert_eq!(
            outcome,
            ReviewOutcome::Displayed {
                selected: entries,
                plan_size: 2,
                pending: 1,
            }
        );
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn pending_filter_counts_whole_plan() {
        let entries = vec![
            entry("aaaaaaa", ""),
            entry("bbbbbbb", "feat: add thing"),
            entry("ccccccc", "   "),
        ];
        let (_dir, path) = write_plan(&entries);

        match review(path, true) {
            ReviewOutcome::Displayed {
                selected,
                plan_size,
                pending,
            } => {
                let hashes: Vec<&str> = selected.iter().map(|e| e.hash.as_str()).collect();
                assert_eq!(hashes, vec!["aaaaaaa", "ccccccc"]);
                assert_eq!(plan_size, 3);
                assert_eq!(pending, 2);
            }
            other => panic!("expected entries, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_plan_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = ReviewCommand {
            file: Some(path),
            pending: false,
        }
        .run()
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse fix plan"));
    }
}
