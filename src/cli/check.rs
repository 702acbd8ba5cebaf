//! Check command: audits every commit in a repository and writes a fix plan.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::formatting::{
    format_category_counts, format_problem_list, rule, NARROW_RULE_WIDTH,
};
use crate::data::{default_fix_plan_path, CheckSummary, FixPlanEntry, JsonReportSink, ReportSink};
use crate::git::{CommitRecord, CommitSource, GitRepository, LogExportSource};
use crate::lint::{RuleConfig, RuleEngine, RuleSet};

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Directory inside the repository to audit (the root is discovered upward).
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Where to write the fix plan (defaults to unified_commit_fixes.json in the temp directory).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Reads commits from a `git log --all -z --format=%H%x1f%s%x1f%b` export instead of the repository.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Skips commits whose subject starts with an exempt prefix (merges, reverts).
    #[arg(long)]
    pub exempt_merges: bool,
}

/// Outcome of a bulk check.
#[derive(Debug, Clone)]
pub struct CheckRun {
    /// Number of commits read from the source.
    pub total_commits: usize,
    /// Flagged commits in source order.
    pub entries: Vec<FixPlanEntry>,
}

impl CheckRun {
    /// Builds the summary statistics for this run.
    pub fn summary(&self) -> CheckSummary {
        CheckSummary::from_entries(self.total_commits, &self.entries)
    }
}

impl CheckCommand {
    /// Executes the check command. Always succeeds unless history or the plan
    /// file cannot be accessed; issues found do not affect the exit code.
    pub fn execute(self, config: &RuleConfig) -> Result<()> {
        let banner = rule(NARROW_RULE_WIDTH);
        println!("{banner}");
        println!("Git Commit Message Unified Checker");
        println!("{banner}");
        println!();

        println!("\u{1f50d} Starting check of all commits...");
        println!();

        let source = self.open_source()?;
        let run = self.run(source.as_ref(), config)?;

        println!("\u{1f4ca} Total {} commits", run.total_commits);
        println!();

        let sink = JsonReportSink::new(self.output_path());
        let summary = run.summary();

        if !summary.all_passed() {
            println!(
                "\u{26a0}\u{fe0f}  Found {} problematic commits",
                summary.problem_commits
            );
            println!();
            println!("{}", format_category_counts(&summary));
            println!("{}", format_problem_list(&run.entries));
            println!(
                "\u{1f527} Generating fix plan for {} problematic commits...",
                run.entries.len()
            );
        }

        match save_plan(&run, &sink)? {
            PlanWrite::Cleared => {
                println!("\u{1f389} Excellent! All commits comply with standards!");
                println!();
                return Ok(());
            }
            PlanWrite::Saved(_) => {
                println!("\u{2705} Fix plan saved to: {}", sink.path().display());
                println!();
            }
        }

        println!("{banner}");
        println!("Check complete!");
        println!("{banner}");
        println!();
        println!("\u{1f4ca} Statistics:");
        println!("  - Total commits: {}", summary.total_commits);
        println!("  - Problematic commits: {}", summary.problem_commits);
        println!("  - Fix plans: {}", run.entries.len());
        println!();
        println!("\u{26a0}\u{fe0f}  Note:");
        println!("  - fixed_subject and fixed_body fields are empty");
        println!("  - Populate them with corrected messages before applying");
        println!();
        println!("\u{1f4dd} Next steps:");
        println!(
            "  1. Review issues: commit-lint review --file {}",
            sink.path().display()
        );
        println!("  2. Fill in fixed_subject / fixed_body for each entry");
        println!(
            "  3. Verify the fixes: commit-lint verify --file {}",
            sink.path().display()
        );
        println!();

        Ok(())
    }

    /// Reads commits from the configured source and evaluates them.
    pub fn run(&self, source: &dyn CommitSource, config: &RuleConfig) -> Result<CheckRun> {
        let commits = source.commits().context("Failed to read commit history")?;
        let engine = RuleEngine::new(config, RuleSet::Full)?;

        let entries = plan_fixes(&commits, &engine, self.exempt_merges);

        Ok(CheckRun {
            total_commits: commits.len(),
            entries,
        })
    }

    fn open_source(&self) -> Result<Box<dyn CommitSource>> {
        if let Some(log_file) = &self.log_file {
            tracing::info!("Reading commits from log export {}", log_file.display());
            return Ok(Box::new(LogExportSource::new(log_file)));
        }

        let repo = GitRepository::discover(&self.repo).context(
            "Failed to open git repository. Make sure you're in a git repository.",
        )?;
        tracing::info!("Checking repository at {}", repo.root().display());
        Ok(Box::new(repo))
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(default_fix_plan_path)
    }
}

/// How a check run left the plan file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanWrite {
    /// No commit was flagged; any earlier plan was replaced by an empty one.
    Cleared,
    /// This many entries were written.
    Saved(usize),
}

/// Writes the run's entries to the sink. A clean run still writes an empty
/// plan so a stale one cannot be reviewed.
pub fn save_plan(run: &CheckRun, sink: &dyn ReportSink) -> Result<PlanWrite> {
    sink.save(&run.entries)?;
    if run.entries.is_empty() {
        Ok(PlanWrite::Cleared)
    } else {
        Ok(PlanWrite::Saved(run.entries.len()))
    }
}

/// Evaluates each commit, keeping an entry for every one that triggers a rule.
pub fn plan_fixes(
    commits: &[CommitRecord],
    engine: &RuleEngine<'_>,
    exempt_merges: bool,
) -> Vec<FixPlanEntry> {
    commits
        .iter()
        .filter(|commit| {
            let exempt = exempt_merges && engine.config().is_exempt(&commit.subject);
            if exempt {
                tracing::debug!("Skipping exempt commit {}", commit.short_hash);
            }
            !exempt
        })
        .filter_map(|commit| {
            let issues = engine.evaluate(&commit.message());
            if issues.is_empty() {
                None
            } else {
                Some(FixPlanEntry::new(commit, &issues))
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    struct FixedSource(Vec<CommitRecord>);

    impl CommitSource for FixedSource {
        fn commits(&self) -> Result<Vec<CommitRecord>> {
            Ok(self.0.clone())
        }
    }

    fn hash(n: u8) -> String {
        format!("{n:x}").repeat(40)
    }

    fn make_cmd(exempt_merges: bool) -> CheckCommand {
        CheckCommand {
            repo: PathBuf::from("."),
            output: None,
            log_file: None,
            exempt_merges,
        }
    }

    fn sample_source() -> FixedSource {
        FixedSource(vec![
            CommitRecord::new(hash(1), "feat(cli): add flag", "Explains why."),
            CommitRecord::new(hash(2), "Add thing", ""),
            CommitRecord::new(hash(3), "Merge branch 'main' into dev", ""),
            CommitRecord::new(hash(4), "fix: ✨ sparkle", "-\n-\n-\n-"),
        ])
    }

    #[test]
    fn flags_only_failing_commits() {
        let config = RuleConfig::default();
        let run = make_cmd(false).run(&sample_source(), &config).unwrap();

        assert_eq!(run.total_commits, 4);
        let hashes: Vec<&str> = run.entries.iter().map(|e| e.hash.as_str()).collect();
        assert_eq!(hashes, vec!["2222222", "3333333", "4444444"]);
        assert_eq!(run.entries[0].issues, vec!["invalid-format"]);
        assert_eq!(
            run.entries[2].issues,
            vec!["emoji-in-subject", "incomplete-list-items"]
        );
    }

    #[test]
    fn merges_checked_unless_exempted() {
        let config = RuleConfig::default();
        let run = make_cmd(true).run(&sample_source(), &config).unwrap();
        assert_eq!(run.total_commits, 4);
        assert_eq!(run.entries.len(), 2);
        assert!(run.entries.iter().all(|e| !e.original_subject.starts_with("Merge")));
    }

    #[test]
    fn summary_counts_categories() {
        let config = RuleConfig::default();
        let run = make_cmd(false).run(&sample_source(), &config).unwrap();
        let summary = run.summary();
        assert_eq!(summary.problem_commits, 3);
        assert_eq!(summary.categories[0].category, "invalid-format");
        assert_eq!(summary.categories[0].commits, 2);
    }

    #[test]
    fn clean_history_has_no_entries() {
        let config = RuleConfig::default();
        let source = FixedSource(vec![CommitRecord::new(hash(5), "docs: readme", "")]);
        let run = make_cmd(false).run(&source, &config).unwrap();
        assert!(run.entries.is_empty());
        assert!(run.summary().all_passed());
    }

    #[test]
    fn clean_run_clears_stale_plan() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonReportSink::new(dir.path().join("unified_commit_fixes.json"));
        sink.save(&[FixPlanEntry::new(
            &CommitRecord::new(hash(7), "Old thing", ""),
            &[crate::lint::Issue::InvalidFormat],
        )])
        .unwrap();

        let source = FixedSource(vec![CommitRecord::new(hash(8), "docs: readme", "")]);
        let run = make_cmd(false).run(&source, &RuleConfig::default()).unwrap();

        assert_eq!(save_plan(&run, &sink).unwrap(), PlanWrite::Cleared);
        assert!(sink.exists());
        assert!(sink.load().unwrap().is_empty());
    }

    #[test]
    fn flagged_run_saves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonReportSink::new(dir.path().join("plan.json"));
        let run = make_cmd(false)
            .run(&sample_source(), &RuleConfig::default())
            .unwrap();

        assert_eq!(save_plan(&run, &sink).unwrap(), PlanWrite::Saved(3));
        assert_eq!(sink.load().unwrap(), run.entries);
    }

    #[test]
    fn entries_preserve_original_text() {
        let config = RuleConfig::default();
        let body = "## Summary\n\nline  with  spaces\n修复";
        let source = FixedSource(vec![CommitRecord::new(hash(6), "fix: thing", body)]);
        let run = make_cmd(false).run(&source, &config).unwrap();
        assert_eq!(run.entries[0].original_body, body);
        assert_eq!(run.entries[0].full_hash, hash(6));
        assert_eq!(run.entries[0].fixed_subject, "");
    }
}
