//! Shared display formatting for CLI commands.
//!
//! Pure functions so the report layouts can be unit tested without capturing
//! stdout.

use crate::data::{CheckSummary, FixPlanEntry};
use crate::lint::Issue;

/// Width of the heavy rule printed around hook and review reports.
pub(crate) const WIDE_RULE_WIDTH: usize = 80;

/// Width of the rule printed around the bulk checker banner.
pub(crate) const NARROW_RULE_WIDTH: usize = 60;

/// Offending commits listed in the bulk summary.
pub(crate) const LISTED_PROBLEMS: usize = 10;

/// Subject characters shown per listed commit.
pub(crate) const LISTED_SUBJECT_CHARS: usize = 60;

/// Returns a horizontal rule of `=` characters.
pub(crate) fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Truncates to `max` characters, marking the cut with `...`.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Formats the report printed when the commit-msg hook rejects a message.
pub(crate) fn format_hook_report(issues: &[Issue]) -> String {
    let rule = rule(WIDE_RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("{rule}\n"));
    output.push_str("\u{274c} COMMIT MESSAGE VALIDATION FAILED\n");
    output.push_str(&format!("{rule}\n\n"));
    output.push_str("The following issues were found:\n\n");
    for issue in issues {
        output.push_str(&format!("  \u{274c} {}\n", issue.description()));
    }
    output.push('\n');
    output.push_str(&format!("{rule}\n"));
    output.push_str("Please fix these issues and try again.\n");
    output.push_str(&rule);

    output
}

/// Formats per-category counts for the bulk summary.
pub(crate) fn format_category_counts(summary: &CheckSummary) -> String {
    let mut output = String::from("Issue type statistics:\n");
    for category in &summary.categories {
        output.push_str(&format!(
            "  {}: {} commits\n",
            category.category, category.commits
        ));
    }
    output
}

/// Formats the first offending commits, with a count of the rest.
pub(crate) fn format_problem_list(entries: &[FixPlanEntry]) -> String {
    let mut output = format!("First {LISTED_PROBLEMS} problematic commits:\n");

    for (i, entry) in entries.iter().take(LISTED_PROBLEMS).enumerate() {
        output.push_str(&format!(
            "{}. {} - {}\n",
            i + 1,
            entry.hash,
            truncate_chars(&entry.original_subject, LISTED_SUBJECT_CHARS)
        ));
        output.push_str(&format!("   Issues: {}\n", entry.issues.join(", ")));
    }

    if entries.len() > LISTED_PROBLEMS {
        output.push_str(&format!(
            "... and {} more\n",
            entries.len() - LISTED_PROBLEMS
        ));
    }

    output
}

/// Formats one fix plan entry for manual or assisted review.
///
/// The body is shown in full with right-aligned line numbers.
pub(crate) fn format_review_entry(
    entry: &FixPlanEntry,
    index: usize,
    total: usize,
    suggestions: &[String],
) -> String {
    let rule = rule(WIDE_RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("{rule}\n"));
    output.push_str(&format!("Commit {index}/{total}: {}\n", entry.hash));
    output.push_str(&format!("{rule}\n\n"));

    output.push_str("\u{1f4cb} Original Subject:\n");
    output.push_str(&format!("  {}\n\n", entry.original_subject));

    output.push_str("\u{1f4cb} Original Body:\n");
    for (n, line) in entry.original_body.split('\n').enumerate() {
        output.push_str(&format!("  {:2}| {line}\n", n + 1));
    }
    output.push('\n');

    output.push_str("\u{26a0}\u{fe0f}  Issues:\n");
    for issue in &entry.issues {
        output.push_str(&format!("  - {issue}\n"));
    }
    output.push('\n');

    output.push_str("\u{1f4a1} Fix Suggestions:\n");
    for suggestion in suggestions {
        output.push_str(&format!("  - {suggestion}\n"));
    }

    if !entry.is_pending() {
        output.push('\n');
        output.push_str("\u{270f}\u{fe0f}  Proposed Fix:\n");
        output.push_str(&format!("  {}\n", entry.fixed_subject));
        for line in entry.fixed_body.lines() {
            output.push_str(&format!("  {line}\n"));
        }
    }

    output.push('\n');
    output.push_str(&rule);
    output
}

/// Formats the verification line for one populated fix.
pub(crate) fn format_verify_line(hash: &str, issues: &[Issue]) -> String {
    if issues.is_empty() {
        format!("\u{2705} {hash} - fix passes all rules")
    } else {
        let tags: Vec<String> = issues.iter().map(Issue::tag).collect();
        format!("\u{274c} {hash} - fix still has issues: {}", tags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CategoryCount;

    fn entry(hash: &str, subject: &str, body: &str, issues: &[&str]) -> FixPlanEntry {
        FixPlanEntry {
            hash: hash.to_string(),
            full_hash: format!("{hash}{}", "0".repeat(33)),
            original_subject: subject.to_string(),
            original_body: body.to_string(),
            issues: issues.iter().map(|i| (*i).to_string()).collect(),
            fixed_subject: String::new(),
            fixed_body: String::new(),
        }
    }

    // --- truncate_chars ---

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("short", 60), "short");
        assert_eq!(truncate_chars(&"a".repeat(60), 60), "a".repeat(60));
    }

    #[test]
    fn truncate_long_text_marked() {
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("修复修复", 2), "修复...");
    }

    // --- format_hook_report ---

    #[test]
    fn hook_report_layout() {
        let report = format_hook_report(&[
            Issue::ContainsPlaceholder,
            Issue::IncompleteListItems {
                count: 5,
                threshold: 3,
            },
        ]);
        insta::assert_snapshot!(report, @r"
        ================================================================================
        ❌ COMMIT MESSAGE VALIDATION FAILED
        ================================================================================

        The following issues were found:

          ❌ Contains **** placeholder - please replace with actual content
          ❌ Too many incomplete list items (5) - threshold is 3

        ================================================================================
        Please fix these issues and try again.
        ================================================================================
        ");
    }

    // --- format_category_counts ---

    #[test]
    fn category_counts_listed_in_order() {
        let summary = CheckSummary {
            total_commits: 9,
            problem_commits: 4,
            categories: vec![
                CategoryCount {
                    category: "invalid-format".to_string(),
                    commits: 3,
                },
                CategoryCount {
                    category: "subject-too-long".to_string(),
                    commits: 1,
                },
            ],
        };
        assert_eq!(
            format_category_counts(&summary),
            "Issue type statistics:\n  invalid-format: 3 commits\n  subject-too-long: 1 commits\n"
        );
    }

    // --- format_problem_list ---

    #[test]
    fn problem_list_truncates_subjects() {
        let long = "x".repeat(70);
        let entries = vec![entry("abc1234", &long, "", &["subject-too-long-70"])];
        let output = format_problem_list(&entries);
        assert!(output.contains(&format!("1. abc1234 - {}...", "x".repeat(60))));
        assert!(output.contains("   Issues: subject-too-long-70"));
        assert!(!output.contains("more"));
    }

    #[test]
    fn problem_list_caps_at_ten() {
        let entries: Vec<FixPlanEntry> = (0..13)
            .map(|i| entry(&format!("{i:07}"), "Bad", "", &["invalid-format"]))
            .collect();
        let output = format_problem_list(&entries);
        assert!(output.contains("10. 0000009 - Bad"));
        assert!(!output.contains("11. "));
        assert!(output.contains("... and 3 more"));
    }

    // --- format_review_entry ---

    #[test]
    fn review_entry_numbers_body_lines() {
        let e = entry("abc1234", "Add thing", "first\n\nthird", &["invalid-format"]);
        let output = format_review_entry(&e, 2, 5, &["Ensure format".to_string()]);
        assert!(output.contains("Commit 2/5: abc1234"));
        assert!(output.contains("  Add thing\n"));
        assert!(output.contains("   1| first\n"));
        assert!(output.contains("   2| \n"));
        assert!(output.contains("   3| third\n"));
        assert!(output.contains("  - invalid-format\n"));
        assert!(output.contains("  - Ensure format\n"));
        assert!(!output.contains("Proposed Fix"));
    }

    #[test]
    fn review_entry_shows_populated_fix() {
        let mut e = entry("abc1234", "Add thing", "", &["invalid-format"]);
        e.fixed_subject = "feat: add thing".to_string();
        let output = format_review_entry(&e, 1, 1, &[]);
        assert!(output.contains("Proposed Fix:\n  feat: add thing\n"));
    }

    // --- format_verify_line ---

    #[test]
    fn verify_lines() {
        assert_eq!(
            format_verify_line("abc1234", &[]),
            "✅ abc1234 - fix passes all rules"
        );
        assert_eq!(
            format_verify_line("abc1234", &[Issue::InvalidFormat, Issue::MultipleSpaces]),
            "❌ abc1234 - fix still has issues: invalid-format, multiple-spaces"
        );
    }
}
