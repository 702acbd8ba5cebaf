//! Summary statistics for a bulk check run.

use super::fix_plan::FixPlanEntry;
use crate::lint::IssueKind;

/// Number of commits affected by one issue category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category name; parameterized tags are folded into their base name.
    pub category: String,
    /// Commits in which the category fired.
    pub commits: usize,
}

/// Summary statistics for a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    /// Total number of commits checked.
    pub total_commits: usize,
    /// Number of commits with at least one issue.
    pub problem_commits: usize,
    /// Per-category counts, most frequent first.
    pub categories: Vec<CategoryCount>,
}

impl CheckSummary {
    /// Creates a summary from the flagged entries of a run.
    ///
    /// Categories with equal counts keep the order in which they were first seen.
    pub fn from_entries(total_commits: usize, entries: &[FixPlanEntry]) -> Self {
        let mut categories: Vec<CategoryCount> = Vec::new();

        for entry in entries {
            for tag in &entry.issues {
                let category = category_of(tag);
                match categories.iter_mut().find(|c| c.category == category) {
                    Some(existing) => existing.commits += 1,
                    None => categories.push(CategoryCount {
                        category,
                        commits: 1,
                    }),
                }
            }
        }

        // Stable sort keeps first-seen order among ties.
        categories.sort_by(|a, b| b.commits.cmp(&a.commits));

        Self {
            total_commits,
            problem_commits: entries.len(),
            categories,
        }
    }

    /// Returns whether every checked commit passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.problem_commits == 0
    }
}

fn category_of(tag: &str) -> String {
    match IssueKind::from_tag(tag) {
        Some(IssueKind::SubjectTooLong) => IssueKind::SubjectTooLong.as_str().to_string(),
        _ => tag.to_string(),
    }
}
