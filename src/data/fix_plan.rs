//! Fix plan data structures and their JSON persistence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::git::CommitRecord;
use crate::lint::{Issue, ParsedMessage};

/// File name of the fix plan written by the bulk checker.
pub const DEFAULT_FIX_PLAN_FILE: &str = "unified_commit_fixes.json";

/// Returns the default fix plan location inside the system temp directory.
pub fn default_fix_plan_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_FIX_PLAN_FILE)
}

/// A flagged commit with placeholders for a corrected message.
///
/// `fixed_subject` and `fixed_body` start empty and are filled in by whoever
/// reviews the plan; this crate never writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixPlanEntry {
    /// Abbreviated commit hash.
    pub hash: String,
    /// Full 40-character SHA-1 commit hash.
    pub full_hash: String,
    /// Subject as found in history.
    pub original_subject: String,
    /// Body as found in history, untruncated.
    pub original_body: String,
    /// Issue tags in rule order.
    pub issues: Vec<String>,
    /// Corrected subject, empty until provided.
    #[serde(default)]
    pub fixed_subject: String,
    /// Corrected body, empty until provided.
    #[serde(default)]
    pub fixed_body: String,
}

impl FixPlanEntry {
    /// Creates an entry for a commit with the issues it triggered.
    pub fn new(record: &CommitRecord, issues: &[Issue]) -> Self {
        Self {
            hash: record.short_hash.clone(),
            full_hash: record.full_hash.clone(),
            original_subject: record.subject.clone(),
            original_body: record.body.clone(),
            issues: issues.iter().map(Issue::tag).collect(),
            fixed_subject: String::new(),
            fixed_body: String::new(),
        }
    }

    /// Returns whether no corrected subject has been provided yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.fixed_subject.trim().is_empty()
    }

    /// Returns the corrected message, if one has been provided.
    ///
    /// A multi-line `fixed_subject` is parsed as a whole message, with any
    /// `fixed_body` appended after it.
    pub fn fixed_message(&self) -> Option<ParsedMessage> {
        if self.is_pending() {
            return None;
        }

        let subject = self.fixed_subject.replace("\r\n", "\n");
        let subject = subject.trim();
        let body = self.fixed_body.trim();

        if subject.contains('\n') {
            let raw = if body.is_empty() {
                subject.to_string()
            } else {
                format!("{subject}\n\n{body}")
            };
            return Some(ParsedMessage::parse(&raw));
        }

        Some(ParsedMessage::from_parts(subject, body))
    }
}

/// Destination for fix plans that can later be read back.
pub trait ReportSink {
    /// Persists the plan, replacing any previous one.
    fn save(&self, entries: &[FixPlanEntry]) -> Result<()>;

    /// Loads the plan, including any externally populated fixes.
    fn load(&self) -> Result<Vec<FixPlanEntry>>;
}

/// Stores fix plans as a pretty-printed UTF-8 JSON array.
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    /// Creates a sink backed by the given file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl ReportSink for JsonReportSink {
    fn save(&self, entries: &[FixPlanEntry]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialize fix plan")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write fix plan: {}", self.path.display()))?;

        tracing::info!(
            "Wrote {} fix plan entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Vec<FixPlanEntry>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read fix plan: {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fix plan: {}", self.path.display()))
    }
}
