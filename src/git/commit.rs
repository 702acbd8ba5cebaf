//! Commit records and the sources that supply them.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use git2::Commit;

use super::SHORT_HASH_LEN;
use crate::lint::ParsedMessage;

/// Separates commits in a `git log -z` export.
pub const RECORD_SEPARATOR: char = '\0';

/// Separates fields inside one exported commit (`%x1f`).
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// A commit as read from history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full SHA-1 hash of the commit
    pub full_hash: String,
    /// First seven characters of the hash
    pub short_hash: String,
    /// Subject line, trimmed
    pub subject: String,
    /// Body text after the subject paragraph, trimmed
    pub body: String,
}

impl CommitRecord {
    /// Creates a record, deriving the short hash.
    pub fn new(
        full_hash: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let full_hash = full_hash.into();
        let short_hash = full_hash.chars().take(SHORT_HASH_LEN).collect();
        Self {
            full_hash,
            short_hash,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Creates a record from a git2 commit.
    ///
    /// Returns `None` when the message is not valid UTF-8.
    pub fn from_git_commit(commit: &Commit) -> Option<Self> {
        commit.message()?;

        let subject = commit.summary().unwrap_or_default();
        let body = commit.body().unwrap_or_default();

        Some(Self::new(
            commit.id().to_string(),
            subject.trim(),
            body.trim(),
        ))
    }

    /// Returns the message in the shape the rule engine evaluates.
    pub fn message(&self) -> ParsedMessage {
        ParsedMessage::from_parts(self.subject.as_str(), self.body.as_str())
    }
}

/// Supplies the commits of a repository, newest first.
pub trait CommitSource {
    /// Returns every commit the source can see.
    fn commits(&self) -> Result<Vec<CommitRecord>>;
}

/// Reads commits from a file produced by
/// `git log --all -z --format=%H%x1f%s%x1f%b`.
#[derive(Debug, Clone)]
pub struct LogExportSource {
    path: PathBuf,
}

impl LogExportSource {
    /// Creates a source backed by an export file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl CommitSource for LogExportSource {
    fn commits(&self) -> Result<Vec<CommitRecord>> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read log export: {}", self.path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(parse_log_export(&text))
    }
}

/// Splits a NUL-delimited log export into commit records.
///
/// Records without at least a hash and a subject field, or with a hash that
/// is not hexadecimal, are skipped.
pub fn parse_log_export(text: &str) -> Vec<CommitRecord> {
    text.split(RECORD_SEPARATOR)
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| {
            let mut fields = record.splitn(3, FIELD_SEPARATOR);
            let hash = fields.next().unwrap_or_default().trim();
            let Some(subject) = fields.next() else {
                tracing::debug!("Skipping log record without subject field");
                return None;
            };
            let body = fields.next().unwrap_or_default();

            if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                tracing::debug!("Skipping log record with malformed hash {hash:?}");
                return None;
            }

            Some(CommitRecord::new(hash, subject.trim(), body.trim()))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const HASH_A: &str = "1111111111111111111111111111111111111111";
    const HASH_B: &str = "2222222222222222222222222222222222222222";

    #[test]
    fn short_hash_is_seven_chars() {
        let record = CommitRecord::new(HASH_A, "fix: x", "");
        assert_eq!(record.short_hash, "1111111");
        assert_eq!(record.short_hash.len(), SHORT_HASH_LEN);
    }

    #[test]
    fn parses_multiline_bodies() {
        let text = format!(
            "{HASH_A}\u{1f}feat: one\u{1f}line one\n\nline three\n\0\n{HASH_B}\u{1f}fix: two\u{1f}\n\0"
        );
        let records = parse_log_export(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject, "feat: one");
        assert_eq!(records[0].body, "line one\n\nline three");
        assert_eq!(records[1].full_hash, HASH_B);
        assert_eq!(records[1].body, "");
    }

    #[test]
    fn body_may_contain_legacy_separators() {
        let text = format!("{HASH_A}\u{1f}fix: x\u{1f}a|||b <<<COMMIT_SEP>>> c");
        let records = parse_log_export(&text);
        assert_eq!(records[0].body, "a|||b <<<COMMIT_SEP>>> c");
    }

    #[test]
    fn malformed_records_skipped() {
        let text = format!("garbage without fields\0not-hex\u{1f}subject\0{HASH_A}\u{1f}ok: kept");
        let records = parse_log_export(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "ok: kept");
    }

    #[test]
    fn empty_export() {
        assert!(parse_log_export("").is_empty());
        assert!(parse_log_export("\0\n\0").is_empty());
    }

    #[test]
    fn export_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.bin");
        fs::write(&path, format!("{HASH_A}\u{1f}docs: readme\u{1f}\0")).unwrap();

        let records = LogExportSource::new(&path).commits().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message().subject, "docs: readme");
    }

    #[test]
    fn missing_export_file_errors() {
        let source = LogExportSource::new("/nonexistent/commit-lint/log.bin");
        assert!(source.commits().is_err());
    }
}
