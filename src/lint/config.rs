//! Rule configuration shared by the hook validator and the bulk checker.
//!
//! A single [`RuleConfig`] is built at startup, either from the built-in
//! defaults or from a YAML override file, and handed to the rule engine by
//! reference.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::LintError;

/// Directory holding per-repository lint configuration.
pub const CONFIG_DIR: &str = ".commit-lint";

/// File name of the rule override file inside [`CONFIG_DIR`].
pub const RULES_FILE: &str = "rules.yaml";

/// Emoji commonly pasted into generated commit messages.
pub const DEFAULT_EMOJIS: [&str; 19] = [
    "\u{1f4dd}",         // 📝
    "\u{2728}",          // ✨
    "\u{1f41b}",         // 🐛
    "\u{1f504}",         // 🔄
    "\u{26a1}\u{fe0f}",  // ⚡️
    "\u{1f3a8}",         // 🎨
    "\u{267b}\u{fe0f}",  // ♻️
    "\u{1f527}",         // 🔧
    "\u{2705}",          // ✅
    "\u{1f534}",         // 🔴
    "\u{26a0}\u{fe0f}",  // ⚠️
    "\u{274c}",          // ❌
    "\u{23f3}",          // ⏳
    "\u{1f6a8}",         // 🚨
    "\u{1f50d}",         // 🔍
    "\u{1f4a1}",         // 💡
    "\u{1f4ca}",         // 📊
    "\u{1f389}",         // 🎉
    "\u{1f916}",         // 🤖
];

/// Bullet markers that indicate a list item with no content.
pub const DEFAULT_INCOMPLETE_LIST_MARKERS: [&str; 10] = [
    "-",
    "\u{2705}",
    "\u{1f534}",
    "\u{26a0}\u{fe0f}",
    "1.",
    "2.",
    "3.",
    "4.",
    "5.",
    "6.",
];

/// Thresholds, character sets and markers used by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Longest allowed subject, in characters.
    pub max_subject_length: usize,
    /// Emoji forbidden in subjects and as a standalone first body line.
    pub emojis: Vec<String>,
    /// Inclusive code point range treated as Chinese text.
    pub chinese_range: (char, char),
    /// Trimmed body lines that count as empty list items.
    pub incomplete_list_markers: Vec<String>,
    /// Empty list items tolerated before flagging.
    pub incomplete_list_threshold: usize,
    /// Body must have more lines than this before blank lines are counted.
    pub empty_lines_min_body_lines: usize,
    /// Share of blank body lines, in percent, tolerated before flagging.
    pub empty_lines_max_percent: usize,
    /// Misplaced `##` markers tolerated in a body before flagging.
    pub markdown_chaos_threshold: usize,
    /// Minimum run length of an inline fenced code block.
    pub inline_code_block_min_chars: usize,
    /// Trailing subject words that indicate an unfinished message.
    pub incomplete_endings: Vec<String>,
    /// Raw message prefixes the hook validator lets through unchecked.
    pub exempt_prefixes: Vec<String>,
    /// Body line count above which condensing is suggested.
    pub long_body_lines: usize,
    /// Body character count above which summarizing is suggested.
    pub verbose_body_chars: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_subject_length: 100,
            emojis: DEFAULT_EMOJIS.iter().map(|e| (*e).to_string()).collect(),
            chinese_range: ('\u{4e00}', '\u{9fff}'),
            incomplete_list_markers: DEFAULT_INCOMPLETE_LIST_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
            incomplete_list_threshold: 3,
            empty_lines_min_body_lines: 10,
            empty_lines_max_percent: 30,
            markdown_chaos_threshold: 2,
            inline_code_block_min_chars: 50,
            incomplete_endings: vec![
                "proposal".to_string(),
                "tasks".to_string(),
                "...".to_string(),
            ],
            exempt_prefixes: vec!["Merge ".to_string(), "Revert ".to_string()],
            long_body_lines: 50,
            verbose_body_chars: 2000,
        }
    }
}

impl RuleConfig {
    /// Loads a configuration from a YAML file. Missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule config: {}", path.display()))?;

        let config: RuleConfig = crate::data::from_yaml(&content)
            .with_context(|| format!("Failed to parse rule config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit path must exist. Otherwise `.commit-lint/rules.yaml` under
    /// `base_dir` is used when present, falling back to the defaults.
    pub fn resolve(explicit: Option<&Path>, base_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::info!("Loading rule config from {}", path.display());
            return Self::load_from_file(path);
        }

        let candidate = default_config_path(base_dir);
        if candidate.is_file() {
            tracing::info!("Loading rule config from {}", candidate.display());
            return Self::load_from_file(&candidate);
        }

        tracing::debug!("No rule config found, using built-in defaults");
        Ok(Self::default())
    }

    /// Checks internal consistency of the configured values.
    pub fn validate(&self) -> Result<(), LintError> {
        let (start, end) = self.chinese_range;
        if start > end {
            return Err(LintError::InvalidConfig(format!(
                "chinese_range start U+{:04X} is after end U+{:04X}",
                start as u32, end as u32
            )));
        }

        if self.exempt_prefixes.iter().any(|p| p.is_empty()) {
            return Err(LintError::InvalidConfig(
                "exempt_prefixes must not contain empty strings".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns whether a raw message bypasses validation (merge and revert commits).
    #[must_use]
    pub fn is_exempt(&self, message: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| message.starts_with(prefix.as_str()))
    }

    /// Returns whether a character falls in the configured Chinese range.
    #[must_use]
    pub fn is_chinese(&self, c: char) -> bool {
        let (start, end) = self.chinese_range;
        (start..=end).contains(&c)
    }
}

/// Returns the conventional location of the rule override file.
pub fn default_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_DIR).join(RULES_FILE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RuleConfig::default();
        assert_eq!(config.max_subject_length, 100);
        assert_eq!(config.emojis.len(), 19);
        assert_eq!(config.incomplete_list_markers.len(), 10);
        assert_eq!(config.incomplete_list_threshold, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn chinese_range_is_inclusive() {
        let config = RuleConfig::default();
        assert!(config.is_chinese('\u{4e00}'));
        assert!(config.is_chinese('\u{9fff}'));
        assert!(config.is_chinese('中'));
        assert!(!config.is_chinese('\u{3fff}'));
        assert!(!config.is_chinese('\u{a000}'));
        assert!(!config.is_chinese('a'));
    }

    #[test]
    fn merge_and_revert_are_exempt() {
        let config = RuleConfig::default();
        assert!(config.is_exempt("Merge branch 'main'"));
        assert!(config.is_exempt("Revert \"feat: add thing\""));
        assert!(!config.is_exempt("Merged things"));
        assert!(!config.is_exempt("fix: Merge handling"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        fs::write(&path, "max_subject_length: 72\nincomplete_list_threshold: 5\n").unwrap();

        let config = RuleConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_subject_length, 72);
        assert_eq!(config.incomplete_list_threshold, 5);
        assert_eq!(config.emojis, RuleConfig::default().emojis);
    }

    #[test]
    fn inverted_range_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        fs::write(&path, "chinese_range: [\"\u{9fff}\", \"\u{4e00}\"]\n").unwrap();

        assert!(RuleConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuleConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config, RuleConfig::default());
    }

    #[test]
    fn resolve_picks_up_repository_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        fs::write(default_config_path(dir.path()), "max_subject_length: 50\n").unwrap();

        let config = RuleConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config.max_subject_length, 50);
    }

    #[test]
    fn resolve_explicit_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(RuleConfig::resolve(Some(&missing), dir.path()).is_err());
    }
}
