//! The rule engine: an ordered battery of independent message checks.

use std::sync::LazyLock;

use regex::Regex;

use super::config::RuleConfig;
use super::error::LintError;
use super::issue::Issue;
use super::message::ParsedMessage;

/// `type(scope): description` with a lowercase type and optional scope.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static CONVENTIONAL_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+(\([^)]+\))?:\s+.+").unwrap());

/// `##` touching a non-space character on either side.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static GLUED_MARKDOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\s]##|##[^\s#]").unwrap());

/// `##` dropped into the middle of a line with content after it.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static MID_LINE_MARKDOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s##\s.*\S").unwrap());

/// Which rules an engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleSet {
    /// Everything except the subject format rule, for the commit-msg hook.
    #[default]
    Hook,
    /// Every rule, for auditing history.
    Full,
}

impl RuleSet {
    /// Returns whether the `type(scope): description` rule is applied.
    pub fn enforces_format(self) -> bool {
        matches!(self, RuleSet::Full)
    }
}

/// Evaluates commit messages against the configured rules.
#[derive(Debug)]
pub struct RuleEngine<'a> {
    config: &'a RuleConfig,
    rule_set: RuleSet,
    incomplete_ending: Option<Regex>,
    inline_code_block: Regex,
}

impl<'a> RuleEngine<'a> {
    /// Builds an engine, compiling the patterns that depend on configuration.
    pub fn new(config: &'a RuleConfig, rule_set: RuleSet) -> Result<Self, LintError> {
        config.validate()?;

        let incomplete_ending = if config.incomplete_endings.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = config
                .incomplete_endings
                .iter()
                .map(|ending| regex::escape(ending))
                .collect();
            Some(Regex::new(&format!(
                r"\s+({})\s*$",
                alternatives.join("|")
            ))?)
        };

        let inline_code_block = Regex::new(&format!(
            r"```\w+[^`]{{{},}}```",
            config.inline_code_block_min_chars
        ))?;

        Ok(Self {
            config,
            rule_set,
            incomplete_ending,
            inline_code_block,
        })
    }

    /// Returns the configuration this engine evaluates against.
    pub fn config(&self) -> &RuleConfig {
        self.config
    }


    /// Parses a raw message and evaluates it.
    pub fn check_message(&self, message: &str) -> Vec<Issue> {
        self.evaluate(&ParsedMessage::parse(message))
    }

    /// Runs every applicable rule, returning triggered issues in rule order.
    ///
    /// An empty result means the message passes.
    pub fn evaluate(&self, message: &ParsedMessage) -> Vec<Issue> {
        let subject = message.subject.as_str();
        let body = message.body.as_str();
        let body_lines = message.body_lines();

        let format_issue = if self.rule_set.enforces_format() {
            self.check_format(subject)
        } else {
            None
        };

        let issues: Vec<Issue> = [
            self.check_placeholder(subject, body),
            self.check_subject_length(subject),
            self.check_chinese(subject, body),
            self.check_emoji_in_subject(subject),
            self.check_markdown_in_subject(subject),
            format_issue,
            self.check_emoji_first_line(&body_lines),
            self.check_incomplete_list_items(&body_lines),
            self.check_empty_lines(&body_lines),
            self.check_subject_ending(subject),
            self.check_multiple_spaces(subject),
            self.check_markdown_chaos(body, &body_lines),
            self.check_code_blocks(body),
        ]
        .into_iter()
        .flatten()
        .collect();

        tracing::debug!(
            "Evaluated {:?}: {} issue(s)",
            truncate_for_log(subject),
            issues.len()
        );

        issues
    }

    fn check_placeholder(&self, subject: &str, body: &str) -> Option<Issue> {
        (subject.contains("****") || body.contains("****")).then_some(Issue::ContainsPlaceholder)
    }

    fn check_subject_length(&self, subject: &str) -> Option<Issue> {
        let length = subject.chars().count();
        (length > self.config.max_subject_length).then_some(Issue::SubjectTooLong { length })
    }

    fn check_chinese(&self, subject: &str, body: &str) -> Option<Issue> {
        subject
            .chars()
            .chain(body.chars())
            .any(|c| self.config.is_chinese(c))
            .then_some(Issue::ContainsChinese)
    }

    fn check_emoji_in_subject(&self, subject: &str) -> Option<Issue> {
        self.config
            .emojis
            .iter()
            .any(|emoji| subject.contains(emoji.as_str()))
            .then_some(Issue::EmojiInSubject)
    }

    fn check_markdown_in_subject(&self, subject: &str) -> Option<Issue> {
        // `###` always contains `##`.
        subject.contains("##").then_some(Issue::MarkdownInSubject)
    }

    fn check_format(&self, subject: &str) -> Option<Issue> {
        (!CONVENTIONAL_SUBJECT.is_match(subject)).then_some(Issue::InvalidFormat)
    }

    fn check_emoji_first_line(&self, body_lines: &[&str]) -> Option<Issue> {
        let first = body_lines.first()?.trim();
        self.config
            .emojis
            .iter()
            .any(|emoji| emoji == first)
            .then_some(Issue::EmojiFirstLine)
    }

    fn check_incomplete_list_items(&self, body_lines: &[&str]) -> Option<Issue> {
        let count = body_lines
            .iter()
            .filter(|line| {
                let trimmed = line.trim();
                self.config
                    .incomplete_list_markers
                    .iter()
                    .any(|marker| marker == trimmed)
            })
            .count();

        let threshold = self.config.incomplete_list_threshold;
        (count > threshold).then_some(Issue::IncompleteListItems { count, threshold })
    }

    fn check_empty_lines(&self, body_lines: &[&str]) -> Option<Issue> {
        let total = body_lines.len();
        if total <= self.config.empty_lines_min_body_lines {
            return None;
        }

        let empty = body_lines.iter().filter(|l| l.trim().is_empty()).count();
        let max_percent = self.config.empty_lines_max_percent;

        (empty * 100 > total * max_percent).then_some(Issue::TooManyEmptyLines {
            empty,
            total,
            max_percent,
        })
    }

    fn check_subject_ending(&self, subject: &str) -> Option<Issue> {
        let pattern = self.incomplete_ending.as_ref()?;
        pattern
            .is_match(subject)
            .then_some(Issue::IncompleteSubjectEnding)
    }

    fn check_multiple_spaces(&self, subject: &str) -> Option<Issue> {
        subject.contains("  ").then_some(Issue::MultipleSpaces)
    }

    fn check_markdown_chaos(&self, body: &str, body_lines: &[&str]) -> Option<Issue> {
        if body.is_empty() {
            return None;
        }

        let count: usize = body_lines.iter().map(|line| markdown_chaos_in_line(line)).sum();

        (count > self.config.markdown_chaos_threshold)
            .then_some(Issue::MarkdownChaosInBody { count })
    }

    fn check_code_blocks(&self, body: &str) -> Option<Issue> {
        if body.is_empty() {
            return None;
        }
        self.inline_code_block
            .is_match(body)
            .then_some(Issue::MalformedCodeBlocks)
    }
}

/// Scores one body line: one point for a glued marker, one for a mid-line
/// marker on a line that is not itself a heading.
fn markdown_chaos_in_line(line: &str) -> usize {
    let mut score = 0;
    if GLUED_MARKDOWN.is_match(line) {
        score += 1;
    }
    if MID_LINE_MARKDOWN.is_match(line) && !line.trim().starts_with("##") {
        score += 1;
    }
    score
}

fn truncate_for_log(subject: &str) -> String {
    subject.chars().take(60).collect()
}
