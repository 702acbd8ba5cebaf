//! Remediation hints for flagged commits.

use super::config::RuleConfig;
use super::issue::IssueKind;

/// Suggestions in display order, keyed by issue category.
const SUGGESTIONS: [(IssueKind, &str); 13] = [
    (IssueKind::EmojiInSubject, "Remove emoji from subject"),
    (
        IssueKind::MarkdownInSubject,
        "Remove markdown markers (##, ###) from subject",
    ),
    (
        IssueKind::MarkdownChaosInBody,
        "Fix chaotic markdown markers in body",
    ),
    (
        IssueKind::MalformedCodeBlocks,
        "Fix code block format, add line breaks",
    ),
    (
        IssueKind::SubjectTooLong,
        "Subject exceeds the length limit, condense to core message",
    ),
    (
        IssueKind::IncompleteSubjectEnding,
        "Remove incomplete ending (e.g., proposal, tasks, ...)",
    ),
    (IssueKind::MultipleSpaces, "Clean up multiple consecutive spaces"),
    (IssueKind::ContainsPlaceholder, "Remove **** placeholders"),
    (
        IssueKind::ContainsChinese,
        "Remove or translate Chinese characters to English",
    ),
    (
        IssueKind::IncompleteListItems,
        "Clean up incomplete list items (lines with only markers)",
    ),
    (
        IssueKind::EmojiFirstLine,
        "Remove standalone emoji lines at the beginning of body",
    ),
    (IssueKind::TooManyEmptyLines, "Reduce excessive empty lines"),
    (
        IssueKind::InvalidFormat,
        "Ensure format follows: type(scope): description",
    ),
];

/// Maps issue tags to suggestions, then adds a size hint for long bodies.
///
/// Unknown tags are ignored. The size hint depends only on the body: a line
/// count over the limit wins over a character count over the limit.
pub fn fix_suggestions(tags: &[String], body: &str, config: &RuleConfig) -> Vec<String> {
    let kinds: Vec<IssueKind> = tags.iter().filter_map(|t| IssueKind::from_tag(t)).collect();

    let mut suggestions: Vec<String> = SUGGESTIONS
        .iter()
        .filter(|(kind, _)| kinds.contains(kind))
        .map(|(_, text)| (*text).to_string())
        .collect();

    if let Some(hint) = body_size_hint(body, config) {
        suggestions.push(hint);
    }

    suggestions
}

fn body_size_hint(body: &str, config: &RuleConfig) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    let line_count = body.split('\n').count();
    let char_count = body.chars().count();

    if line_count > config.long_body_lines {
        Some(format!(
            "\u{26a0}\u{fe0f}  Body is long ({line_count} lines). Consider condensing to key points while preserving essential information"
        ))
    } else if char_count > config.verbose_body_chars {
        Some(format!(
            "\u{26a0}\u{fe0f}  Body is lengthy ({char_count} chars). Summarize verbose sections, keep technical details concise"
        ))
    } else {
        None
    }
}
