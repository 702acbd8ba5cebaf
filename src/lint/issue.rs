//! Issue types produced by the rule engine.

use std::fmt;

/// Category of a detected problem, independent of any measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Literal `****` placeholder left in the message.
    ContainsPlaceholder,
    /// Subject longer than the configured limit.
    SubjectTooLong,
    /// Chinese characters anywhere in the message.
    ContainsChinese,
    /// Emoji in the subject line.
    EmojiInSubject,
    /// Markdown heading markers in the subject line.
    MarkdownInSubject,
    /// Subject not shaped like `type(scope): description`.
    InvalidFormat,
    /// Body opens with a line holding only an emoji.
    EmojiFirstLine,
    /// Too many list markers with no content after them.
    IncompleteListItems,
    /// Long body dominated by blank lines.
    TooManyEmptyLines,
    /// Subject trailing off with `proposal`, `tasks` or `...`.
    IncompleteSubjectEnding,
    /// Consecutive spaces in the subject.
    MultipleSpaces,
    /// `##` markers glued to text or dropped mid-line in the body.
    MarkdownChaosInBody,
    /// Fenced code block squeezed onto one run.
    MalformedCodeBlocks,
}

impl IssueKind {
    /// All kinds in rule evaluation order.
    pub const ALL: [IssueKind; 13] = [
        IssueKind::ContainsPlaceholder,
        IssueKind::SubjectTooLong,
        IssueKind::ContainsChinese,
        IssueKind::EmojiInSubject,
        IssueKind::MarkdownInSubject,
        IssueKind::InvalidFormat,
        IssueKind::EmojiFirstLine,
        IssueKind::IncompleteListItems,
        IssueKind::TooManyEmptyLines,
        IssueKind::IncompleteSubjectEnding,
        IssueKind::MultipleSpaces,
        IssueKind::MarkdownChaosInBody,
        IssueKind::MalformedCodeBlocks,
    ];

    /// Returns the tag without any parameter suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::ContainsPlaceholder => "contains-****",
            IssueKind::SubjectTooLong => "subject-too-long",
            IssueKind::ContainsChinese => "contains-Chinese",
            IssueKind::EmojiInSubject => "emoji-in-subject",
            IssueKind::MarkdownInSubject => "markdown-in-subject",
            IssueKind::InvalidFormat => "invalid-format",
            IssueKind::EmojiFirstLine => "emoji-first-line",
            IssueKind::IncompleteListItems => "incomplete-list-items",
            IssueKind::TooManyEmptyLines => "too-many-empty-lines",
            IssueKind::IncompleteSubjectEnding => "incomplete-subject-ending",
            IssueKind::MultipleSpaces => "multiple-spaces",
            IssueKind::MarkdownChaosInBody => "markdown-chaos-in-body",
            IssueKind::MalformedCodeBlocks => "malformed-code-blocks",
        }
    }

    /// Recovers the kind from a serialized tag, including parameterized ones
    /// such as `subject-too-long-120`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.starts_with("subject-too-long") {
            return Some(IssueKind::SubjectTooLong);
        }
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single triggered rule, carrying what the rule measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// `****` placeholder present.
    ContainsPlaceholder,
    /// Subject over the length limit.
    SubjectTooLong {
        /// Subject length in characters.
        length: usize,
    },
    /// Chinese characters present.
    ContainsChinese,
    /// Emoji in the subject.
    EmojiInSubject,
    /// Markdown markers in the subject.
    MarkdownInSubject,
    /// Subject is not a conventional commit header.
    InvalidFormat,
    /// Standalone emoji opening the body.
    EmojiFirstLine,
    /// Empty list items in the body.
    IncompleteListItems {
        /// Number of content-less marker lines.
        count: usize,
        /// Configured tolerance.
        threshold: usize,
    },
    /// Body mostly blank lines.
    TooManyEmptyLines {
        /// Blank body lines.
        empty: usize,
        /// All body lines.
        total: usize,
        /// Configured tolerance in percent.
        max_percent: usize,
    },
    /// Unfinished subject ending.
    IncompleteSubjectEnding,
    /// Doubled spaces in the subject.
    MultipleSpaces,
    /// Misplaced `##` markers in the body.
    MarkdownChaosInBody {
        /// Misplaced marker occurrences.
        count: usize,
    },
    /// Inline fenced code block.
    MalformedCodeBlocks,
}

impl Issue {
    /// Returns the category of this issue.
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::ContainsPlaceholder => IssueKind::ContainsPlaceholder,
            Issue::SubjectTooLong { .. } => IssueKind::SubjectTooLong,
            Issue::ContainsChinese => IssueKind::ContainsChinese,
            Issue::EmojiInSubject => IssueKind::EmojiInSubject,
            Issue::MarkdownInSubject => IssueKind::MarkdownInSubject,
            Issue::InvalidFormat => IssueKind::InvalidFormat,
            Issue::EmojiFirstLine => IssueKind::EmojiFirstLine,
            Issue::IncompleteListItems { .. } => IssueKind::IncompleteListItems,
            Issue::TooManyEmptyLines { .. } => IssueKind::TooManyEmptyLines,
            Issue::IncompleteSubjectEnding => IssueKind::IncompleteSubjectEnding,
            Issue::MultipleSpaces => IssueKind::MultipleSpaces,
            Issue::MarkdownChaosInBody { .. } => IssueKind::MarkdownChaosInBody,
            Issue::MalformedCodeBlocks => IssueKind::MalformedCodeBlocks,
        }
    }

    /// Returns the tag written to reports. Only subject length is embedded.
    pub fn tag(&self) -> String {
        match self {
            Issue::SubjectTooLong { length } => format!("subject-too-long-{length}"),
            other => other.kind().as_str().to_string(),
        }
    }

    /// Returns the sentence shown to someone fixing the message by hand.
    pub fn description(&self) -> String {
        match self {
            Issue::ContainsPlaceholder => {
                "Contains **** placeholder - please replace with actual content".to_string()
            }
            Issue::SubjectTooLong { length } => {
                format!("Subject is too long ({length} characters)")
            }
            Issue::ContainsChinese => {
                "Contains Chinese characters - use English only".to_string()
            }
            Issue::EmojiInSubject => {
                "Subject contains emoji - remove emoji from subject line".to_string()
            }
            Issue::MarkdownInSubject => {
                "Subject contains markdown markers (## or ###)".to_string()
            }
            Issue::InvalidFormat => {
                "Subject does not follow the type(scope): description format".to_string()
            }
            Issue::EmojiFirstLine => "Body starts with standalone emoji line".to_string(),
            Issue::IncompleteListItems { count, threshold } => format!(
                "Too many incomplete list items ({count}) - threshold is {threshold}"
            ),
            Issue::TooManyEmptyLines {
                empty,
                total,
                max_percent,
            } => format!(
                "Too many empty lines ({empty}/{total}) - exceeds {max_percent}% threshold"
            ),
            Issue::IncompleteSubjectEnding => {
                "Subject has incomplete ending (proposal/tasks/...)".to_string()
            }
            Issue::MultipleSpaces => {
                "Subject contains multiple consecutive spaces".to_string()
            }
            Issue::MarkdownChaosInBody { count } => format!(
                "Chaotic markdown markers in body ({count} issues) - use proper markdown formatting"
            ),
            Issue::MalformedCodeBlocks => "Malformed code blocks detected - \
                 code blocks should have line breaks, not inline"
                .to_string(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}
