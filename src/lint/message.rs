//! Subject/body splitting for raw commit messages.

/// A commit message split into the parts the rule engine inspects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedMessage {
    /// First line of the message.
    pub subject: String,
    /// Lines from the third onward, joined with `\n`.
    pub body: String,
}

impl ParsedMessage {
    /// Splits a raw message into subject and body.
    ///
    /// The whole message is trimmed first. Line index 1 is treated as the
    /// blank separator and dropped whatever it contains; a message of two
    /// lines or fewer has an empty body.
    pub fn parse(message: &str) -> Self {
        let lines: Vec<&str> = message.trim().split('\n').collect();

        let subject = lines.first().copied().unwrap_or_default().to_string();
        let body = if lines.len() > 2 {
            lines[2..].join("\n")
        } else {
            String::new()
        };

        Self { subject, body }
    }

    /// Builds a message from fields already separated by the commit source.
    pub fn from_parts(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Rejoins subject and body with the conventional blank separator line.
    #[must_use]
    pub fn to_message(&self) -> String {
        if self.body.is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n\n{}", self.subject, self.body)
        }
    }

    /// Returns the body split on `\n`; an empty body yields a single empty line.
    pub fn body_lines(&self) -> Vec<&str> {
        self.body.split('\n').collect()
    }
}
