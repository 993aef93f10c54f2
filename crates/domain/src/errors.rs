use std::fmt;
use thiserror::Error;

/// Message section a count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Question,
    Answer,
    /// Answer, authority and additional records taken together.
    Records,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Question => "question",
            Section::Answer => "answer",
            Section::Records => "resource record",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Read at offset {offset} is out of bounds for a {len}-byte buffer")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: &'static str },

    #[error("Label '{label}' is {len} bytes long (maximum is 63)")]
    LabelTooLong { label: String, len: usize },

    #[error("Empty label in name '{name}'")]
    EmptyLabel { name: String },

    #[error("Invalid escape sequence in name '{name}'")]
    InvalidEscape { name: String },

    #[error("Record data is {len} bytes long (maximum is 65535)")]
    RdataTooLong { len: usize },

    #[error("Truncated message: {len} bytes available, at least {needed} required")]
    TruncatedMessage { len: usize, needed: usize },

    #[error("Header declares {declared} {section} entries but the message holds {actual}")]
    CountMismatch {
        section: Section,
        declared: usize,
        actual: usize,
    },

    #[error("Too many {section} entries: {count} does not fit a 16-bit count")]
    TooManyEntries { section: Section, count: usize },
}

impl WireError {
    /// True for errors caused by the input ending early rather than by bad content.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            WireError::OutOfBounds { .. } | WireError::TruncatedMessage { .. }
        )
    }
}
