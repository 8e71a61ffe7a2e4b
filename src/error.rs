//! Error types for document parsing

use thiserror::Error;

/// Result type for document operations
pub type DocResult<T> = Result<T, DocError>;

/// Every failure carries the 1-based source line it was detected on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocError {
    /// A heading marker with no heading text after it
    #[error("line {line}: heading marker `{marker}` has no text")]
    MalformedHeading { line: usize, marker: String },

    /// Two sections with the same heading text
    #[error("line {line}: duplicate heading \"{heading}\" (first used on line {first_line})")]
    DuplicateHeading {
        line: usize,
        heading: String,
        first_line: usize,
    },

    /// A fence opened and never closed
    #[error("line {line}: code fence `{fence}` is never closed")]
    UnterminatedBlock { line: usize, fence: String },

    /// A fenced region with nothing inside it
    #[error("line {line}: code block has no content")]
    EmptyBlock { line: usize },

    /// A transcript block that cannot be split into input/output pairs
    #[error("line {line}: malformed transcript: {reason}")]
    TranscriptFormat { line: usize, reason: String },

    /// A table of contents link that does not name exactly one section
    #[error("line {line}: table of contents entry \"{text}\" (#{anchor}) matches {matches} sections")]
    UnresolvedTocEntry {
        line: usize,
        text: String,
        anchor: String,
        matches: usize,
    },

    /// The configured table of contents heading does not exist
    #[error("no \"{heading}\" section found")]
    MissingToc { heading: String },

    /// A configured prompt pattern that is not a valid regex
    #[error("invalid prompt pattern `{pattern}`: {reason}")]
    InvalidPrompt { pattern: String, reason: String },
}

impl DocError {
    /// Source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            DocError::MalformedHeading { line, .. }
            | DocError::DuplicateHeading { line, .. }
            | DocError::UnterminatedBlock { line, .. }
            | DocError::EmptyBlock { line }
            | DocError::TranscriptFormat { line, .. }
            | DocError::UnresolvedTocEntry { line, .. } => Some(*line),
            DocError::MissingToc { .. } | DocError::InvalidPrompt { .. } => None,
        }
    }
}
