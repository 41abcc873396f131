//! Error taxonomy for the Markdown pipeline.
//!
//! Every error is terminal for the document being compiled. Nothing in the
//! pipeline retries or emits partial output; the caller decides whether to
//! abort a whole run or skip the offending document.

use thiserror::Error;

use crate::block::BlockType;
use crate::span::Span;

/// Error kinds for categorizing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An inline delimiter was opened but never closed
    UnterminatedDelimiter,
    /// A block failed its own type's structural precondition
    MalformedBlock,
    /// A node was missing a mandatory field at serialization time
    Render,
    /// No level-1 heading in the document
    NoTitle,
    /// Classification and compilation disagree
    Internal,
}

/// An error raised while compiling or serializing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    /// A `**`, `_` or `` ` `` delimiter appears an odd number of times in a
    /// plain run. `span` covers the delimiter left without a partner, relative
    /// to the inline text that was tokenized.
    #[error("invalid Markdown syntax: no closing `{delimiter}` for delimiter at bytes {span}")]
    EvenDelimiter {
        delimiter: &'static str,
        span: Span,
    },

    /// A block classified as `block_type` does not have the shape that type
    /// requires. `span` is the block's range in the source document.
    #[error("malformed {block_type} block at bytes {span}: {reason}")]
    MalformedBlock {
        block_type: BlockType,
        reason: String,
        span: Span,
    },

    /// Serialization hit a node without a mandatory field.
    #[error("invalid HTML: {0}")]
    Render(&'static str),

    #[error("no level-1 heading found")]
    NoTitle,

    #[error("internal error: {0}")]
    Internal(String),
}

impl MarkdownError {
    /// Create an error for a block that doesn't match its classified shape.
    pub fn malformed(block_type: BlockType, reason: impl Into<String>, span: Span) -> Self {
        Self::MalformedBlock {
            block_type,
            reason: reason.into(),
            span,
        }
    }

    /// Get the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EvenDelimiter { .. } => ErrorKind::UnterminatedDelimiter,
            Self::MalformedBlock { .. } => ErrorKind::MalformedBlock,
            Self::Render(_) => ErrorKind::Render,
            Self::NoTitle => ErrorKind::NoTitle,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The source location this error points at, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::EvenDelimiter { span, .. } | Self::MalformedBlock { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MarkdownError>;
