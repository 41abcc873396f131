//! Source location tracking.
//!
//! Blocks carry a `Span` into the source document, text spans carry one into the
//! inline text they were tokenized from. Errors reuse the same type to point at
//! the offending bytes.

use std::fmt;

use crate::error::{MarkdownError, Result};

/// Largest input, in bytes, whose offsets fit in a [`Span`].
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// A byte range in some source text.
///
/// Spans use byte offsets (not character offsets). Both `start` and `end` are
/// inclusive-exclusive: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use mdsite_core::span::Span;
///
/// let span = Span::new(0, 10);
/// assert_eq!(span.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span from `usize` offsets into a source no longer than
    /// [`MAX_SOURCE_LEN`]. Entry points check that with [`check_source_len`].
    #[inline]
    pub fn from_offsets(start: usize, end: usize) -> Self {
        debug_assert!(
            start <= end && end <= MAX_SOURCE_LEN,
            "offsets {}..{} do not fit in a span",
            start,
            end
        );
        Self::new(start as u32, end as u32)
    }

    /// Get the length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The byte range as a `usize` range, for slicing.
    #[inline]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Fail for a source too long for `Span` offsets.
pub fn check_source_len(len: usize) -> Result<()> {
    if len > MAX_SOURCE_LEN {
        return Err(MarkdownError::Internal(format!(
            "input of {} bytes exceeds the {} byte limit",
            len, MAX_SOURCE_LEN
        )));
    }
    Ok(())
}
