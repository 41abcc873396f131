//! Block segmenter.
//!
//! Splits a document into blank-line separated blocks. Blocks borrow directly
//! from the input and record their trimmed byte range in it.
//!
//! A block boundary is the exact two-byte sequence `"\n\n"`. Runs of more
//! newlines produce empty segments in between, which are dropped along with
//! whitespace-only ones. Input with CRLF line endings should go through
//! [`normalize_line_endings`] first, and input longer than
//! [`MAX_SOURCE_LEN`](crate::span::MAX_SOURCE_LEN) is rejected before it
//! gets here.

use std::borrow::Cow;

use memchr::memmem;

use crate::block::{classify, BlockType};
use crate::span::Span;

const BLOCK_SEPARATOR: &[u8] = b"\n\n";

/// A trimmed, non-empty block of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Block text, without leading/trailing whitespace.
    pub text: &'a str,
    /// Byte span of `text` in the source input.
    pub span: Span,
}

impl<'a> Block<'a> {
    /// Classify this block's shape.
    #[inline]
    pub fn block_type(&self) -> BlockType {
        classify(self.text)
    }

    /// Iterate over the block's lines.
    #[inline]
    pub fn lines(&self) -> std::str::Split<'a, char> {
        self.text.split('\n')
    }
}

/// Iterator over the blocks of a document, in document order.
pub struct Segmenter<'a> {
    input: &'a str,
    /// Byte offset where the next segment starts.
    offset: usize,
    finder: memmem::Finder<'static>,
}

impl<'a> Segmenter<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            finder: memmem::Finder::new(BLOCK_SEPARATOR),
        }
    }

    /// Trim the raw segment `[start, end)`; `None` if nothing but whitespace.
    #[inline]
    fn make_block(&self, start: usize, end: usize) -> Option<Block<'a>> {
        let raw = &self.input[start..end];
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let leading = raw.len() - raw.trim_start().len();
        let text_start = start + leading;
        Some(Block {
            text,
            span: Span::from_offsets(text_start, text_start + text.len()),
        })
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        while self.offset < self.input.len() {
            let start = self.offset;
            let end = match self.finder.find(&self.input.as_bytes()[start..]) {
                Some(pos) => {
                    self.offset = start + pos + BLOCK_SEPARATOR.len();
                    start + pos
                }
                None => {
                    self.offset = self.input.len();
                    self.input.len()
                }
            };

            if let Some(block) = self.make_block(start, end) {
                return Some(block);
            }
        }
        None
    }
}

/// Split `document` into its blocks.
///
/// ```rust
/// use mdsite_core::lexer::segment;
///
/// let blocks = segment("# Title\n\n\n\nSome text\nmore text\n");
/// let texts: Vec<&str> = blocks.iter().map(|b| b.text).collect();
/// assert_eq!(texts, ["# Title", "Some text\nmore text"]);
/// ```
pub fn segment(document: &str) -> Vec<Block<'_>> {
    Segmenter::new(document).collect()
}

/// Convert CRLF line endings to LF. Borrows when there is nothing to convert.
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if memmem::find(input.as_bytes(), b"\r\n").is_some() {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    }
}
