//! Block classification.
//!
//! A block's type is a pure function of its text. Rules are tried in a fixed
//! order and the first match wins; anything unmatched is a paragraph.

use std::fmt;

/// Maximum heading level (`######`).
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Fence marking the start and end of a code block.
pub const CODE_FENCE: &str = "```";

/// Marker starting every line of an unordered list.
pub const UNORDERED_MARKER: &str = "- ";

/// The shape of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Section heading with its level (1-6).
    Heading(u8),
    /// Fenced code block.
    Code,
    /// Every line starts with `>`.
    Quote,
    /// Every line starts with `- `.
    UnorderedList,
    /// Lines numbered `1. `, `2. `, ... in sequence.
    OrderedList,
    Paragraph,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Heading(level) => write!(f, "h{} heading", level),
            BlockType::Code => f.write_str("code"),
            BlockType::Quote => f.write_str("quote"),
            BlockType::UnorderedList => f.write_str("unordered list"),
            BlockType::OrderedList => f.write_str("ordered list"),
            BlockType::Paragraph => f.write_str("paragraph"),
        }
    }
}

/// Classify a block by its text.
///
/// ```rust
/// use mdsite_core::block::{classify, BlockType};
///
/// assert_eq!(classify("## Section"), BlockType::Heading(2));
/// assert_eq!(classify("1. a\n2. b"), BlockType::OrderedList);
/// assert_eq!(classify("1. a\n3. b"), BlockType::Paragraph);
/// ```
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level);
    }
    if is_code(block) {
        return BlockType::Code;
    }
    if is_quote(block) {
        return BlockType::Quote;
    }
    if is_unordered_list(block) {
        return BlockType::UnorderedList;
    }
    if is_ordered_list(block) {
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}

/// Level of a heading marker at the very start of `block`: 1 to 6 `#`
/// followed by a single space.
pub fn heading_level(block: &str) -> Option<u8> {
    let bytes = block.as_bytes();
    let hashes = bytes.iter().take_while(|&&b| b == b'#').count();

    if (1..=MAX_HEADING_LEVEL as usize).contains(&hashes) && bytes.get(hashes) == Some(&b' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// Opens and closes with a fence. A lone fence doesn't count: the opening
/// and closing fences must not overlap.
#[inline]
fn is_code(block: &str) -> bool {
    block.len() >= 2 * CODE_FENCE.len()
        && block.starts_with(CODE_FENCE)
        && block.ends_with(CODE_FENCE)
}

#[inline]
fn is_quote(block: &str) -> bool {
    block.split('\n').all(|line| line.starts_with('>'))
}

#[inline]
fn is_unordered_list(block: &str) -> bool {
    block
        .split('\n')
        .all(|line| line.starts_with(UNORDERED_MARKER))
}

#[inline]
fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(index, line)| strip_ordered_marker(line, index + 1).is_some())
}

/// Strip the `"{number}. "` marker from an ordered list line.
///
/// The marker length follows the number's digit count, so item 10 strips
/// four bytes, not three.
pub fn strip_ordered_marker(line: &str, number: usize) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let parsed: usize = line[..digits].parse().ok()?;
    if parsed != number || line[..digits].starts_with('0') {
        return None;
    }
    line[digits..].strip_prefix(". ")
}
