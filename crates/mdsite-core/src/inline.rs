//! Inline span tokenizer.
//!
//! Turns a flattened line of block content into a flat sequence of typed text
//! spans. Tokenizing runs as fixed passes over the span list, each pass only
//! splitting spans that are still plain:
//!
//! 1. `**bold**`
//! 2. `_italic_`
//! 3. `` `code` ``
//! 4. `![alt](url)` images
//! 5. `[text](url)` links
//!
//! Styles never nest: once a span has a kind other than plain, later passes
//! leave it alone. Every span borrows from the input and records its byte
//! range in it, so spans are never re-searched by content.

use std::sync::OnceLock;

use memchr::memmem;
use regex::Regex;

use crate::error::{MarkdownError, Result};
use crate::span::{check_source_len, Span};

/// Kind of a text span. Links and images carry their target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind<'a> {
    Plain,
    Bold,
    Italic,
    Code,
    Link { url: &'a str },
    Image { url: &'a str },
}

/// A run of inline text with a single style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan<'a> {
    /// Text content, without delimiters. For images this is the alt text.
    pub content: &'a str,
    pub kind: SpanKind<'a>,
    /// Byte range of `content` in the tokenized text.
    pub span: Span,
}

impl<'a> TextSpan<'a> {
    /// Target URL for links and images.
    #[inline]
    pub fn target(&self) -> Option<&'a str> {
        match self.kind {
            SpanKind::Link { url } | SpanKind::Image { url } => Some(url),
            _ => None,
        }
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        matches!(self.kind, SpanKind::Plain)
    }
}

/// Tokenize `text` into styled spans, in input order.
///
/// Fails with [`MarkdownError::EvenDelimiter`] when a delimiter is left
/// without a closing partner inside a plain run, and with
/// [`MarkdownError::Internal`] for text longer than
/// [`MAX_SOURCE_LEN`](crate::span::MAX_SOURCE_LEN).
///
/// ```rust
/// use mdsite_core::inline::{tokenize, SpanKind};
///
/// let spans = tokenize("a **bold** [link](https://example.com)").unwrap();
/// assert_eq!(spans[1].kind, SpanKind::Bold);
/// assert_eq!(spans[3].target(), Some("https://example.com"));
/// ```
pub fn tokenize(text: &str) -> Result<Vec<TextSpan<'_>>> {
    check_source_len(text.len())?;
    let tokenizer = Tokenizer::new(text);
    let mut spans = tokenizer.initial();

    spans = tokenizer.split_delimiter(spans, "**", SpanKind::Bold)?;
    spans = tokenizer.split_delimiter(spans, "_", SpanKind::Italic)?;
    spans = tokenizer.split_delimiter(spans, "`", SpanKind::Code)?;
    spans = tokenizer.split_markers(spans, image_regex(), Marker::Image);
    spans = tokenizer.split_markers(spans, link_regex(), Marker::Link);

    Ok(spans)
}

/// `![alt](url)`: alt has no brackets, url has no parentheses.
fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX.get_or_init(|| {
        Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("Invalid image regex")
    })
}

/// `[text](url)`. The "not preceded by `!`" rule is checked by the caller
/// since the regex crate has no lookbehind.
fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| {
        Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("Invalid link regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Image,
    Link,
}

struct Tokenizer<'a> {
    text: &'a str,
}

impl<'a> Tokenizer<'a> {
    #[inline]
    fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// One plain span covering the whole text, or nothing for empty input.
    fn initial(&self) -> Vec<TextSpan<'a>> {
        let mut spans = Vec::with_capacity(8);
        self.push_nonempty(&mut spans, 0, self.text.len(), SpanKind::Plain);
        spans
    }

    #[inline(always)]
    fn make_span(&self, start: usize, end: usize, kind: SpanKind<'a>) -> TextSpan<'a> {
        TextSpan {
            content: &self.text[start..end],
            kind,
            span: Span::from_offsets(start, end),
        }
    }

    #[inline(always)]
    fn push_nonempty(
        &self,
        spans: &mut Vec<TextSpan<'a>>,
        start: usize,
        end: usize,
        kind: SpanKind<'a>,
    ) {
        if start < end {
            spans.push(self.make_span(start, end, kind));
        }
    }

    /// Split every plain span on `delimiter`. Text between a pair of
    /// delimiters becomes `kind`; text outside stays plain. Empty segments
    /// are dropped.
    fn split_delimiter(
        &self,
        spans: Vec<TextSpan<'a>>,
        delimiter: &'static str,
        kind: SpanKind<'a>,
    ) -> Result<Vec<TextSpan<'a>>> {
        let finder = memmem::Finder::new(delimiter);
        let len = delimiter.len();
        let mut out = Vec::with_capacity(spans.len() + 2);

        for span in spans {
            if !span.is_plain() {
                out.push(span);
                continue;
            }

            let base = span.span.start as usize;
            let mut cursor = base;
            let mut opening: Option<usize> = None;

            for rel in finder.find_iter(span.content.as_bytes()) {
                let pos = base + rel;
                match opening.take() {
                    None => {
                        self.push_nonempty(&mut out, cursor, pos, SpanKind::Plain);
                        opening = Some(pos);
                    }
                    Some(open) => {
                        self.push_nonempty(&mut out, open + len, pos, kind);
                    }
                }
                cursor = pos + len;
            }

            if let Some(open) = opening {
                return Err(MarkdownError::EvenDelimiter {
                    delimiter,
                    span: Span::from_offsets(open, open + len),
                });
            }

            self.push_nonempty(&mut out, cursor, span.span.end as usize, SpanKind::Plain);
        }

        Ok(out)
    }

    /// Split every plain span on image or link markers, left to right.
    /// Unmatched text stays plain; the marker's label becomes the content.
    fn split_markers(
        &self,
        spans: Vec<TextSpan<'a>>,
        pattern: &Regex,
        marker: Marker,
    ) -> Vec<TextSpan<'a>> {
        let mut out = Vec::with_capacity(spans.len());

        for span in spans {
            if !span.is_plain() {
                out.push(span);
                continue;
            }

            let base = span.span.start as usize;
            let bytes = span.content.as_bytes();
            let mut cursor = base;

            for caps in pattern.captures_iter(span.content) {
                let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2))
                else {
                    continue;
                };

                if marker == Marker::Link && whole.start() > 0 && bytes[whole.start() - 1] == b'!'
                {
                    continue;
                }

                let url = &self.text[base + url.start()..base + url.end()];
                let kind = match marker {
                    Marker::Image => SpanKind::Image { url },
                    Marker::Link => SpanKind::Link { url },
                };

                self.push_nonempty(&mut out, cursor, base + whole.start(), SpanKind::Plain);
                // Empty labels are kept: an image with no alt text is still an image.
                out.push(self.make_span(base + label.start(), base + label.end(), kind));
                cursor = base + whole.end();
            }

            self.push_nonempty(&mut out, cursor, span.span.end as usize, SpanKind::Plain);
        }

        out
    }
}
