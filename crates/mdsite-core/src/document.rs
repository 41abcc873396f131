//! Document assembly: whole-document compilation and title extraction.

use log::{debug, trace};

use crate::block::classify;
use crate::compile::compile_block;
use crate::error::{MarkdownError, Result};
use crate::html::{HtmlNode, ParentNode};
use crate::lexer::{normalize_line_endings, Segmenter};
use crate::span::check_source_len;

/// Prefix of a level-1 heading block.
const TITLE_PREFIX: &str = "# ";

/// Compile a Markdown document into a `div` holding one subtree per block.
///
/// ```rust
/// use mdsite_core::compile_document;
///
/// let node = compile_document("# Hello\n\nSome **bold** text").unwrap();
/// assert_eq!(
///     node.to_html().unwrap(),
///     "<div><h1>Hello</h1><p>Some <b>bold</b> text</p></div>"
/// );
/// ```
pub fn compile_document(markdown: &str) -> Result<HtmlNode> {
    check_source_len(markdown.len())?;
    let source = normalize_line_endings(markdown);

    let mut children = Vec::new();
    for block in Segmenter::new(&source) {
        let block_type = classify(block.text);
        trace!("block at bytes {} classified as {}", block.span, block_type);
        children.push(compile_block(&block, block_type)?);
    }

    debug!(
        "compiled {} blocks from {} bytes of markdown",
        children.len(),
        markdown.len()
    );
    Ok(ParentNode::new("div", children).into())
}

/// Compile and serialize a Markdown document in one step.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    compile_document(markdown)?.to_html()
}

/// Text of the first level-1 heading (`# Title`), trimmed.
///
/// Only the heading's first line is used. Deeper headings are never titles.
pub fn extract_title(markdown: &str) -> Result<String> {
    check_source_len(markdown.len())?;
    let source = normalize_line_endings(markdown);

    Segmenter::new(&source)
        .find_map(|block| block.text.strip_prefix(TITLE_PREFIX))
        .map(|rest| rest.lines().next().unwrap_or_default().trim().to_string())
        .ok_or(MarkdownError::NoTitle)
}
