//! Block-to-HTML compiler.
//!
//! Each block type has its own conversion. All of them except code blocks run
//! their text through the inline tokenizer via [`inline_nodes`]. Conversions
//! re-check the structural precondition of the type they were handed, so a
//! block passed with the wrong type fails instead of producing garbage.

use crate::block::{
    heading_level, strip_ordered_marker, BlockType, CODE_FENCE, MAX_HEADING_LEVEL,
    UNORDERED_MARKER,
};
use crate::error::{MarkdownError, Result};
use crate::html::{HtmlNode, LeafNode, ParentNode};
use crate::inline::{tokenize, SpanKind, TextSpan};
use crate::lexer::Block;

/// Compile one block, already classified as `block_type`, into an HTML subtree.
pub fn compile_block(block: &Block<'_>, block_type: BlockType) -> Result<HtmlNode> {
    match block_type {
        BlockType::Heading(level) => heading_to_node(block, level),
        BlockType::Code => code_to_node(block),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => unordered_list_to_node(block),
        BlockType::OrderedList => ordered_list_to_node(block),
        BlockType::Paragraph => paragraph_to_node(block),
    }
}

/// Tokenize inline text and convert every span into a node.
pub fn inline_nodes(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(tokenize(text)?.iter().map(span_to_node).collect())
}

/// Convert one text span into its leaf node.
pub fn span_to_node(span: &TextSpan<'_>) -> HtmlNode {
    let leaf = match span.kind {
        SpanKind::Plain => LeafNode::text(span.content),
        SpanKind::Bold => LeafNode::new("b", span.content),
        SpanKind::Italic => LeafNode::new("i", span.content),
        SpanKind::Code => LeafNode::new("code", span.content),
        SpanKind::Link { url } => LeafNode::new("a", span.content).with_attr("href", url),
        SpanKind::Image { url } => LeafNode::new("img", "")
            .with_attr("src", url)
            .with_attr("alt", span.content),
    };
    leaf.into()
}

fn heading_to_node(block: &Block<'_>, level: u8) -> Result<HtmlNode> {
    if !(1..=MAX_HEADING_LEVEL).contains(&level) {
        return Err(MarkdownError::Internal(format!(
            "heading level {} is outside 1..={}",
            level, MAX_HEADING_LEVEL
        )));
    }

    match heading_level(block.text) {
        None => Err(MarkdownError::malformed(
            BlockType::Heading(level),
            "missing `#` marker",
            block.span,
        )),
        Some(found) if found != level => Err(MarkdownError::Internal(format!(
            "block classified as h{} has a level {} marker",
            level, found
        ))),
        Some(_) => {
            // Marker plus the single separating space.
            let text = join_lines(block.text[level as usize + 1..].split('\n'));
            let children = inline_nodes(&text)?;
            Ok(ParentNode::new(format!("h{}", level), children).into())
        }
    }
}

fn code_to_node(block: &Block<'_>) -> Result<HtmlNode> {
    let text = block.text;
    let fence = CODE_FENCE.len();
    if text.len() < 2 * fence || !text.starts_with(CODE_FENCE) || !text.ends_with(CODE_FENCE) {
        return Err(MarkdownError::malformed(
            BlockType::Code,
            "code block must open and close with ```",
            block.span,
        ));
    }

    let inner = &text[fence..text.len() - fence];
    let inner = inner.strip_prefix('\n').unwrap_or(inner);

    let code = ParentNode::new("code", vec![LeafNode::text(inner).into()]);
    Ok(ParentNode::new("pre", vec![code.into()]).into())
}

fn quote_to_node(block: &Block<'_>) -> Result<HtmlNode> {
    let mut lines = Vec::new();
    for line in block.lines() {
        let Some(rest) = line.strip_prefix('>') else {
            return Err(MarkdownError::malformed(
                BlockType::Quote,
                format!("line {:?} does not start with `>`", line),
                block.span,
            ));
        };
        lines.push(rest.trim());
    }

    let children = inline_nodes(&lines.join(" "))?;
    Ok(ParentNode::new("blockquote", children).into())
}

fn paragraph_to_node(block: &Block<'_>) -> Result<HtmlNode> {
    let children = inline_nodes(&join_lines(block.lines()))?;
    Ok(ParentNode::new("p", children).into())
}

fn unordered_list_to_node(block: &Block<'_>) -> Result<HtmlNode> {
    let mut items = Vec::new();
    for line in block.lines() {
        let item = line.strip_prefix(UNORDERED_MARKER).ok_or_else(|| {
            MarkdownError::malformed(
                BlockType::UnorderedList,
                format!("line {:?} does not start with `-`", line),
                block.span,
            )
        })?;
        items.push(list_item(item)?);
    }
    Ok(ParentNode::new("ul", items).into())
}

fn ordered_list_to_node(block: &Block<'_>) -> Result<HtmlNode> {
    let mut items = Vec::new();
    for (index, line) in block.lines().enumerate() {
        let number = index + 1;
        let item = strip_ordered_marker(line, number).ok_or_else(|| {
            MarkdownError::malformed(
                BlockType::OrderedList,
                format!("line {:?} is not numbered `{}.`", line, number),
                block.span,
            )
        })?;
        items.push(list_item(item)?);
    }
    Ok(ParentNode::new("ol", items).into())
}

#[inline]
fn list_item(text: &str) -> Result<HtmlNode> {
    Ok(ParentNode::new("li", inline_nodes(text)?).into())
}

/// Collapse soft line breaks into single spaces.
#[inline]
fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for (i, line) in lines.enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        joined.push_str(line);
    }
    joined
}
