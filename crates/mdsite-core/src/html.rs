//! HTML node tree produced by the block compiler.
//!
//! The tree is a closed sum of two node shapes:
//!
//! - [`LeafNode`]: an optional tag wrapping a single value. A tag-less leaf
//!   renders its value verbatim.
//! - [`ParentNode`]: a tag wrapping the concatenated rendering of its children.
//!
//! No node escapes its contents. Callers feed trusted, pre-sanitized text.
//!
//! ```rust
//! use mdsite_core::html::{HtmlNode, LeafNode, ParentNode};
//!
//! let node: HtmlNode = ParentNode::new(
//!     "p",
//!     vec![
//!         LeafNode::text("Hello, ").into(),
//!         LeafNode::new("b", "world").into(),
//!     ],
//! )
//! .into();
//!
//! assert_eq!(node.to_html().unwrap(), "<p>Hello, <b>world</b></p>");
//! ```

use crate::error::{MarkdownError, Result};

/// Attribute mapping rendered inside an opening tag.
///
/// Keys are unique. Rendering follows insertion order; re-inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an attribute, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as ` key="value"` pairs, each preceded by a space.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in &self.entries {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

/// A node with no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// Tag name; `None` renders the value as bare text.
    pub tag: Option<String>,
    /// Rendered content. Mandatory at serialization time.
    pub value: Option<String>,
    pub attrs: Attributes,
}

impl LeafNode {
    /// A tagged leaf, e.g. `<b>value</b>`.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Attributes::new(),
        }
    }

    /// A tag-less leaf rendering `value` verbatim.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: Some(value.into()),
            attrs: Attributes::new(),
        }
    }

    /// Add an attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        let value = self
            .value
            .as_deref()
            .ok_or(MarkdownError::Render("missing value"))?;

        match &self.tag {
            None => out.push_str(value),
            Some(tag) => {
                write_open_tag(out, tag, &self.attrs);
                out.push_str(value);
                write_close_tag(out, tag);
            }
        }
        Ok(())
    }
}

/// A node whose content is the concatenation of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    /// Tag name. Mandatory at serialization time.
    pub tag: Option<String>,
    /// Child nodes. `Some(vec![])` is a valid empty element; `None` is not.
    pub children: Option<Vec<HtmlNode>>,
    pub attrs: Attributes,
}

impl ParentNode {
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: Some(tag.into()),
            children: Some(children),
            attrs: Attributes::new(),
        }
    }

    /// Add an attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        let tag = self
            .tag
            .as_deref()
            .ok_or(MarkdownError::Render("missing tag"))?;
        let children = self
            .children
            .as_deref()
            .ok_or(MarkdownError::Render("missing children"))?;

        write_open_tag(out, tag, &self.attrs);
        for child in children {
            child.write_html(out)?;
        }
        write_close_tag(out, tag);
        Ok(())
    }
}

/// An HTML node: exactly one of the two node shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    /// Serialize this node and everything below it to an HTML string.
    ///
    /// Fails with [`MarkdownError::Render`] if any node in the tree is missing
    /// a mandatory field.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    /// Append the serialized form of this node to `out`.
    ///
    /// On error `out` may hold a partial rendering and should be discarded.
    pub fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.write_html(out),
            HtmlNode::Parent(parent) => parent.write_html(out),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.tag.as_deref(),
            HtmlNode::Parent(parent) => parent.tag.as_deref(),
        }
    }

    pub fn attrs(&self) -> &Attributes {
        match self {
            HtmlNode::Leaf(leaf) => &leaf.attrs,
            HtmlNode::Parent(parent) => &parent.attrs,
        }
    }

    /// Children of a parent node; `None` for leaves.
    pub fn children(&self) -> Option<&[HtmlNode]> {
        match self {
            HtmlNode::Leaf(_) => None,
            HtmlNode::Parent(parent) => parent.children.as_deref(),
        }
    }
}

impl From<LeafNode> for HtmlNode {
    fn from(leaf: LeafNode) -> Self {
        HtmlNode::Leaf(leaf)
    }
}

impl From<ParentNode> for HtmlNode {
    fn from(parent: ParentNode) -> Self {
        HtmlNode::Parent(parent)
    }
}

#[inline]
fn write_open_tag(out: &mut String, tag: &str, attrs: &Attributes) {
    out.push('<');
    out.push_str(tag);
    attrs.write_html(out);
    out.push('>');
}

#[inline]
fn write_close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
