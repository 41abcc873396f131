//! Tests for the HTML node model and its serialization contract

use mdsite_core::{Attributes, ErrorKind, HtmlNode, LeafNode, MarkdownError, ParentNode};
use pretty_assertions::assert_eq;

// ============================================================================
// Attribute Tests
// ============================================================================

#[test]
fn test_attributes_render_in_insertion_order() {
    let attrs: Attributes = [("href", "https://boot.dev"), ("target", "_blank")]
        .into_iter()
        .collect();
    assert_eq!(attrs.to_html(), r#" href="https://boot.dev" target="_blank""#);
}

#[test]
fn test_attributes_empty_render_nothing() {
    assert_eq!(Attributes::new().to_html(), "");
}

#[test]
fn test_attributes_reinsert_keeps_position() {
    let mut attrs = Attributes::new();
    attrs.insert("src", "a.png");
    attrs.insert("alt", "a");
    let previous = attrs.insert("src", "b.png");

    assert_eq!(previous.as_deref(), Some("a.png"));
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("src"), Some("b.png"));
    assert_eq!(attrs.to_html(), r#" src="b.png" alt="a""#);
}

// ============================================================================
// Leaf Tests
// ============================================================================

#[test]
fn test_leaf_to_html() {
    let node: HtmlNode = LeafNode::new("p", "Hello, world!").into();
    assert_eq!(node.to_html().unwrap(), "<p>Hello, world!</p>");
}

#[test]
fn test_leaf_no_tag_renders_raw_value() {
    let node: HtmlNode = LeafNode::text("Value populated!").into();
    assert_eq!(node.to_html().unwrap(), "Value populated!");
}

#[test]
fn test_leaf_with_attributes() {
    let node: HtmlNode = LeafNode::new("a", "Click me!")
        .with_attr("href", "https://www.google.com")
        .into();
    assert_eq!(
        node.to_html().unwrap(),
        r#"<a href="https://www.google.com">Click me!</a>"#
    );
}

#[test]
fn test_leaf_does_not_escape() {
    let node: HtmlNode = LeafNode::text("<script>&</script>").into();
    assert_eq!(node.to_html().unwrap(), "<script>&</script>");
}

#[test]
fn test_leaf_missing_value_fails() {
    let node: HtmlNode = LeafNode {
        tag: Some("p".to_string()),
        value: None,
        attrs: Attributes::new(),
    }
    .into();

    let err = node.to_html().unwrap_err();
    assert_eq!(err, MarkdownError::Render("missing value"));
    assert_eq!(err.kind(), ErrorKind::Render);
    assert_eq!(err.to_string(), "invalid HTML: missing value");
}

#[test]
fn test_leaf_missing_value_and_tag_fails() {
    let node: HtmlNode = LeafNode {
        tag: None,
        value: None,
        attrs: Attributes::new(),
    }
    .into();
    assert_eq!(node.to_html(), Err(MarkdownError::Render("missing value")));
}

#[test]
fn test_leaf_empty_value_is_valid() {
    let node: HtmlNode = LeafNode::new("img", "")
        .with_attr("src", "/cat.png")
        .with_attr("alt", "cat")
        .into();
    assert_eq!(
        node.to_html().unwrap(),
        r#"<img src="/cat.png" alt="cat"></img>"#
    );
}

// ============================================================================
// Parent Tests
// ============================================================================

#[test]
fn test_parent_with_children() {
    let node: HtmlNode = ParentNode::new(
        "p",
        vec![
            LeafNode::new("b", "Bold text").into(),
            LeafNode::text("Normal text").into(),
            LeafNode::new("i", "italic text").into(),
            LeafNode::text("Normal text").into(),
        ],
    )
    .into();

    assert_eq!(
        node.to_html().unwrap(),
        "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
    );
}

#[test]
fn test_parent_with_grandchildren() {
    let grandchild = LeafNode::new("b", "grandchild");
    let child = ParentNode::new("span", vec![grandchild.into()]);
    let parent: HtmlNode = ParentNode::new("div", vec![child.into()]).into();

    assert_eq!(
        parent.to_html().unwrap(),
        "<div><span><b>grandchild</b></span></div>"
    );
}

#[test]
fn test_parent_empty_children_is_valid() {
    let node: HtmlNode = ParentNode::new("ul", Vec::new()).into();
    assert_eq!(node.to_html().unwrap(), "<ul></ul>");
}

#[test]
fn test_parent_renders_attributes() {
    let node: HtmlNode = ParentNode::new("div", vec![LeafNode::text("x").into()])
        .with_attr("class", "note")
        .into();
    assert_eq!(node.to_html().unwrap(), r#"<div class="note">x</div>"#);
}

#[test]
fn test_parent_missing_tag_fails() {
    let node: HtmlNode = ParentNode {
        tag: None,
        children: Some(vec![LeafNode::text("x").into()]),
        attrs: Attributes::new(),
    }
    .into();
    assert_eq!(node.to_html(), Err(MarkdownError::Render("missing tag")));
}

#[test]
fn test_parent_missing_children_fails() {
    let node: HtmlNode = ParentNode {
        tag: Some("div".to_string()),
        children: None,
        attrs: Attributes::new(),
    }
    .into();
    assert_eq!(
        node.to_html(),
        Err(MarkdownError::Render("missing children"))
    );
}

#[test]
fn test_parent_propagates_child_error() {
    let bad = LeafNode {
        tag: Some("b".to_string()),
        value: None,
        attrs: Attributes::new(),
    };
    let node: HtmlNode = ParentNode::new(
        "div",
        vec![ParentNode::new("p", vec![bad.into()]).into()],
    )
    .into();
    assert_eq!(node.to_html(), Err(MarkdownError::Render("missing value")));
}

// ============================================================================
// Accessor Tests
// ============================================================================

#[test]
fn test_node_accessors() {
    let leaf: HtmlNode = LeafNode::text("x").into();
    assert_eq!(leaf.tag(), None);
    assert!(leaf.children().is_none());

    let parent: HtmlNode = ParentNode::new("ol", vec![leaf.clone()])
        .with_attr("start", "1")
        .into();
    assert_eq!(parent.tag(), Some("ol"));
    assert_eq!(parent.children(), Some(&[leaf][..]));
    assert_eq!(parent.attrs().get("start"), Some("1"));
}

#[test]
fn test_write_html_appends() {
    let mut out = String::from("<!-- head -->");
    let node: HtmlNode = LeafNode::new("p", "x").into();
    node.write_html(&mut out).unwrap();
    assert_eq!(out, "<!-- head --><p>x</p>");
}
