//! # mdsite core
//!
//! Compiles Markdown documents into HTML node trees for a static site.
//!
//! The pipeline runs one way, leaves first:
//!
//! 1. [`lexer`] splits a document into blank-line separated blocks.
//! 2. [`block`] classifies each block (heading, code, quote, lists, paragraph).
//! 3. [`inline`] tokenizes inline text into bold, italic, code, link and image spans.
//! 4. [`compile`] turns each classified block into an [`HtmlNode`] subtree.
//! 5. [`document`] wraps the subtrees in a single `div` and extracts the title.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdsite_core::{compile_document, extract_title};
//!
//! let input = "# Hello World\n\nThis is a **paragraph**.";
//! let html = compile_document(input).unwrap().to_html().unwrap();
//!
//! assert_eq!(extract_title(input).unwrap(), "Hello World");
//! assert_eq!(
//!     html,
//!     "<div><h1>Hello World</h1><p>This is a <b>paragraph</b>.</p></div>"
//! );
//! ```
//!
//! ## Scope
//!
//! This is deliberately not CommonMark. Inline styles don't nest, nothing is
//! escaped, and a malformed document fails with a [`MarkdownError`] rather than
//! being recovered. Every function is pure; documents can be compiled in
//! parallel without coordination.

pub mod block;
pub mod compile;
pub mod document;
pub mod error;
pub mod html;
pub mod inline;
pub mod lexer;
pub mod span;

pub use block::{classify, BlockType};
pub use compile::{compile_block, inline_nodes};
pub use document::{compile_document, extract_title, markdown_to_html};
pub use error::{ErrorKind, MarkdownError, Result};
pub use html::{Attributes, HtmlNode, LeafNode, ParentNode};
pub use inline::{tokenize, SpanKind, TextSpan};
pub use lexer::{segment, Block};
