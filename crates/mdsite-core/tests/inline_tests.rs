//! Tests for the inline span tokenizer

use mdsite_core::span::{check_source_len, Span, MAX_SOURCE_LEN};
use mdsite_core::{tokenize, ErrorKind, MarkdownError, SpanKind, TextSpan};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Flatten spans into `(kind, content)` pairs for comparison.
fn kinds<'a>(spans: &[TextSpan<'a>]) -> Vec<(SpanKind<'a>, &'a str)> {
    spans.iter().map(|s| (s.kind, s.content)).collect()
}

/// Re-attach delimiters to reproduce the tokenized text.
fn rejoin(spans: &[TextSpan<'_>]) -> String {
    spans
        .iter()
        .map(|s| match s.kind {
            SpanKind::Plain => s.content.to_string(),
            SpanKind::Bold => format!("**{}**", s.content),
            SpanKind::Italic => format!("_{}_", s.content),
            SpanKind::Code => format!("`{}`", s.content),
            SpanKind::Link { url } => format!("[{}]({})", s.content, url),
            SpanKind::Image { url } => format!("![{}]({})", s.content, url),
        })
        .collect()
}

// ============================================================================
// Delimiter Tests
// ============================================================================

#[test]
fn test_plain_text_is_one_span() {
    let spans = tokenize("This is plain text").unwrap();
    assert_eq!(kinds(&spans), vec![(SpanKind::Plain, "This is plain text")]);
    assert_eq!(spans[0].span, Span::new(0, 18));
}

#[test]
fn test_empty_text_has_no_spans() {
    assert!(tokenize("").unwrap().is_empty());
}

#[test]
fn test_code_delimiter() {
    let spans = tokenize("This is text with a `code block` word").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Plain, "This is text with a "),
            (SpanKind::Code, "code block"),
            (SpanKind::Plain, " word"),
        ]
    );
}

#[test]
fn test_multiple_code_spans() {
    let spans =
        tokenize("This is text with a `code block` word with `another code block` afterwards")
            .unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Plain, "This is text with a "),
            (SpanKind::Code, "code block"),
            (SpanKind::Plain, " word with "),
            (SpanKind::Code, "another code block"),
            (SpanKind::Plain, " afterwards"),
        ]
    );
}

#[test]
fn test_bold_at_start() {
    let spans = tokenize("**This is bold** text").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![(SpanKind::Bold, "This is bold"), (SpanKind::Plain, " text")]
    );
}

#[test]
fn test_italic_at_end() {
    let spans = tokenize("This is text with _italics_").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Plain, "This is text with "),
            (SpanKind::Italic, "italics"),
        ]
    );
}

#[test]
fn test_adjacent_styles() {
    let spans = tokenize("**bold**_italic_`code`").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Bold, "bold"),
            (SpanKind::Italic, "italic"),
            (SpanKind::Code, "code"),
        ]
    );
}

#[test]
fn test_styled_spans_are_not_rescanned() {
    // The underscore and backticks inside bold stay literal.
    let spans = tokenize("**snake_case `x`** then _it_").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Bold, "snake_case `x`"),
            (SpanKind::Plain, " then "),
            (SpanKind::Italic, "it"),
        ]
    );
}

#[test]
fn test_empty_delimited_segment_is_dropped() {
    let spans = tokenize("a****b").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![(SpanKind::Plain, "a"), (SpanKind::Plain, "b")]
    );
}

#[test]
fn test_span_offsets_point_into_text() {
    let text = "ab **cd** ef";
    let spans = tokenize(text).unwrap();
    for span in &spans {
        assert_eq!(&text[span.span.range()], span.content);
    }
    assert_eq!(spans[1].span, Span::new(5, 7));
}

#[rstest]
#[case("a **b", "**", 2)]
#[case("**a** **b** **c", "**", 12)]
#[case("snake_case word", "_", 5)]
#[case("`unclosed code", "`", 0)]
fn test_unterminated_delimiter(
    #[case] text: &str,
    #[case] delimiter: &str,
    #[case] offset: u32,
) {
    let err = tokenize(text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnterminatedDelimiter);
    match err {
        MarkdownError::EvenDelimiter { delimiter: d, span } => {
            assert_eq!(d, delimiter);
            assert_eq!(span.start, offset);
            assert_eq!(span.len() as usize, delimiter.len());
        }
        other => panic!("Expected EvenDelimiter, got {:?}", other),
    }
}

#[rstest]
#[case("plain **bold** plain **more bold**")]
#[case("_one_ and _two_ and _three_")]
#[case("`a` b `c`")]
#[case("**starts** and ends with **bold**")]
fn test_single_delimiter_roundtrip(#[case] text: &str) {
    let spans = tokenize(text).unwrap();
    assert_eq!(rejoin(&spans), text);
}

// ============================================================================
// Image Tests
// ============================================================================

#[test]
fn test_single_image() {
    let spans = tokenize("This is text with an ![image](https://i.imgur.com/zjjcJKZ.png)").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Plain, "This is text with an "),
            (
                SpanKind::Image {
                    url: "https://i.imgur.com/zjjcJKZ.png"
                },
                "image"
            ),
        ]
    );
    assert_eq!(spans[1].target(), Some("https://i.imgur.com/zjjcJKZ.png"));
}

#[test]
fn test_multiple_images_with_trailing_text() {
    let spans = tokenize("![a](/a.png) and ![b](/b.png) end").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Image { url: "/a.png" }, "a"),
            (SpanKind::Plain, " and "),
            (SpanKind::Image { url: "/b.png" }, "b"),
            (SpanKind::Plain, " end"),
        ]
    );
}

#[test]
fn test_image_with_empty_alt_is_kept() {
    let spans = tokenize("![](/a.png)").unwrap();
    assert_eq!(kinds(&spans), vec![(SpanKind::Image { url: "/a.png" }, "")]);
}

#[test]
fn test_repeated_alt_text_uses_match_positions() {
    // The alt text also appears earlier as plain text.
    let spans = tokenize("cat says ![cat](/cat.png)").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Plain, "cat says "),
            (SpanKind::Image { url: "/cat.png" }, "cat"),
        ]
    );
    assert_eq!(spans[1].span, Span::new(11, 14));
}

#[test]
fn test_nested_brackets_do_not_match() {
    let spans = tokenize("![a [b]](/x.png)").unwrap();
    assert_eq!(kinds(&spans), vec![(SpanKind::Plain, "![a [b]](/x.png)")]);
}

// ============================================================================
// Link Tests
// ============================================================================

#[test]
fn test_links() {
    let spans = tokenize(
        "This is text with a link [to boot dev](https://www.boot.dev) and [to youtube](https://www.youtube.com/@bootdotdev)",
    )
    .unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Plain, "This is text with a link "),
            (
                SpanKind::Link {
                    url: "https://www.boot.dev"
                },
                "to boot dev"
            ),
            (SpanKind::Plain, " and "),
            (
                SpanKind::Link {
                    url: "https://www.youtube.com/@bootdotdev"
                },
                "to youtube"
            ),
        ]
    );
}

#[test]
fn test_link_and_image_together() {
    let spans = tokenize("[home](/) ![logo](/logo.png)").unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Link { url: "/" }, "home"),
            (SpanKind::Plain, " "),
            (SpanKind::Image { url: "/logo.png" }, "logo"),
        ]
    );
}

#[test]
fn test_plain_text_has_no_target() {
    let spans = tokenize("[unfinished link").unwrap();
    assert_eq!(kinds(&spans), vec![(SpanKind::Plain, "[unfinished link")]);
    assert_eq!(spans[0].target(), None);
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_text_to_spans() {
    let spans = tokenize(
        "This is **text** with an _italic_ word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)",
    )
    .unwrap();
    assert_eq!(
        kinds(&spans),
        vec![
            (SpanKind::Plain, "This is "),
            (SpanKind::Bold, "text"),
            (SpanKind::Plain, " with an "),
            (SpanKind::Italic, "italic"),
            (SpanKind::Plain, " word and a "),
            (SpanKind::Code, "code block"),
            (SpanKind::Plain, " and an "),
            (
                SpanKind::Image {
                    url: "https://i.imgur.com/fJRm4Vk.jpeg"
                },
                "obi wan image"
            ),
            (SpanKind::Plain, " and a "),
            (
                SpanKind::Link {
                    url: "https://boot.dev"
                },
                "link"
            ),
        ]
    );
    assert_eq!(
        rejoin(&spans),
        "This is **text** with an _italic_ word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)"
    );
}

#[test]
fn test_link_inside_bold_stays_bold() {
    let spans = tokenize("**[x](/y)**").unwrap();
    assert_eq!(kinds(&spans), vec![(SpanKind::Bold, "[x](/y)")]);
}

// ============================================================================
// Source Length Tests
// ============================================================================

#[test]
fn test_source_len_limit_matches_span_width() {
    assert_eq!(MAX_SOURCE_LEN, u32::MAX as usize);
    check_source_len(0).unwrap();
    check_source_len(MAX_SOURCE_LEN).unwrap();
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_source_len_over_limit_is_internal_error() {
    let err = check_source_len(MAX_SOURCE_LEN + 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn test_span_from_offsets() {
    assert_eq!(Span::from_offsets(3, 7), Span::new(3, 7));
}
