//! HTML Fragment Validation
//!
//! Generated bodies go straight into a CMS rich-text field, so they must be
//! a well-formed fragment built only from the allowed tag set, and must not
//! fall back to markdown.
//!
//! A body is accepted only when sanitizing it changes nothing: any tag
//! outside the set, any attribute, any comment, and any structure the HTML
//! parser has to repair shows up as a difference.

use ammonia::Builder;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::constants::markup::ALLOWED_TAGS;
use crate::types::{ValidationError, ValidationErrorKind};

const PREVIEW_CHARS: usize = 40;

fn markup_error(message: impl Into<String>) -> ValidationError {
    ValidationError::new(ValidationErrorKind::Markup, message)
}

/// Sanitizer keeping only the allowed tags, with no attributes at all
fn sanitizer() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(HashMap::new())
        .generic_attributes(HashSet::new())
        .strip_comments(true);
    builder
}

/// Byte offset in `input` where it first departs from `cleaned`
fn first_difference(input: &str, cleaned: &str) -> usize {
    input
        .char_indices()
        .zip(cleaned.chars())
        .find(|((_, a), b)| a != b)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| input.len().min(cleaned.len()))
}

/// Check that `html` is a clean fragment of allowed tags.
///
/// Text must escape `&`, `<` and `>`; line breaks are written `<br>`.
pub fn validate_fragment(html: &str) -> Result<(), ValidationError> {
    let cleaned = sanitizer().clean(html).to_string();
    if cleaned == html {
        return Ok(());
    }

    let at = first_difference(html, &cleaned);
    if at == html.len() {
        return Err(markup_error("content ends inside an unclosed tag"));
    }

    let preview: String = html[at..].chars().take(PREVIEW_CHARS).collect();
    Err(markup_error(format!(
        "markup outside the allowed tags ({}) near '{}'",
        ALLOWED_TAGS.join(", "),
        preview
    )))
}

static MARKDOWN_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"```", "code fence"),
        (r"(?m)^[ \t]*#{1,6}[ \t]+\S", "heading"),
        (r"\*\*[^*\n]+\*\*", "bold text"),
        (r"(?m)^[ \t]*[-*+][ \t]+\S", "list bullet"),
        (r"\[[^\]\n]+\]\([^)\s]+\)", "link"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).expect("static markdown pattern"), label))
    .collect()
});

/// Reject markdown constructs in what should be HTML
pub fn reject_markdown(html: &str) -> Result<(), ValidationError> {
    for (pattern, label) in MARKDOWN_PATTERNS.iter() {
        if pattern.is_match(html) {
            return Err(ValidationError::new(
                ValidationErrorKind::Markdown,
                format!("markdown {} found in HTML content", label),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fragment() {
        assert!(
            validate_fragment(
                "<h3>Headline</h3><p>Body <strong>bold</strong> and <em>em</em>.<br>Next</p>"
            )
            .is_ok()
        );
        assert!(validate_fragment("<h2>A</h2>\n<p>B</p>").is_ok());
        assert!(validate_fragment("<p>Farcaster &amp; Zora</p>").is_ok());
        assert!(validate_fragment("plain text").is_ok());
    }

    #[test]
    fn test_attributes_rejected() {
        let err = validate_fragment(
            r#"<p onclick="alert(document.cookie)">x</p><h3 style="position:fixed">y</h3>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Markup);
        assert!(err.message.contains("onclick"));

        assert!(validate_fragment(r#"<h3 style="position:fixed">y</h3>"#).is_err());
        assert!(validate_fragment(r#"<p class="lead">Attrs</p>"#).is_err());
    }

    #[test]
    fn test_self_closed_paragraph_rejected() {
        let err = validate_fragment("<p/>dangling text").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Markup);
    }

    #[test]
    fn test_unclosed_tag() {
        let err = validate_fragment("<p>open").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Markup);
        assert!(err.message.contains("unclosed"));
    }

    #[test]
    fn test_misnested_tags() {
        assert!(validate_fragment("<p><em>x</p></em>").is_err());
        assert!(validate_fragment("<h3>Hello<p>World</p>").is_err());
    }

    #[test]
    fn test_stray_closer() {
        assert!(validate_fragment("</p>").is_err());
    }

    #[test]
    fn test_disallowed_tag() {
        let err = validate_fragment("<script>alert(1)</script>").unwrap_err();
        assert!(err.message.contains("<script>"));
        assert!(validate_fragment("<div><p>x</p></div>").is_err());
    }

    #[test]
    fn test_unterminated_and_comment() {
        assert!(validate_fragment("<p>x</p").is_err());
        assert!(validate_fragment("<!-- note --><p>x</p>").is_err());
        assert!(validate_fragment("<p>1 < 2</p>").is_err());
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("<p a>x</p>", "<p>x</p>"), 2);
        assert_eq!(first_difference("<p>x", "<p>x</p>"), 4);
        assert_eq!(first_difference("é<b>", "é"), 2);
    }

    #[test]
    fn test_markdown_detection() {
        assert!(reject_markdown("<p>plain</p>").is_ok());
        assert!(reject_markdown("<p>a * b = c</p>").is_ok());
        assert!(reject_markdown("## Heading").is_err());
        assert!(reject_markdown("<p>**bold**</p>").is_err());
        assert!(reject_markdown("- item one").is_err());
        assert!(reject_markdown("see [docs](https://example.com)").is_err());
        assert!(reject_markdown("```html\n<p>x</p>\n```").is_err());
    }
}
