//! HTML adaptation pipeline
//!
//! This module turns raw Parsoid article markup into fragments that can be
//! embedded in the viewer:
//! - Body isolation (the REST endpoint returns a full document)
//! - Lead/remainder split at the first second-level heading
//! - Link rewriting per the classification rules in [`links`]
//! - Structural noise removal per [`cleanup`]
//!
//! The whole pipeline is pure string-in/string-out: no network access, no
//! error channel. Malformed markup is handled permissively by the HTML5
//! parser.

mod cleanup;
mod links;

pub use links::{classify_link, LinkClass, EXTERNAL_LINK_CLASS};

use kuchikikiki::traits::TendrilSink;
use kuchikikiki::NodeRef;
use regex::Regex;
use std::sync::LazyLock;

// Lazy match: first <body> envelope up to the first closing tag.
static BODY_ENVELOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap());

static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<h2[\s>]").unwrap());

/// Adapted article fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptedArticle {
    /// Converted content before the first second-level heading
    pub excerpt_html: String,

    /// Converted content from the first second-level heading onward,
    /// or `None` when the article has no such heading
    pub remaining_html: Option<String>,
}

/// Adapts raw article markup for embedding
///
/// Splits the body content at the first `<h2>` and converts each segment
/// independently. `remaining_html` is `None` exactly when no heading was
/// found; an empty trailing section and a missing one are distinct cases.
///
/// # Example
///
/// ```
/// use wikifold::adapter::adapt_article;
///
/// let adapted = adapt_article(
///     "<p>Lead.</p><h2>History</h2><p>Rest.</p>",
///     "Topic",
///     "en",
/// );
/// assert_eq!(adapted.excerpt_html, "<p>Lead.</p>");
/// assert_eq!(adapted.remaining_html.as_deref(), Some("<h2>History</h2><p>Rest.</p>"));
/// ```
pub fn adapt_article(raw_html: &str, topic: &str, language: &str) -> AdaptedArticle {
    let body = isolate_body(raw_html);

    match split_at_first_section(body) {
        Some(at) => {
            let (lead, rest) = body.split_at(at);
            AdaptedArticle {
                excerpt_html: convert_fragment(lead, topic, language),
                remaining_html: Some(convert_fragment(rest, topic, language)),
            }
        }
        None => AdaptedArticle {
            excerpt_html: convert_fragment(body, topic, language),
            remaining_html: None,
        },
    }
}

/// Returns the inner content of the first `<body>` envelope, or the whole
/// input when there is none (upstream content is not guaranteed to be a
/// full document).
fn isolate_body(raw_html: &str) -> &str {
    BODY_ENVELOPE
        .captures(raw_html)
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str())
        .unwrap_or(raw_html)
}

/// Byte offset of the first second-level heading tag, if any
///
/// The split happens at the raw-string level so that the unconverted lead
/// and remainder concatenate back to the body content exactly.
fn split_at_first_section(body: &str) -> Option<usize> {
    SECTION_HEADING.find(body).map(|m| m.start())
}

/// Converts one segment: parse, rewrite links, strip noise, serialize
fn convert_fragment(fragment: &str, topic: &str, language: &str) -> String {
    let document = kuchikikiki::parse_html().one(fragment);

    links::rewrite_links(&document, topic, language);
    cleanup::strip_noise(&document);

    serialize_body_children(&document)
}

/// Serializes the children of the parsed document's `<body>`
///
/// The HTML5 parser synthesizes the `<html>`/`<head>`/`<body>` wrapper
/// around a fragment; only the body content is the caller's.
fn serialize_body_children(document: &NodeRef) -> String {
    match document.select_first("body") {
        Ok(body) => body.as_node().children().map(|child| child.to_string()).collect(),
        Err(()) => document.to_string(),
    }
}
