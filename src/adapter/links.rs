//! Hyperlink classification and rewriting
//!
//! Every `<a>` in an adapted fragment is classified into exactly one
//! [`LinkClass`] from its `href` and its class list, then rewritten so it
//! either resolves inside the embedding application or opens the source
//! wiki in a new browsing context.

use kuchikikiki::{Attributes, NodeRef};

/// Path prefix of same-wiki page links in Parsoid output
const SOURCE_WIKI_PREFIX: &str = "/wiki";

/// Path prefix of special pages (search, logs, contributions, ...)
const SPECIAL_PAGE_PREFIX: &str = "/wiki/Special:";

/// Anchor prefix of citation references
const CITATION_PREFIX: &str = "#cite_";

/// Marker class Parsoid puts on links to file description pages
const FILE_DESCRIPTION_CLASS: &str = "mw-file-description";

/// Class the viewer styles outbound links with
pub const EXTERNAL_LINK_CLASS: &str = "extlink";

/// Link classification, mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    /// File description page or special page; sent back to the source wiki
    SourcePage,

    /// Regular article on the same wiki; resolved inside the embedding app
    InternalArticle,

    /// Citation anchor within the original article
    Citation,

    /// Everything else: already-absolute links, mailto, protocol-relative
    External,
}

/// Classifies an href, first match wins
///
/// The rules are evaluated top to bottom; the file/special rule has to be
/// checked before the article rule because those hrefs share the `/wiki`
/// prefix. The prefix test is not segment-aware: `/wikisomething` counts
/// as a same-wiki link, matching the upstream markup contract.
pub fn classify_link(href: &str, has_file_marker: bool) -> LinkClass {
    if href.starts_with(SOURCE_WIKI_PREFIX)
        && (has_file_marker || href.starts_with(SPECIAL_PAGE_PREFIX))
    {
        LinkClass::SourcePage
    } else if href.starts_with(SOURCE_WIKI_PREFIX) {
        LinkClass::InternalArticle
    } else if href.starts_with(CITATION_PREFIX) {
        LinkClass::Citation
    } else {
        LinkClass::External
    }
}

/// Rewrites every hyperlink in the document in place
///
/// Elements without an `href` attribute are left untouched. Rewrites per
/// class:
/// - `SourcePage`: absolute URL at the source wiki, new browsing context,
///   class replaced with [`EXTERNAL_LINK_CLASS`].
/// - `InternalArticle`: fragment dropped, `/wiki/` prefix replaced with the
///   language-scoped internal prefix, `?language=` appended. Existing
///   target/class attributes are preserved.
/// - `Citation`: absolute URL at the source wiki pointing at the original
///   topic plus the anchor, new browsing context, external-link class.
/// - `External`: href untouched, new browsing context, external-link class.
pub(crate) fn rewrite_links(document: &NodeRef, topic: &str, language: &str) {
    let anchors: Vec<_> = match document.select("a") {
        Ok(iter) => iter.collect(),
        Err(()) => return,
    };

    for anchor in anchors {
        let mut attrs = anchor.attributes.borrow_mut();

        let href = match attrs.get("href") {
            Some(href) => href.to_string(),
            None => continue,
        };
        let has_file_marker = attrs
            .get("class")
            .map(|classes| {
                classes
                    .split_whitespace()
                    .any(|token| token == FILE_DESCRIPTION_CLASS)
            })
            .unwrap_or(false);

        match classify_link(&href, has_file_marker) {
            LinkClass::SourcePage => {
                attrs.insert(
                    "href",
                    format!("https://{}.wikipedia.org{}", language, href),
                );
                mark_external(&mut attrs);
            }
            LinkClass::InternalArticle => {
                let without_fragment = href.split('#').next().unwrap_or("");
                let internal = without_fragment.replacen(
                    "/wiki/",
                    &format!("/wikipedia/{}/", language),
                    1,
                );
                attrs.insert("href", format!("{}?language={}", internal, language));
            }
            LinkClass::Citation => {
                attrs.insert(
                    "href",
                    format!("https://{}.wikipedia.org/wiki/{}{}", language, topic, href),
                );
                mark_external(&mut attrs);
            }
            LinkClass::External => {
                mark_external(&mut attrs);
            }
        }
    }
}

/// Opens in a new browsing context, tagged for external-link styling.
/// Any class already on the element is replaced.
fn mark_external(attrs: &mut Attributes) {
    attrs.insert("target", "_blank".to_string());
    attrs.insert("class", EXTERNAL_LINK_CLASS.to_string());
}
