//! Structural noise removal
//!
//! Four passes that strip elements which don't survive embedding: infobox
//! and maintenance tables, galleries, and (broadly) divs. Each pass
//! collects its matches before detaching so the tree is never mutated
//! under a live traversal.

use kuchikikiki::NodeRef;

/// The one div layout that survives the div sweep (alternate infobox
/// markup used by some language editions)
const KEPT_DIV_CLASS: &str = "infobox_v3";

/// Runs all removal passes, in order
pub(crate) fn strip_noise(document: &NodeRef) {
    // Summary sidebar boxes
    remove_where_class(document, "table", |class| class.contains("infobox"));
    // Warning/maintenance boxes
    remove_where_class(document, "table", |class| class.contains("ambox"));
    remove_divs(document);
    // Image gallery listings
    remove_where_class(document, "ul", |class| class.contains("gallery"));
}

/// Detaches every `tag` element whose class attribute satisfies the
/// predicate. Elements without a class attribute are kept.
fn remove_where_class<F>(document: &NodeRef, tag: &str, condemned: F)
where
    F: Fn(&str) -> bool,
{
    let matches: Vec<NodeRef> = match document.select(tag) {
        Ok(iter) => iter
            .filter(|el| {
                el.attributes
                    .borrow()
                    .get("class")
                    .map(|class| condemned(class))
                    .unwrap_or(false)
            })
            .map(|el| el.as_node().clone())
            .collect(),
        Err(()) => return,
    };

    for node in matches {
        node.detach();
    }
}

/// Detaches every div except the `infobox_v3` alternate infobox layout.
///
/// The keep rule is an exact whole-attribute match, so this pass strips
/// arbitrary structural divs (hatnotes, thumbnail wrappers, layout
/// containers), not just sidebars. That breadth is part of the output
/// contract; see DESIGN.md before narrowing it.
fn remove_divs(document: &NodeRef) {
    let matches: Vec<NodeRef> = match document.select("div") {
        Ok(iter) => iter
            .filter(|el| el.attributes.borrow().get("class") != Some(KEPT_DIV_CLASS))
            .map(|el| el.as_node().clone())
            .collect(),
        Err(()) => return,
    };

    for node in matches {
        node.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchikikiki::traits::TendrilSink;

    fn stripped(html: &str) -> String {
        let document = kuchikikiki::parse_html().one(html);
        strip_noise(&document);
        match document.select_first("body") {
            Ok(body) => body.as_node().children().map(|c| c.to_string()).collect(),
            Err(()) => document.to_string(),
        }
    }

    #[test]
    fn test_infobox_table_removed() {
        let out = stripped(
            "<table class=\"infobox vcard\"><tbody><tr><td>x</td></tr></tbody></table><p>Keep</p>",
        );
        assert_eq!(out, "<p>Keep</p>");
    }

    #[test]
    fn test_ambox_table_removed() {
        let out = stripped(
            "<table class=\"box-More_citations_needed ambox\"><tbody><tr><td>w</td></tr></tbody></table><p>Keep</p>",
        );
        assert_eq!(out, "<p>Keep</p>");
    }

    #[test]
    fn test_wikitable_kept() {
        let html = "<table class=\"wikitable\"><tbody><tr><td>data</td></tr></tbody></table>";
        assert_eq!(stripped(html), html);
    }

    #[test]
    fn test_unclassed_table_kept() {
        let html = "<table><tbody><tr><td>data</td></tr></tbody></table>";
        assert_eq!(stripped(html), html);
    }

    #[test]
    fn test_alternate_infobox_div_kept() {
        let html = "<div class=\"infobox_v3\"><p>kept</p></div>";
        assert_eq!(stripped(html), html);
    }

    #[test]
    fn test_other_divs_removed() {
        let out = stripped("<div class=\"hatnote\">note</div><p>Keep</p>");
        assert_eq!(out, "<p>Keep</p>");
    }

    #[test]
    fn test_unclassed_div_removed() {
        let out = stripped("<div><p>gone</p></div><p>Keep</p>");
        assert_eq!(out, "<p>Keep</p>");
    }

    #[test]
    fn test_div_class_match_is_exact() {
        // A class list merely containing the token does not survive
        let out = stripped("<div class=\"infobox_v3 extra\">gone</div><p>Keep</p>");
        assert_eq!(out, "<p>Keep</p>");
    }

    #[test]
    fn test_gallery_list_removed() {
        let out = stripped("<ul class=\"gallery mw-gallery-traditional\"><li>img</li></ul><p>Keep</p>");
        assert_eq!(out, "<p>Keep</p>");
    }

    #[test]
    fn test_plain_list_kept() {
        let html = "<ul><li>item</li></ul>";
        assert_eq!(stripped(html), html);
    }

    #[test]
    fn test_nested_noise_inside_removed_div() {
        let out = stripped(
            "<div class=\"wrapper\"><table class=\"infobox\"><tbody><tr><td>x</td></tr></tbody></table></div><p>Keep</p>",
        );
        assert_eq!(out, "<p>Keep</p>");
    }

    #[test]
    fn test_all_passes_run_together() {
        let out = stripped(concat!(
            "<table class=\"infobox\"><tbody><tr><td>a</td></tr></tbody></table>",
            "<table class=\"ambox\"><tbody><tr><td>b</td></tr></tbody></table>",
            "<div>c</div>",
            "<ul class=\"gallery\"><li>d</li></ul>",
            "<p>Keep</p>"
        ));
        assert_eq!(out, "<p>Keep</p>");
    }
}
