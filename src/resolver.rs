//! Wikidata identifier resolution
//!
//! One metadata query against the action API answers "which Wikidata item
//! does this article map to?". A page with no mapping (or no page at all)
//! is a `None`, not an error; transport failures propagate to the caller.

use crate::client::{action_api_endpoint, get_json};
use crate::config::Config;
use crate::Result;
use reqwest::Client;

/// Resolves a topic to its Wikidata item id (e.g. `Q42`)
///
/// Issues `action=query&prop=pageprops&ppprop=wikibase_item` with redirect
/// resolution, and walks `query.pages[<any>].pageprops.wikibase_item` in
/// the response. The API keys pages by a numeric id unknown in advance, so
/// the first page entry is taken; a single title yields a single page.
///
/// The returned token is opaque — no parsing or validation is applied.
///
/// # Errors
///
/// Network errors, non-2xx statuses (after the client retry policy) and
/// JSON decode failures are returned to the caller. A response that merely
/// lacks the expected fields is `Ok(None)`.
pub async fn find_wikidata_item(
    client: &Client,
    config: &Config,
    language: &str,
    topic: &str,
) -> Result<Option<String>> {
    let mut url = action_api_endpoint(config, language)?;
    url.query_pairs_mut()
        .append_pair("action", "query")
        .append_pair("prop", "pageprops")
        .append_pair("ppprop", "wikibase_item")
        .append_pair("redirects", "resolve")
        .append_pair("titles", topic)
        .append_pair("format", "json");

    let response = get_json(client, config, &url).await?;

    let item = extract_wikibase_item(&response);
    tracing::debug!(
        "wikibase item for {}:{}: {}",
        language,
        topic,
        item.as_deref().unwrap_or("none")
    );
    Ok(item)
}

/// Pulls the wikibase item out of an action-API query response
///
/// Any missing step of the path means "no mapping".
fn extract_wikibase_item(response: &serde_json::Value) -> Option<String> {
    response
        .get("query")?
        .get("pages")?
        .as_object()?
        .values()
        .next()?
        .get("pageprops")?
        .get("wikibase_item")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_item_present() {
        let response = json!({
            "query": {
                "pages": {
                    "736": {
                        "pageid": 736,
                        "title": "Albert Einstein",
                        "pageprops": { "wikibase_item": "Q937" }
                    }
                }
            }
        });
        assert_eq!(extract_wikibase_item(&response), Some("Q937".to_string()));
    }

    #[test]
    fn test_extract_no_pageprops() {
        let response = json!({
            "query": {
                "pages": {
                    "-1": { "title": "No_such_page", "missing": "" }
                }
            }
        });
        assert_eq!(extract_wikibase_item(&response), None);
    }

    #[test]
    fn test_extract_no_wikibase_item_prop() {
        let response = json!({
            "query": {
                "pages": {
                    "10": { "title": "Some_page", "pageprops": { "displaytitle": "x" } }
                }
            }
        });
        assert_eq!(extract_wikibase_item(&response), None);
    }

    #[test]
    fn test_extract_no_query() {
        assert_eq!(extract_wikibase_item(&json!({"batchcomplete": ""})), None);
    }

    #[test]
    fn test_extract_empty_pages() {
        let response = json!({ "query": { "pages": {} } });
        assert_eq!(extract_wikibase_item(&response), None);
    }

    #[test]
    fn test_extract_non_string_item() {
        let response = json!({
            "query": { "pages": { "1": { "pageprops": { "wikibase_item": 42 } } } }
        });
        assert_eq!(extract_wikibase_item(&response), None);
    }
}
