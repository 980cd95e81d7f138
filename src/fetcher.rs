//! Article content fetching and merge
//!
//! Two independent retrievals run concurrently: the structured REST
//! summary and the Parsoid article HTML. Either can fail without touching
//! the other; the join observes both outcomes before merging. The merged
//! result never carries an error — a failed arm degrades to its absence
//! value, with a warning as the only trace.

use crate::adapter::adapt_article;
use crate::client::{article_html_endpoint, get_json, get_text, summary_endpoint};
use crate::config::Config;
use crate::Result;
use reqwest::Client;
use serde::Serialize;

/// Merged article content for one topic
#[derive(Debug, Clone, Serialize)]
pub struct ArticleContent {
    /// Raw summary payload (description, thumbnail, ...), passed through
    /// opaquely; `None` when that retrieval failed or was skipped
    pub summary: Option<serde_json::Value>,

    /// Adapted lead excerpt; empty when the article retrieval failed or
    /// was skipped
    pub excerpt_html: String,

    /// Adapted content from the first second-level heading onward; `None`
    /// when the article has no such heading or was not retrieved
    pub remaining_html: Option<String>,
}

impl ArticleContent {
    fn empty() -> Self {
        ArticleContent {
            summary: None,
            excerpt_html: String::new(),
            remaining_html: None,
        }
    }
}

/// Fetches and adapts the content for one topic
///
/// An empty `language` or `topic` would produce malformed request URLs, so
/// both retrievals are skipped and the empty result returned without any
/// outbound request.
///
/// The two retrievals are joined with an all-settled barrier: both futures
/// run to completion regardless of the other's outcome, and neither
/// cancels the other. Each failed arm is logged and mapped to its absence
/// value — this function does not fail.
pub async fn get_article_content(
    client: &Client,
    config: &Config,
    language: &str,
    topic: &str,
) -> ArticleContent {
    if language.is_empty() || topic.is_empty() {
        tracing::debug!("empty language or topic, skipping content retrieval");
        return ArticleContent::empty();
    }

    let (summary_result, html_result) = tokio::join!(
        fetch_summary(client, config, language, topic),
        fetch_article_html(client, config, language, topic),
    );

    let summary = match summary_result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("summary retrieval failed for {}:{}: {}", language, topic, e);
            None
        }
    };

    let (excerpt_html, remaining_html) = match html_result {
        Ok(raw_html) => {
            let adapted = adapt_article(&raw_html, topic, language);
            (adapted.excerpt_html, adapted.remaining_html)
        }
        Err(e) => {
            tracing::warn!("article retrieval failed for {}:{}: {}", language, topic, e);
            (String::new(), None)
        }
    };

    ArticleContent {
        summary,
        excerpt_html,
        remaining_html,
    }
}

/// Retrieves the structured summary payload
async fn fetch_summary(
    client: &Client,
    config: &Config,
    language: &str,
    topic: &str,
) -> Result<serde_json::Value> {
    let url = summary_endpoint(config, language, topic)?;
    get_json(client, config, &url).await
}

/// Retrieves the raw Parsoid article HTML
async fn fetch_article_html(
    client: &Client,
    config: &Config,
    language: &str,
    topic: &str,
) -> Result<String> {
    let url = article_html_endpoint(config, language, topic)?;
    get_text(client, config, &url).await
}
