//! HTTP client construction and Wikipedia endpoint handling
//!
//! This module owns everything about talking to Wikipedia:
//! - Building the reqwest client with the identification headers
//! - The three endpoint URL builders (action API, REST summary, Parsoid HTML)
//! - A retrying GET helper shared by the resolver and the content fetcher

use crate::config::Config;
use crate::{Result, WikiError};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Every request carries the configured `Api-User-Agent` header (the
/// identification convention for Wikimedia APIs) alongside a regular
/// `User-Agent` derived from the crate version.
///
/// # Example
///
/// ```no_run
/// use wikifold::config::Config;
/// use wikifold::client::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&config.api_user_agent).map_err(|_| {
        WikiError::Config(crate::ConfigError::Invalid {
            name: "api_user_agent",
            message: "not a valid header value".to_string(),
        })
    })?;
    headers.insert("Api-User-Agent", value);

    let client = Client::builder()
        .user_agent(format!("wikifold/{}", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Origin all requests for `language` are sent to
///
/// `https://<language>.wikipedia.org`, unless the configuration pins a
/// fixed origin (mirror deployments, mock servers).
pub fn wiki_origin(config: &Config, language: &str) -> String {
    match &config.origin_override {
        Some(origin) => origin.trim_end_matches('/').to_string(),
        None => format!("https://{}.wikipedia.org", language),
    }
}

/// Action API endpoint: `/w/api.php`
pub fn action_api_endpoint(config: &Config, language: &str) -> Result<Url> {
    let url = Url::parse(&format!("{}/w/api.php", wiki_origin(config, language)))?;
    Ok(url)
}

/// REST summary endpoint: `/api/rest_v1/page/summary/<topic>`
///
/// The topic becomes a single path segment, so percent-encoding of
/// slashes, spaces and non-ASCII titles is handled by the `url` crate.
pub fn summary_endpoint(config: &Config, language: &str, topic: &str) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/api/rest_v1/page/summary/",
        wiki_origin(config, language)
    ))?;
    url.path_segments_mut()
        .map_err(|_| WikiError::InvalidUrl(url_display(config, language)))?
        .pop_if_empty()
        .push(topic);
    Ok(url)
}

/// Parsoid HTML endpoint: `/w/rest.php/v1/page/<topic>/html`
pub fn article_html_endpoint(config: &Config, language: &str, topic: &str) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/w/rest.php/v1/page/",
        wiki_origin(config, language)
    ))?;
    url.path_segments_mut()
        .map_err(|_| WikiError::InvalidUrl(url_display(config, language)))?
        .pop_if_empty()
        .push(topic)
        .push("html");
    Ok(url)
}

fn url_display(config: &Config, language: &str) -> String {
    wiki_origin(config, language)
}

/// Sends a GET request with bounded retry on transient failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return the response |
/// | HTTP 5xx | Retry up to `max_retries`, then `HttpStatus` error |
/// | HTTP 4xx / 3xx | Immediate `HttpStatus` error |
/// | Timeout | Retry up to `max_retries`, then `Http` error |
/// | Connection refused | Retry up to `max_retries`, then `Http` error |
/// | Other network error | Immediate `Http` error |
///
/// Redirects are followed by reqwest's default policy; a residual 3xx
/// status therefore means the redirect limit was exceeded.
pub async fn get_with_retry(client: &Client, config: &Config, url: &Url) -> Result<Response> {
    let mut attempt: u32 = 0;

    loop {
        match client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }
                if status.is_server_error() && attempt < config.max_retries {
                    attempt += 1;
                    tracing::debug!(
                        "HTTP {} from {}, retry {}/{}",
                        status.as_u16(),
                        url,
                        attempt,
                        config.max_retries
                    );
                    tokio::time::sleep(config.retry_delay()).await;
                    continue;
                }
                return Err(WikiError::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt < config.max_retries {
                    attempt += 1;
                    tracing::debug!(
                        "transient error for {}: {}, retry {}/{}",
                        url,
                        e,
                        attempt,
                        config.max_retries
                    );
                    tokio::time::sleep(config.retry_delay()).await;
                    continue;
                }
                return Err(WikiError::Http {
                    url: url.to_string(),
                    source: e,
                });
            }
        }
    }
}

/// GET a URL and decode the response as JSON
pub async fn get_json(client: &Client, config: &Config, url: &Url) -> Result<serde_json::Value> {
    let response = get_with_retry(client, config, url).await?;
    response.json().await.map_err(|e| WikiError::Http {
        url: url.to_string(),
        source: e,
    })
}

/// GET a URL and return the response body as text
pub async fn get_text(client: &Client, config: &Config, url: &Url) -> Result<String> {
    let response = get_with_retry(client, config, url).await?;
    response.text().await.map_err(|e| WikiError::Http {
        url: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api_user_agent: "test-viewer/1.0 (test@example.com)".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&test_config()).is_ok());
    }

    #[test]
    fn test_build_http_client_rejects_bad_header() {
        let config = Config {
            api_user_agent: "line\nbreak".to_string(),
            ..Config::default()
        };
        assert!(build_http_client(&config).is_err());
    }

    #[test]
    fn test_default_origin() {
        assert_eq!(
            wiki_origin(&test_config(), "fi"),
            "https://fi.wikipedia.org"
        );
    }

    #[test]
    fn test_origin_override_wins() {
        let config = Config {
            origin_override: Some("http://127.0.0.1:9999/".to_string()),
            ..test_config()
        };
        assert_eq!(wiki_origin(&config, "fi"), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_action_api_endpoint() {
        let url = action_api_endpoint(&test_config(), "en").unwrap();
        assert_eq!(url.as_str(), "https://en.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_summary_endpoint_encodes_topic() {
        let url = summary_endpoint(&test_config(), "fi", "Vapaamuurarin hauta").unwrap();
        assert_eq!(
            url.as_str(),
            "https://fi.wikipedia.org/api/rest_v1/page/summary/Vapaamuurarin%20hauta"
        );
    }

    #[test]
    fn test_article_html_endpoint() {
        let url = article_html_endpoint(&test_config(), "en", "Douglas Adams").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/w/rest.php/v1/page/Douglas%20Adams/html"
        );
    }

    #[test]
    fn test_topic_with_slash_stays_one_segment() {
        let url = article_html_endpoint(&test_config(), "en", "AC/DC").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/w/rest.php/v1/page/AC%2FDC/html"
        );
    }
}
