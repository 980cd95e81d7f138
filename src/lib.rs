//! Wikifold: Wikipedia content resolution for embedding
//!
//! This crate resolves an encyclopedia topic in a given language to a
//! Wikidata item id and to a cleaned pair of HTML fragments (a lead
//! excerpt and the remaining sections), rewritten so they can be
//! embedded inside a third-party viewer.

pub mod adapter;
pub mod client;
pub mod config;
pub mod fetcher;
pub mod resolver;

use thiserror::Error;

/// Main error type for wikifold operations
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request failed for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for wikifold operations
pub type Result<T> = std::result::Result<T, WikiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use adapter::{adapt_article, AdaptedArticle};
pub use client::build_http_client;
pub use config::Config;
pub use fetcher::{get_article_content, ArticleContent};
pub use resolver::find_wikidata_item;
