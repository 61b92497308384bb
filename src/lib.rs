//! Quote-Crawler: quotes and author profiles from a paginated listing site
//!
//! This crate walks a paginated quote listing, parses every quote block,
//! resolves each quote's author profile at most once per profile URL and
//! writes both record sets as CSV files.

pub mod config;
pub mod crawler;
pub mod models;
pub mod output;
pub mod url;

use thiserror::Error;

pub use crawler::{FetchError, ParseError};
pub use output::OutputError;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Parse error for {url}: {source}")]
    Parse { url: String, source: ParseError },

    #[error("Crawl exceeded the limit of {limit} listing pages")]
    CrawlLimitExceeded { limit: u32 },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector for {field}: {message}")]
    InvalidSelector { field: &'static str, message: String },

    #[error("Failed to load environment file: {0}")]
    Env(#[from] dotenvy::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, AuthorResolver, CrawlResults, QuoteCrawler};
pub use models::{Author, Quote};
