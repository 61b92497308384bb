//! Author resolver with a per-run profile cache
//!
//! Each profile URL is fetched and parsed at most once. The cache belongs
//! to one resolver, and a resolver to one crawl, so nothing leaks between
//! runs.

use crate::config::{FormatConfig, Selectors};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_author;
use crate::models::Author;
use crate::CrawlError;
use std::collections::HashMap;
use url::Url;

/// Insertion-ordered cache of author profiles keyed by profile URL
#[derive(Debug)]
pub struct AuthorResolver {
    selectors: Selectors,
    format: FormatConfig,
    /// Profile URL -> index into `authors`
    index: HashMap<String, usize>,
    /// Authors in first-seen order
    authors: Vec<Author>,
    cache_hits: u64,
}

impl AuthorResolver {
    /// Creates a resolver with an empty cache
    pub fn new(selectors: Selectors, format: FormatConfig) -> Self {
        Self {
            selectors,
            format,
            index: HashMap::new(),
            authors: Vec::new(),
            cache_hits: 0,
        }
    }

    /// Ensures the author at `profile_url` is in the cache
    ///
    /// A cached URL returns immediately without network access. Otherwise
    /// the profile is fetched, parsed, and only then inserted, so a failed
    /// fetch or parse leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// * `CrawlError::Fetch` - The profile page could not be fetched
    /// * `CrawlError::Parse` - A profile field was missing or malformed
    pub async fn resolve(&mut self, fetcher: &Fetcher, profile_url: &Url) -> Result<(), CrawlError> {
        if self.index.contains_key(profile_url.as_str()) {
            self.cache_hits += 1;
            tracing::debug!("Author cache hit: {}", profile_url);
            return Ok(());
        }

        tracing::debug!("Fetching author profile: {}", profile_url);
        let body = fetcher.get(profile_url).await?;
        let author = parse_author(&body, &self.selectors, &self.format).map_err(|source| {
            CrawlError::Parse {
                url: profile_url.to_string(),
                source,
            }
        })?;

        tracing::debug!("Resolved author '{}'", author.full_name.trim());
        self.index.insert(profile_url.to_string(), self.authors.len());
        self.authors.push(author);

        Ok(())
    }

    /// Returns the cached author for `profile_url`, if resolved
    pub fn get(&self, profile_url: &Url) -> Option<&Author> {
        self.index
            .get(profile_url.as_str())
            .map(|&i| &self.authors[i])
    }

    /// All cached authors in first-seen order
    pub fn all_cached_authors(&self) -> &[Author] {
        &self.authors
    }

    /// Consumes the resolver, returning the cached authors in first-seen order
    pub fn into_authors(self) -> Vec<Author> {
        self.authors
    }

    /// Number of distinct authors cached
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    /// Whether no author has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Number of `resolve` calls answered from the cache
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }
}
