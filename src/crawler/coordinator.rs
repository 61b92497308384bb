//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the listing-page loop:
//! - Fetching each listing page in order
//! - Parsing its quote blocks
//! - Resolving every linked author before the quote is recorded
//! - Finding the next page until the next-page affordance disappears

use crate::config::{Config, PaginationMode, Selectors};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{parse_listing, ListingPage, ParseError};
use crate::crawler::resolver::AuthorResolver;
use crate::models::{Author, Quote};
use crate::output::CrawlStatistics;
use crate::url::{author_profile_url, listing_page_url, next_page_url, parse_http_url};
use crate::CrawlError;
use std::time::Instant;
use url::Url;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlResults {
    /// Quotes in page order, then document order
    pub quotes: Vec<Quote>,

    /// Distinct authors in first-seen order
    pub authors: Vec<Author>,

    pub stats: CrawlStatistics,
}

/// Quote crawler for one run
///
/// Owns the fetcher and the author resolver, so every crawler starts with
/// an empty author cache.
pub struct QuoteCrawler {
    config: Config,
    selectors: Selectors,
    fetcher: Fetcher,
    resolver: AuthorResolver,
    stats: CrawlStatistics,
}

impl QuoteCrawler {
    /// Creates a new crawler instance
    ///
    /// # Returns
    ///
    /// * `Ok(QuoteCrawler)` - Selectors compiled and HTTP client built
    /// * `Err(CrawlError)` - Invalid selector or client construction failure
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let fetcher = Fetcher::from_config(&config.user_agent)?;
        Self::with_fetcher(config, fetcher)
    }

    /// Creates a crawler over an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Fetcher) -> Result<Self, CrawlError> {
        let selectors = Selectors::compile(&config.selectors)?;
        let resolver = AuthorResolver::new(selectors.clone(), config.format.clone());

        Ok(Self {
            config,
            selectors,
            fetcher,
            resolver,
            stats: CrawlStatistics::default(),
        })
    }

    /// Crawls every listing page starting at `start_url`
    ///
    /// # Algorithm
    ///
    /// 1. Fetch and parse the current listing page
    /// 2. For each quote in document order, resolve its author (if linked)
    ///    and then append the quote
    /// 3. Stop when the page has no next-page affordance
    /// 4. Otherwise compute the next page URL and repeat
    ///
    /// In positional mode page N (N >= 2) is `<start_url>/page/N/`; in
    /// follow-link mode the next link's href is resolved against the
    /// current page.
    ///
    /// # Errors
    ///
    /// Any fetch or parse failure aborts the crawl. Needing more than
    /// `site.max_pages` listing pages returns `CrawlError::CrawlLimitExceeded`.
    pub async fn crawl(&mut self, start_url: &Url) -> Result<Vec<Quote>, CrawlError> {
        let started = Instant::now();
        let limit = self.config.site.max_pages;
        let mut quotes = Vec::new();
        let mut page_url = start_url.clone();
        let mut page_num: u32 = 1;

        tracing::info!("Starting crawl at {}", start_url);

        loop {
            if page_num > limit {
                tracing::error!("Listing page {} exceeds the limit of {}", page_num, limit);
                return Err(CrawlError::CrawlLimitExceeded { limit });
            }

            let listing = self.fetch_listing(&page_url).await?;
            self.stats.pages_fetched += 1;

            let found = listing.quotes.len();
            for entry in listing.quotes {
                match entry.author_href {
                    Some(href) => {
                        let profile_url = author_profile_url(&page_url, &href)?;
                        self.resolver.resolve(&self.fetcher, &profile_url).await?;
                    }
                    None => {
                        tracing::debug!("Quote by '{}' has no author link", entry.quote.author);
                        self.stats.quotes_without_author += 1;
                    }
                }
                quotes.push(entry.quote);
            }

            tracing::info!(
                "Page {}: {} quotes ({} total, {} authors)",
                page_num,
                found,
                quotes.len(),
                self.resolver.len()
            );

            if !listing.has_next {
                tracing::info!("No next page after page {}, crawl complete", page_num);
                break;
            }

            page_num += 1;
            page_url = match self.config.site.pagination {
                PaginationMode::Positional => listing_page_url(start_url, page_num)?,
                PaginationMode::FollowLink => {
                    let href = listing.next_href.ok_or_else(|| CrawlError::Parse {
                        url: page_url.to_string(),
                        source: ParseError::MissingElement {
                            field: "next-page-link",
                        },
                    })?;
                    next_page_url(&page_url, &href)?
                }
            };
        }

        self.stats.quotes = quotes.len() as u64;
        self.stats.authors = self.resolver.len() as u64;
        self.stats.author_cache_hits = self.resolver.cache_hits();
        self.stats.requests = self.fetcher.requests();
        self.stats.elapsed = started.elapsed();

        tracing::info!(
            "Crawl completed: {} quotes, {} authors, {} pages in {:?}",
            self.stats.quotes,
            self.stats.authors,
            self.stats.pages_fetched,
            self.stats.elapsed
        );

        Ok(quotes)
    }

    /// Crawls from `start_url` and hands back quotes, authors and statistics
    pub async fn run(mut self, start_url: &Url) -> Result<CrawlResults, CrawlError> {
        let quotes = self.crawl(start_url).await?;
        Ok(CrawlResults {
            quotes,
            authors: self.resolver.into_authors(),
            stats: self.stats,
        })
    }

    /// The author resolver and its cache
    pub fn resolver(&self) -> &AuthorResolver {
        &self.resolver
    }

    /// Statistics gathered so far
    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Fetches and parses one listing page
    async fn fetch_listing(&self, url: &Url) -> Result<ListingPage, CrawlError> {
        tracing::debug!("Fetching listing page: {}", url);
        let body = self.fetcher.get(url).await?;
        parse_listing(&body, &self.selectors).map_err(|source| CrawlError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

/// Runs a complete crawl from the configured base URL
///
/// A fresh crawler, and with it a fresh author cache, is built per call.
///
/// # Example
///
/// ```no_run
/// use quote_crawler::config::Config;
/// use quote_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let results = run_crawl(Config::default()).await?;
/// println!("{} quotes by {} authors", results.quotes.len(), results.authors.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlResults, CrawlError> {
    let start_url = parse_http_url(&config.site.base_url)?;
    QuoteCrawler::new(config)?.run(&start_url).await
}
