//! Crawler module for listing and profile pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing of listing and profile pages
//! - Author resolution with a per-run cache
//! - Pagination-driven crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod resolver;

pub use coordinator::{run_crawl, CrawlResults, QuoteCrawler};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use parser::{
    parse_author, parse_born_date, parse_listing, strip_location_prefix, ListingPage,
    ListingQuote, ParseError,
};
pub use resolver::AuthorResolver;
