//! URL handling module for Quote-Crawler
//!
//! Builds the two kinds of URL the crawl needs: author profile URLs (the
//! author cache key) and positional listing page URLs.

mod resolve;

pub use resolve::{author_profile_url, listing_page_url, next_page_url, parse_http_url};
