//! Crawl statistics
//!
//! Counters gathered by the crawler during a run and printed once the
//! output files are written.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Listing pages fetched and parsed
    pub pages_fetched: u64,

    /// HTTP requests issued, listing and profile pages together
    pub requests: u64,

    /// Quotes collected
    pub quotes: u64,

    /// Distinct authors resolved
    pub authors: u64,

    /// Author lookups answered from the cache
    pub author_cache_hits: u64,

    /// Quotes whose byline had no author link
    pub quotes_without_author: u64,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Share of author lookups served from the cache, in percent
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.authors + self.author_cache_hits;
        if lookups == 0 {
            return 0.0;
        }
        (self.author_cache_hits as f64 / lookups as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Listing pages: {}", stats.pages_fetched);
    println!("  HTTP requests: {}", stats.requests);
    println!("  Duration: {:.2}s", stats.elapsed.as_secs_f64());
    println!();

    println!("Records:");
    println!("  Quotes: {}", stats.quotes);
    println!("  Authors: {}", stats.authors);
    if stats.quotes_without_author > 0 {
        println!("  Quotes without author link: {}", stats.quotes_without_author);
    }
    println!();

    println!(
        "Author Cache: {} hits ({:.1}% of lookups)",
        stats.author_cache_hits,
        stats.cache_hit_rate()
    );
}
