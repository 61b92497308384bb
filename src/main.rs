//! Quote-Crawler main entry point
//!
//! This is the command-line interface for the quote and author crawler.

use clap::Parser;
use quote_crawler::config::{self, load_config_with_hash, Config, PaginationMode};
use quote_crawler::crawler::run_crawl;
use quote_crawler::output::{print_statistics, write_authors, write_quotes};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quote-Crawler: quotes and author profiles to CSV
///
/// Walks every listing page from the base URL, resolves each quoted
/// author's profile once, and writes a quotes file and an authors file.
#[derive(Parser, Debug)]
#[command(name = "quote-crawler")]
#[command(version)]
#[command(about = "Crawl a paginated quote site into CSV files", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root listing page to start from
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Output path for the quotes CSV
    #[arg(long, value_name = "PATH")]
    quotes: Option<String>,

    /// Output path for the authors CSV
    #[arg(long, value_name = "PATH")]
    authors: Option<String>,

    /// Maximum number of listing pages to fetch
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Follow the next link's href instead of rebuilding page/<N>/ URLs
    #[arg(long)]
    follow_links: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Must run before parsing so `BASE_URL` from `.env` reaches clap
    let dotenv_path = config::load_dotenv();
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    if let Err(e) = config::validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_crawler=info,warn"),
            1 => EnvFilter::new("quote_crawler=debug,info"),
            2 => EnvFilter::new("quote_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.site.base_url = base_url.clone();
    }
    if let Some(quotes) = &cli.quotes {
        config.output.quotes_path = quotes.clone();
    }
    if let Some(authors) = &cli.authors {
        config.output.authors_path = authors.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.site.max_pages = max_pages;
    }
    if cli.follow_links {
        config.site.pagination = PaginationMode::FollowLink;
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Quote-Crawler Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Pagination: {:?}", config.site.pagination);
    println!("  Max pages: {}", config.site.max_pages);

    println!("\nSelectors:");
    println!("  Quote block: {}", config.selectors.quote);
    println!("  Author link: {}", config.selectors.author_link);
    println!("  Next page: {}", config.selectors.next_page);
    println!("  Author title: {}", config.selectors.author_title);

    println!("\nFormats:");
    println!("  Born date in: {}", config.format.born_date_input);
    println!("  Born date out: {}", config.format.born_date_output);
    println!("  Location prefix: {:?}", config.format.location_prefix);
    println!("  Tag delimiter: {:?}", config.format.tag_delimiter);

    println!("\nOutput:");
    println!("  Quotes: {}", config.output.quotes_path);
    println!("  Authors: {}", config.output.authors_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let format = config.format.clone();
    let output = config.output.clone();

    let results = match run_crawl(config).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    write_quotes(Path::new(&output.quotes_path), &results.quotes, &format)?;
    write_authors(Path::new(&output.authors_path), &results.authors, &format)?;

    print_statistics(&results.stats);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "quote-crawler",
            "--base-url",
            "http://127.0.0.1:8000/",
            "--max-pages",
            "3",
            "--follow-links",
        ]);
        let mut config = Config::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.site.base_url, "http://127.0.0.1:8000/");
        assert_eq!(config.site.max_pages, 3);
        assert_eq!(config.site.pagination, PaginationMode::FollowLink);
        assert_eq!(config.output.quotes_path, "quotes.csv");
    }
}
