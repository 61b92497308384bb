//! Configuration module for Quote-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and compiling the configured CSS selectors.
//!
//! # Example
//!
//! ```no_run
//! use quote_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawl starts at: {}", config.site.base_url);
//! ```

mod env;
mod parser;
mod selectors;
mod types;
mod validation;

// Re-export types
pub use selectors::Selectors;
pub use types::{
    Config, FormatConfig, OutputConfig, PaginationMode, SelectorConfig, SiteConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use env::{load_dotenv, load_env_file};
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
