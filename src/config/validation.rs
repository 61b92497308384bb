use crate::config::selectors::Selectors;
use crate::config::types::{Config, FormatConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write as _;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    Selectors::compile(&config.selectors)?;
    validate_format_config(&config.format)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates date formats and the tag delimiter
fn validate_format_config(config: &FormatConfig) -> Result<(), ConfigError> {
    if config.born_date_input.trim().is_empty() {
        return Err(ConfigError::Validation(
            "born_date_input cannot be empty".to_string(),
        ));
    }

    if config.born_date_output.trim().is_empty() {
        return Err(ConfigError::Validation(
            "born_date_output cannot be empty".to_string(),
        ));
    }

    validate_date_format("born_date_input", &config.born_date_input)?;
    validate_date_format("born_date_output", &config.born_date_output)?;

    // Tags are split back out of the cell on this delimiter
    if config.tag_delimiter.is_empty() {
        return Err(ConfigError::Validation(
            "tag_delimiter cannot be empty".to_string(),
        ));
    }

    if config.location_prefix.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "location_prefix must be a single token, got '{}'",
            config.location_prefix
        )));
    }

    Ok(())
}

/// Rejects strftime strings a calendar date cannot be rendered with
///
/// Besides unknown specifiers this catches time and zone fields such as
/// `%H` or `%z`, which parse fine but fail when applied to a `NaiveDate`.
fn validate_date_format(name: &str, format: &str) -> Result<(), ConfigError> {
    let invalid = || {
        ConfigError::Validation(format!("{} is not a valid date format: '{}'", name, format))
    };

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let sample = NaiveDate::from_ymd_opt(2000, 1, 1).ok_or_else(invalid)?;
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).map_err(|_| invalid())?;

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.quotes_path.is_empty() {
        return Err(ConfigError::Validation(
            "quotes_path cannot be empty".to_string(),
        ));
    }

    if config.authors_path.is_empty() {
        return Err(ConfigError::Validation(
            "authors_path cannot be empty".to_string(),
        ));
    }

    if config.quotes_path == config.authors_path {
        return Err(ConfigError::Validation(format!(
            "quotes_path and authors_path must differ, both are '{}'",
            config.quotes_path
        )));
    }

    Ok(())
}
