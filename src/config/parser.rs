use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Top-level tables understood by [`Config`]
const SECTIONS: &[&str] = &["site", "selectors", "format", "user-agent", "output"];

/// Loads and parses a configuration file from the given path
///
/// Sections or keys missing from the file take their built-in defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so the output files can be traced back to the exact
/// configuration that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration and returns it with the hash of the bytes it was
/// parsed from
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

/// Parses TOML text into a validated [`Config`]
///
/// Unknown top-level tables are logged and ignored.
fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let table: toml::Table = content.parse()?;

    for name in unknown_sections(&table) {
        tracing::warn!("Ignoring unknown config section [{}]", name);
    }

    let defaulted = defaulted_sections(&table);
    if !defaulted.is_empty() {
        tracing::debug!("Using built-in defaults for: {}", defaulted.join(", "));
    }

    let config: Config = toml::Value::Table(table).try_into()?;
    validate(&config)?;

    Ok(config)
}

/// Known sections absent from `table`
fn defaulted_sections(table: &toml::Table) -> Vec<&'static str> {
    SECTIONS
        .iter()
        .copied()
        .filter(|name| !table.contains_key(*name))
        .collect()
}

/// Keys of `table` that are not a known section
fn unknown_sections(table: &toml::Table) -> Vec<&str> {
    table
        .keys()
        .map(String::as_str)
        .filter(|key| !SECTIONS.contains(key))
        .collect()
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
