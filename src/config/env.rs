use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Loads a `.env` file from the working directory or one of its parents
///
/// Only fills in variables that are not already set, so the real
/// environment always wins. Returns the path of the file that was read,
/// or `None` when there is no `.env` to load.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Loads `KEY=value` pairs from an explicit env file
///
/// Existing variables are left untouched.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path)?;
    Ok(())
}
