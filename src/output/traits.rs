//! Output traits and error types
//!
//! Defines how records map to flat CSV rows and back.

use crate::config::FormatConfig;
use crate::crawler::parse_born_date;
use crate::models::{Author, Quote};
use std::fmt::Write as _;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected header in {path}: expected {expected:?}, found {found:?}")]
    Header {
        path: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Row {row} in {path}: {message}")]
    Row {
        path: String,
        row: usize,
        message: String,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A record that can be written as one CSV row and read back
pub trait Tabular: Sized {
    /// Column names, in row order
    const HEADER: &'static [&'static str];

    /// Flattens the record into cells matching `HEADER`
    ///
    /// Fails when a value cannot be rendered with `format`.
    fn to_row(&self, format: &FormatConfig) -> Result<Vec<String>, String>;

    /// Rebuilds a record from cells matching `HEADER`
    ///
    /// The caller guarantees `row.len() == HEADER.len()`.
    fn from_row(row: Vec<String>, format: &FormatConfig) -> Result<Self, String>;
}

impl Tabular for Quote {
    const HEADER: &'static [&'static str] = &["text", "author", "tags"];

    /// Tags are joined with `format.tag_delimiter` into a single cell
    fn to_row(&self, format: &FormatConfig) -> Result<Vec<String>, String> {
        Ok(vec![
            self.text.clone(),
            self.author.clone(),
            self.tags.join(format.tag_delimiter.as_str()),
        ])
    }

    fn from_row(row: Vec<String>, format: &FormatConfig) -> Result<Self, String> {
        let mut cells = row.into_iter();
        let text = cells.next().unwrap_or_default();
        let author = cells.next().unwrap_or_default();
        let tags_cell = cells.next().unwrap_or_default();

        // An empty cell is an empty tag list, not one empty tag
        let tags = if tags_cell.is_empty() {
            Vec::new()
        } else {
            tags_cell
                .split(format.tag_delimiter.as_str())
                .map(str::to_string)
                .collect()
        };

        Ok(Quote { text, author, tags })
    }
}

impl Tabular for Author {
    const HEADER: &'static [&'static str] =
        &["full_name", "born_date", "born_location", "description"];

    /// `born_date` is rendered with `format.born_date_output`
    fn to_row(&self, format: &FormatConfig) -> Result<Vec<String>, String> {
        let mut born_date = String::new();
        write!(born_date, "{}", self.born_date.format(&format.born_date_output)).map_err(|_| {
            format!("cannot render born_date with '{}'", format.born_date_output)
        })?;

        Ok(vec![
            self.full_name.clone(),
            born_date,
            self.born_location.clone(),
            self.description.clone(),
        ])
    }

    fn from_row(row: Vec<String>, format: &FormatConfig) -> Result<Self, String> {
        let mut cells = row.into_iter();
        let full_name = cells.next().unwrap_or_default();
        let date = cells.next().unwrap_or_default();
        let born_location = cells.next().unwrap_or_default();
        let description = cells.next().unwrap_or_default();

        let born_date =
            parse_born_date(&date, &format.born_date_output).map_err(|e| e.to_string())?;

        Ok(Author {
            full_name,
            born_date,
            born_location,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_quote_row_joins_tags() {
        let quote = Quote {
            text: "t".to_string(),
            author: "a".to_string(),
            tags: vec!["love".to_string(), "life".to_string()],
        };
        assert_eq!(
            quote.to_row(&FormatConfig::default()).unwrap(),
            vec!["t", "a", "love;life"]
        );
    }

    #[test]
    fn test_quote_from_row_empty_tags() {
        let row = vec!["t".to_string(), "a".to_string(), String::new()];
        let quote = Quote::from_row(row, &FormatConfig::default()).unwrap();
        assert!(quote.tags.is_empty());
    }

    fn austen() -> Author {
        Author {
            full_name: "Jane Austen".to_string(),
            born_date: NaiveDate::from_ymd_opt(1775, 12, 16).unwrap(),
            born_location: "Steventon Rectory, Hampshire, The United Kingdom".to_string(),
            description: "Novelist.".to_string(),
        }
    }

    #[test]
    fn test_author_row_formats_date() {
        let author = austen();
        let row = author.to_row(&FormatConfig::default()).unwrap();
        assert_eq!(row[1], "1775-12-16");

        let format = FormatConfig {
            born_date_output: "%d/%m/%Y".to_string(),
            ..FormatConfig::default()
        };
        assert_eq!(author.to_row(&format).unwrap()[1], "16/12/1775");
    }

    #[test]
    fn test_author_row_with_time_format_is_error() {
        let format = FormatConfig {
            born_date_output: "%Y-%m-%d %H:%M".to_string(),
            ..FormatConfig::default()
        };
        let err = austen().to_row(&format).unwrap_err();
        assert!(err.contains("%H:%M"));
    }

    #[test]
    fn test_author_from_row_bad_date() {
        let row = vec![
            "X".to_string(),
            "yesterday".to_string(),
            "Y".to_string(),
            "Z".to_string(),
        ];
        assert!(Author::from_row(row, &FormatConfig::default()).is_err());
    }
}
