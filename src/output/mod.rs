//! Output module for writing crawl results
//!
//! This module handles:
//! - Writing quotes and authors as CSV files
//! - Reading those files back
//! - Recording crawl statistics

pub mod csv;
pub mod stats;
mod traits;

pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, Tabular};

use crate::config::FormatConfig;
use crate::models::{Author, Quote};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `records` to `path` as CSV, header row first
///
/// Missing parent directories are created and an existing file is
/// overwritten.
///
/// # Errors
///
/// * `OutputError::Row` - A record cannot be rendered with `format`
/// * `OutputError::Io` - The file could not be created or written
pub fn write_records<T: Tabular>(
    path: &Path,
    records: &[T],
    format: &FormatConfig,
) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Rendered up front so a bad record never leaves a truncated file
    let display = path.display().to_string();
    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            record.to_row(format).map_err(|message| OutputError::Row {
                path: display.clone(),
                row: i + 2,
                message,
            })
        })
        .collect::<OutputResult<Vec<_>>>()?;

    let mut writer = BufWriter::new(File::create(path)?);
    csv::write_rows(&mut writer, T::HEADER, &rows)?;
    writer.flush()?;

    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Reads records of type `T` from a CSV file written by [`write_records`]
///
/// # Errors
///
/// * `OutputError::Header` - The first row is not `T::HEADER`
/// * `OutputError::Row` - A row has the wrong number of cells or a bad value
pub fn read_records<T: Tabular>(path: &Path, format: &FormatConfig) -> OutputResult<Vec<T>> {
    let text = fs::read_to_string(path)?;
    let mut rows = csv::parse_rows(&text).into_iter();
    let display = path.display().to_string();

    let header = rows.next().unwrap_or_default();
    if header != T::HEADER {
        return Err(OutputError::Header {
            path: display,
            expected: T::HEADER.iter().map(|h| h.to_string()).collect(),
            found: header,
        });
    }

    rows.enumerate()
        .map(|(i, row)| {
            // Row numbers are 1-based and count the header
            let row_num = i + 2;
            if row.len() != T::HEADER.len() {
                return Err(OutputError::Row {
                    path: display.clone(),
                    row: row_num,
                    message: format!("expected {} cells, found {}", T::HEADER.len(), row.len()),
                });
            }
            T::from_row(row, format).map_err(|message| OutputError::Row {
                path: display.clone(),
                row: row_num,
                message,
            })
        })
        .collect()
}

/// Writes the quotes file (`text, author, tags`)
pub fn write_quotes(path: &Path, quotes: &[Quote], format: &FormatConfig) -> OutputResult<()> {
    write_records(path, quotes, format)
}

/// Writes the authors file (`full_name, born_date, born_location, description`)
pub fn write_authors(path: &Path, authors: &[Author], format: &FormatConfig) -> OutputResult<()> {
    write_records(path, authors, format)
}

/// Reads a quotes file back, splitting tags on the configured delimiter
pub fn read_quotes(path: &Path, format: &FormatConfig) -> OutputResult<Vec<Quote>> {
    read_records(path, format)
}

/// Reads an authors file back
pub fn read_authors(path: &Path, format: &FormatConfig) -> OutputResult<Vec<Author>> {
    read_records(path, format)
}
