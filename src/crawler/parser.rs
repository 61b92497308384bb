//! HTML parser for listing and profile pages
//!
//! Pure functions from page markup to records. They never touch the
//! network: author resolution is driven by the coordinator, which consumes
//! the author hrefs collected here.

use crate::config::{FormatConfig, Selectors};
use crate::models::{Author, Quote};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Errors that can occur while parsing a page
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Expected element '{field}' not found")]
    MissingElement { field: &'static str },

    #[error("Date '{value}' does not match format '{format}'")]
    InvalidDate { value: String, format: String },
}

/// A quote block together with its byline link, if any
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuote {
    pub quote: Quote,

    /// Raw `href` of the byline anchor, unresolved
    pub author_href: Option<String>,
}

/// Everything the crawler needs from one listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    /// Quote blocks in document order
    pub quotes: Vec<ListingQuote>,

    /// Whether the next-page affordance is present
    pub has_next: bool,

    /// Raw `href` of the next-page link, if the affordance carries one
    pub next_href: Option<String>,
}

/// Parses a listing page into its quote blocks and pagination state
///
/// A page without any quote block is valid and yields an empty list.
///
/// # Errors
///
/// `ParseError::MissingElement` if a quote block lacks its text or
/// author element.
pub fn parse_listing(html: &str, selectors: &Selectors) -> Result<ListingPage, ParseError> {
    let document = Html::parse_document(html);

    let quotes = document
        .select(&selectors.quote)
        .map(|block| parse_quote_block(block, selectors))
        .collect::<Result<Vec<_>, _>>()?;

    let next = document.select(&selectors.next_page).next();
    let next_href = next.and_then(|_| {
        document
            .select(&selectors.next_page_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
    });

    tracing::trace!(
        "Parsed listing page: {} quotes, has_next={}",
        quotes.len(),
        next.is_some()
    );

    Ok(ListingPage {
        quotes,
        has_next: next.is_some(),
        next_href,
    })
}

/// Parses a single quote block
fn parse_quote_block(block: ElementRef, selectors: &Selectors) -> Result<ListingQuote, ParseError> {
    let text = select_text(block, &selectors.text, "text")?;
    let author = select_text(block, &selectors.author, "author")?;
    let tags = block
        .select(&selectors.tag)
        .map(|tag| tag.text().collect::<String>())
        .collect();

    Ok(ListingQuote {
        quote: Quote { text, author, tags },
        author_href: find_author_href(block, selectors),
    })
}

/// Takes the link target of the block's first byline anchor
fn find_author_href(block: ElementRef, selectors: &Selectors) -> Option<String> {
    block
        .select(&selectors.author_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Parses an author profile page
///
/// # Field rules
///
/// - `full_name`: text of the title element, verbatim
/// - `born_date`: trimmed, then parsed with `format.born_date_input`
/// - `born_location`: leading `format.location_prefix` token removed
/// - `description`: whitespace-trimmed
pub fn parse_author(
    html: &str,
    selectors: &Selectors,
    format: &FormatConfig,
) -> Result<Author, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let full_name = select_text(root, &selectors.author_title, "author-title")?;
    let raw_date = select_text(root, &selectors.born_date, "born-date")?;
    let raw_location = select_text(root, &selectors.born_location, "born-location")?;
    let description = select_text(root, &selectors.description, "description")?;

    Ok(Author {
        full_name,
        born_date: parse_born_date(&raw_date, &format.born_date_input)?,
        born_location: strip_location_prefix(&raw_location, &format.location_prefix),
        description: description.trim().to_string(),
    })
}

/// Parses a born date such as `April 3, 1939`
///
/// # Example
///
/// ```
/// use quote_crawler::crawler::parse_born_date;
///
/// let date = parse_born_date(" April 3, 1939 ", "%B %d, %Y").unwrap();
/// assert_eq!(date.to_string(), "1939-04-03");
/// ```
pub fn parse_born_date(value: &str, format: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, format).map_err(|_| ParseError::InvalidDate {
        value: trimmed.to_string(),
        format: format.to_string(),
    })
}

/// Removes the leading prefix token from a born location
///
/// The location is split on whitespace and rejoined with single spaces.
/// The first token is dropped only when it equals `prefix`; an empty
/// prefix leaves every token in place.
///
/// ```
/// use quote_crawler::crawler::strip_location_prefix;
///
/// assert_eq!(strip_location_prefix("in  Ulm, Germany", "in"), "Ulm, Germany");
/// assert_eq!(strip_location_prefix("Ulm, Germany", "in"), "Ulm, Germany");
/// ```
pub fn strip_location_prefix(location: &str, prefix: &str) -> String {
    let mut tokens = location.split_whitespace().peekable();
    if !prefix.is_empty() && tokens.peek() == Some(&prefix) {
        tokens.next();
    }
    tokens.collect::<Vec<_>>().join(" ")
}

/// Concatenated text of the first element matching `selector` under `scope`
fn select_text(
    scope: ElementRef,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ParseError> {
    scope
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .ok_or(ParseError::MissingElement { field })
}
