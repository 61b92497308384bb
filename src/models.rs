//! Record types produced by a crawl

use chrono::NaiveDate;

/// A single quote block from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The quote's literal text
    pub text: String,

    /// Author name as shown in the byline
    pub author: String,

    /// Tag labels in page order; may be empty
    pub tags: Vec<String>,
}

/// An author profile, created once per profile URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub full_name: String,
    pub born_date: NaiveDate,
    /// Birth place with the leading "in" token removed
    pub born_location: String,
    /// Biography, whitespace-trimmed
    pub description: String,
}
