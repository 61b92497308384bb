use serde::Deserialize;

/// Main configuration structure for Quote-Crawler
///
/// Every section is optional; a missing section or key falls back to the
/// values for `https://quotes.toscrape.com/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub format: FormatConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// How the crawler finds the next listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationMode {
    /// Rebuild `page/<N>/` from the start URL, N = 2, 3, ...
    #[default]
    Positional,
    /// Resolve the next link's href against the current page
    FollowLink,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root listing page the crawl starts from
    #[serde(rename = "base-url")]
    pub base_url: String,

    pub pagination: PaginationMode,

    /// Maximum number of listing pages fetched in one run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com/".to_string(),
            pagination: PaginationMode::Positional,
            max_pages: 1000,
        }
    }
}

/// CSS selectors for listing and profile pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    pub quote: String,
    pub text: String,
    pub author: String,
    pub tag: String,
    pub author_link: String,
    pub next_page: String,
    pub next_page_link: String,
    pub author_title: String,
    pub born_date: String,
    pub born_location: String,
    pub description: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            quote: ".quote".to_string(),
            text: ".text".to_string(),
            author: ".author".to_string(),
            tag: ".tag".to_string(),
            author_link: "span > a".to_string(),
            next_page: "ul.pager > li.next".to_string(),
            next_page_link: "ul.pager > li.next > a".to_string(),
            author_title: ".author-title".to_string(),
            born_date: ".author-born-date".to_string(),
            born_location: ".author-born-location".to_string(),
            description: ".author-description".to_string(),
        }
    }
}

/// Field formats on the site and in the output files
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatConfig {
    /// chrono format of the born date on profile pages
    pub born_date_input: String,

    /// chrono format of `born_date` in the authors file
    pub born_date_output: String,

    /// Token stripped from the front of the born location
    pub location_prefix: String,

    /// Separator used to join tags into one CSV cell
    pub tag_delimiter: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            born_date_input: "%B %d, %Y".to_string(),
            born_date_output: "%Y-%m-%d".to_string(),
            location_prefix: "in".to_string(),
            tag_delimiter: ";".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "quote-crawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://quotes.toscrape.com/".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the quotes CSV file
    #[serde(rename = "quotes-path")]
    pub quotes_path: String,

    /// Path to the authors CSV file
    #[serde(rename = "authors-path")]
    pub authors_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quotes_path: "quotes.csv".to_string(),
            authors_path: "authors.csv".to_string(),
        }
    }
}
