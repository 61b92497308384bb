use crate::config::types::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Compiled form of [`SelectorConfig`]
///
/// Built once per crawl so page parsing never re-parses selector strings.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub quote: Selector,
    pub text: Selector,
    pub author: Selector,
    pub tag: Selector,
    pub author_link: Selector,
    pub next_page: Selector,
    pub next_page_link: Selector,
    pub author_title: Selector,
    pub born_date: Selector,
    pub born_location: Selector,
    pub description: Selector,
}

impl Selectors {
    /// Compiles every configured selector
    ///
    /// # Returns
    ///
    /// * `Ok(Selectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed, by field name
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            quote: compile_one("quote", &config.quote)?,
            text: compile_one("text", &config.text)?,
            author: compile_one("author", &config.author)?,
            tag: compile_one("tag", &config.tag)?,
            author_link: compile_one("author-link", &config.author_link)?,
            next_page: compile_one("next-page", &config.next_page)?,
            next_page_link: compile_one("next-page-link", &config.next_page_link)?,
            author_title: compile_one("author-title", &config.author_title)?,
            born_date: compile_one("born-date", &config.born_date)?,
            born_location: compile_one("born-location", &config.born_location)?,
            description: compile_one("description", &config.description)?,
        })
    }
}

fn compile_one(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector {
            field,
            message: "selector cannot be empty".to_string(),
        });
    }

    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        field,
        message: e.to_string(),
    })
}
