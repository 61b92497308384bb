use crate::UrlError;
use url::Url;

/// Parses an absolute URL and rejects anything but HTTP and HTTPS
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    ensure_http(url)
}

/// Resolves a byline href into the author's profile URL
///
/// The href is resolved against the page it appeared on and the path is
/// given a trailing slash, so `/author/Jane-Austen` and `/author/Jane-Austen/`
/// key the same cache entry.
///
/// # Examples
///
/// ```
/// use quote_crawler::url::author_profile_url;
/// use url::Url;
///
/// let page = Url::parse("https://quotes.toscrape.com/page/2/").unwrap();
/// let url = author_profile_url(&page, "/author/Jane-Austen").unwrap();
/// assert_eq!(url.as_str(), "https://quotes.toscrape.com/author/Jane-Austen/");
/// ```
pub fn author_profile_url(page_url: &Url, href: &str) -> Result<Url, UrlError> {
    let joined = page_url
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    let mut url = ensure_http(joined)?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_fragment(None);

    Ok(url)
}

/// Resolves a next-page href against the page it appeared on
pub fn next_page_url(current: &Url, href: &str) -> Result<Url, UrlError> {
    let url = current
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    ensure_http(url)
}

/// Builds the URL of listing page `page` under `base`
///
/// `base` is treated as a directory: `https://host/tag/love` and
/// `https://host/tag/love/` both give `https://host/tag/love/page/<n>/`.
/// Query and fragment of `base` are dropped.
pub fn listing_page_url(base: &Url, page: u32) -> Result<Url, UrlError> {
    let mut dir = base.clone();
    dir.set_query(None);
    dir.set_fragment(None);

    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }

    let url = dir
        .join(&format!("page/{}/", page))
        .map_err(|e| UrlError::Parse(e.to_string()))?;

    ensure_http(url)
}

fn ensure_http(url: Url) -> Result<Url, UrlError> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            other
        ))),
    }
}
