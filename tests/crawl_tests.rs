//! Integration tests for the crawler
//!
//! These tests use wiremock to serve synthetic listing and profile pages
//! and assert how often each page is fetched.

use chrono::NaiveDate;
use quote_crawler::config::{
    Config, FormatConfig, PaginationMode, SelectorConfig, Selectors, SiteConfig,
};
use quote_crawler::crawler::{AuthorResolver, Fetcher, QuoteCrawler};
use quote_crawler::{CrawlError, FetchError, ParseError};
use url::Url;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One quote block on a synthetic listing page
struct Block<'a> {
    text: &'a str,
    author: &'a str,
    href: Option<&'a str>,
    tags: &'a [&'a str],
}

fn block<'a>(text: &'a str, author: &'a str, href: Option<&'a str>, tags: &'a [&'a str]) -> Block<'a> {
    Block { text, author, href, tags }
}

/// Renders a listing page; `next` is the next link's href, if any
fn listing_html(blocks: &[Block], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><div class=\"col-md-8\">");
    for b in blocks {
        html.push_str("<div class=\"quote\">");
        html.push_str(&format!("<span class=\"text\">{}</span>", b.text));
        html.push_str(&format!("<span>by <small class=\"author\">{}</small>", b.author));
        if let Some(href) = b.href {
            html.push_str(&format!(" <a href=\"{}\">(about)</a>", href));
        }
        html.push_str("</span><div class=\"tags\">");
        for tag in b.tags {
            html.push_str(&format!("<a class=\"tag\" href=\"/tag/{0}/\">{0}</a>", tag));
        }
        html.push_str("</div></div>");
    }
    html.push_str("<nav><ul class=\"pager\">");
    if let Some(href) = next {
        html.push_str(&format!("<li class=\"next\"><a href=\"{}\">Next</a></li>", href));
    }
    html.push_str("</ul></nav></div></body></html>");
    html
}

fn profile_html(name: &str, born: &str, location: &str, description: &str) -> String {
    format!(
        r#"<html><body><div class="author-details">
        <h3 class="author-title">{}</h3>
        <p><strong>Born:</strong> <span class="author-born-date">{}</span>
        <span class="author-born-location">{}</span></p>
        <div class="author-description">
            {}
        </div></div></body></html>"#,
        name, born, location, description
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

fn test_config(server: &MockServer) -> Config {
    Config {
        site: SiteConfig {
            base_url: format!("{}/", server.uri()),
            ..SiteConfig::default()
        },
        ..Config::default()
    }
}

fn start_url(config: &Config) -> Url {
    Url::parse(&config.site.base_url).unwrap()
}

#[tokio::test]
async fn test_pagination_fetches_every_page_in_order() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(
            &[
                block("q1", "A", None, &["x"]),
                block("q2", "B", None, &[]),
            ],
            Some("/page/2/"),
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        listing_html(&[block("q3", "C", None, &[])], Some("/page/3/")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/3/",
        listing_html(&[block("q4", "A", None, &["y", "z"])], None),
        1,
    )
    .await;

    let config = test_config(&server);
    let url = start_url(&config);
    let mut crawler = QuoteCrawler::new(config).unwrap();
    let quotes = crawler.crawl(&url).await.expect("crawl failed");

    let texts: Vec<&str> = quotes.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["q1", "q2", "q3", "q4"]);
    assert_eq!(quotes[3].tags, vec!["y", "z"]);
    assert_eq!(crawler.statistics().pages_fetched, 3);
    assert_eq!(crawler.statistics().quotes_without_author, 4);
}

#[tokio::test]
async fn test_authors_fetched_once_per_profile_url() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(
            &[
                block("q1", "Albert Einstein", Some("/author/Albert-Einstein"), &[]),
                block("q2", "Jane Austen", Some("/author/Jane-Austen"), &[]),
                block("q3", "Albert Einstein", Some("/author/Albert-Einstein"), &[]),
            ],
            Some("/page/2/"),
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        listing_html(
            &[
                block("q4", "Jane Austen", Some("/author/Jane-Austen/"), &[]),
                block("q5", "Albert Einstein", Some("/author/Albert-Einstein"), &[]),
            ],
            None,
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/author/Albert-Einstein/",
        profile_html("Albert Einstein", "March 14, 1879", "in Ulm, Germany", "Physicist."),
        1,
    )
    .await;
    mount_page(
        &server,
        "/author/Jane-Austen/",
        profile_html(
            "Jane Austen",
            "December 16, 1775",
            "in Steventon Rectory, Hampshire, The United Kingdom",
            "Novelist.",
        ),
        1,
    )
    .await;

    let config = test_config(&server);
    let url = start_url(&config);
    let results = QuoteCrawler::new(config)
        .unwrap()
        .run(&url)
        .await
        .expect("crawl failed");

    assert_eq!(results.quotes.len(), 5);
    assert_eq!(results.authors.len(), 2);
    // First-seen order
    assert_eq!(results.authors[0].full_name, "Albert Einstein");
    assert_eq!(results.authors[1].full_name, "Jane Austen");
    assert_eq!(results.authors[0].born_location, "Ulm, Germany");
    assert_eq!(
        results.authors[1].born_date,
        NaiveDate::from_ymd_opt(1775, 12, 16).unwrap()
    );
    assert_eq!(results.stats.author_cache_hits, 3);
    assert_eq!(results.stats.requests, 4);
}

#[tokio::test]
async fn test_resolve_twice_fetches_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/author/Alan-Ayckbourn/",
        profile_html(
            "Alan Ayckbourn",
            "April 3, 1939",
            "in Barnsley, England",
            "Playwright.",
        ),
        1,
    )
    .await;

    let fetcher = Fetcher::from_config(&Default::default()).unwrap();
    let mut resolver = AuthorResolver::new(
        Selectors::compile(&SelectorConfig::default()).unwrap(),
        FormatConfig::default(),
    );
    let url = Url::parse(&format!("{}/author/Alan-Ayckbourn/", server.uri())).unwrap();

    resolver.resolve(&fetcher, &url).await.unwrap();
    let first = resolver.get(&url).cloned().unwrap();
    resolver.resolve(&fetcher, &url).await.unwrap();

    assert_eq!(resolver.len(), 1);
    assert_eq!(resolver.cache_hits(), 1);
    assert_eq!(fetcher.requests(), 1);
    assert_eq!(resolver.get(&url), Some(&first));
    assert_eq!(first.born_date, NaiveDate::from_ymd_opt(1939, 4, 3).unwrap());
    assert_eq!(first.born_location, "Barnsley, England");
    assert_eq!(resolver.all_cached_authors(), &[first]);
}

#[tokio::test]
async fn test_quote_without_author_link_skips_resolution() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(&[block("lonely", "Anonymous", None, &["misc"])], None),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/author/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let url = start_url(&config);
    let results = QuoteCrawler::new(config).unwrap().run(&url).await.unwrap();

    assert_eq!(results.quotes.len(), 1);
    assert_eq!(results.quotes[0].author, "Anonymous");
    assert_eq!(results.quotes[0].tags, vec!["misc"]);
    assert!(results.authors.is_empty());
}

#[tokio::test]
async fn test_page_limit_exceeded() {
    let server = MockServer::start().await;

    mount_page(&server, "/", listing_html(&[], Some("/page/2/")), 1).await;
    mount_page(&server, "/page/2/", listing_html(&[], Some("/page/3/")), 1).await;
    mount_page(&server, "/page/3/", listing_html(&[], None), 0).await;

    let mut config = test_config(&server);
    config.site.max_pages = 2;
    let url = start_url(&config);

    let result = QuoteCrawler::new(config).unwrap().run(&url).await;
    assert!(matches!(
        result,
        Err(CrawlError::CrawlLimitExceeded { limit: 2 })
    ));
}

#[tokio::test]
async fn test_page_count_equal_to_limit_succeeds() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(&[block("q1", "A", None, &[])], Some("/page/2/")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        listing_html(&[block("q2", "B", None, &[])], None),
        1,
    )
    .await;

    let mut config = test_config(&server);
    config.site.max_pages = 2;
    let url = start_url(&config);

    let results = QuoteCrawler::new(config).unwrap().run(&url).await.unwrap();
    let texts: Vec<&str> = results.quotes.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["q1", "q2"]);
    assert_eq!(results.stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_failed_page_aborts_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(&[block("q1", "A", None, &[])], Some("/page/2/")),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let url = start_url(&config);
    let result = QuoteCrawler::new(config).unwrap().run(&url).await;

    match result {
        Err(CrawlError::Fetch(FetchError::Status { status, url })) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/page/2/"));
        }
        other => panic!("expected status error, got {:?}", other.map(|r| r.quotes)),
    }
}

#[tokio::test]
async fn test_bad_profile_date_aborts_without_caching() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(&[block("q1", "Who", Some("/author/Who"), &[])], None),
        1,
    )
    .await;
    mount_page(
        &server,
        "/author/Who/",
        profile_html("Who", "the year 1900", "in Nowhere", "?"),
        1,
    )
    .await;

    let config = test_config(&server);
    let url = start_url(&config);
    let mut crawler = QuoteCrawler::new(config).unwrap();
    let result = crawler.crawl(&url).await;

    match result {
        Err(CrawlError::Parse {
            url,
            source: ParseError::InvalidDate { value, .. },
        }) => {
            assert!(url.ends_with("/author/Who/"));
            assert_eq!(value, "the year 1900");
        }
        other => panic!("expected invalid date, got {:?}", other),
    }
    assert!(crawler.resolver().is_empty());
}

#[tokio::test]
async fn test_follow_link_pagination() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(&[block("first", "A", None, &[])], Some("/listing/second")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/listing/second",
        listing_html(&[block("second", "B", None, &[])], None),
        1,
    )
    .await;

    let mut config = test_config(&server);
    config.site.pagination = PaginationMode::FollowLink;
    let url = start_url(&config);

    let results = QuoteCrawler::new(config).unwrap().run(&url).await.unwrap();
    let texts: Vec<&str> = results.quotes.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_positional_pagination_under_subpath() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/tag/love/",
        listing_html(&[block("l1", "A", None, &["love"])], Some("/tag/love/page/2/")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/tag/love/page/2/",
        listing_html(&[block("l2", "B", None, &["love"])], None),
        1,
    )
    .await;

    let mut config = test_config(&server);
    config.site.base_url = format!("{}/tag/love/", server.uri());
    let url = start_url(&config);

    let results = QuoteCrawler::new(config).unwrap().run(&url).await.unwrap();
    assert_eq!(results.quotes.len(), 2);
    assert_eq!(results.stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_fresh_crawlers_do_not_share_cache() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing_html(&[block("q", "A", Some("/author/A"), &[])], None),
        2,
    )
    .await;
    mount_page(
        &server,
        "/author/A/",
        profile_html("A", "January 1, 1900", "in Paris, France", "Writer."),
        2,
    )
    .await;

    for _ in 0..2 {
        let config = test_config(&server);
        let url = start_url(&config);
        let results = QuoteCrawler::new(config).unwrap().run(&url).await.unwrap();
        assert_eq!(results.authors.len(), 1);
        assert_eq!(results.stats.author_cache_hits, 0);
    }
}
