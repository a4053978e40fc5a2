//! Readable-text extraction from static web pages.
//!
//! Pages are fetched once, parsed, stripped of non-content subtrees and then
//! reduced to text either through a caller-supplied CSS selector or through
//! the first of `main`, `article` or `body`.

use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::{Error, Result};

pub const MAX_CONTENT_CHARS: usize = 50_000;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Subtrees removed before any text is read
static PRUNED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script, style, nav, footer, header").expect("valid selector"));

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("valid selector"));

/// Content roots tried in order when no selector is given
static CONTENT_ROOTS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    ["main", "article", "body"].map(|tag| Selector::parse(tag).expect("valid selector"))
});

/// HTTP settings for page fetches
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout: u64,
    pub user_agent: String,
    /// Content is cut to this many characters
    pub max_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_chars: MAX_CONTENT_CHARS,
        }
    }
}

/// Text pulled out of a page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Scraper {
    client: reqwest::Client,
    config: FetchConfig,
}

impl Scraper {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Unknown(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// GET `url` and return the body, failing on any non-success status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = url::Url::parse(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        debug!("Fetching page: {parsed}");

        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::from_reqwest(e, self.config.timeout))?;

        resp.text().await.map_err(|e| Error::from_reqwest(e, self.config.timeout))
    }

    pub async fn scrape(&self, url: &str, selector: Option<&str>) -> Result<Page> {
        let html = self.fetch(url).await?;
        extract_page(&html, selector, self.config.max_chars)
    }

    /// Scrape `url` and fold any failure into the response body
    pub async fn scrape_url(&self, url: &str, selector: Option<&str>) -> ScrapeResult {
        let outcome = self.scrape(url, selector).await;
        match &outcome {
            Ok(page) => info!("Scraped {url}: {} chars", page.content.chars().count()),
            Err(e) => warn!("Scrape of {url} failed ({:?}): {e}", e.kind()),
        }
        ScrapeResult::new(url, outcome)
    }
}

/// Extract title and text from an HTML document.
///
/// Blank `selector` values are treated as absent.
pub fn extract_page(html: &str, selector: Option<&str>, max_chars: usize) -> Result<Page> {
    let selector = selector
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Selector::parse(s).map_err(|e| Error::Parse(format!("invalid selector '{s}': {e}"))))
        .transpose()?;

    let mut document = Html::parse_document(html);
    prune(&mut document);
    // Html::select still sees detached nodes; walk from the root instead
    let root = document.root_element();

    let title = root
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let content = match &selector {
        Some(sel) => root.select(sel).map(compact_text).collect::<Vec<_>>().join("\n"),
        None => CONTENT_ROOTS
            .iter()
            .find_map(|sel| root.select(sel).next())
            .map(block_text)
            .unwrap_or_default(),
    };

    Ok(Page {
        title,
        content: truncate_chars(content, max_chars),
    })
}

/// Detach every non-content subtree from the document
fn prune(document: &mut Html) {
    let ids: Vec<_> = document.select(&PRUNED).map(|el| el.id()).collect();
    debug!("Pruning {} non-content elements", ids.len());
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Stripped text nodes run together
fn compact_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Stripped text nodes, one per line
fn block_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(s: String, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}

/// Response body for a scrape request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeResult {
    pub url: String,
    pub title: Option<String>,
    pub content: String,
    pub success: bool,
    pub error: Option<String>,
}

impl ScrapeResult {
    pub fn new(url: &str, outcome: Result<Page>) -> Self {
        match outcome {
            Ok(page) => Self {
                url: url.to_string(),
                title: page.title,
                content: page.content,
                success: true,
                error: None,
            },
            Err(e) => Self {
                url: url.to_string(),
                title: None,
                content: String::new(),
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}
