//! Content extraction: fetch a page and parse it into structured content.
//!
//! Extraction is a single attempt with a fixed per-fetch timeout (set on the
//! shared HTTP client). Failures are returned as typed errors so callers
//! make the skip decision explicitly; nothing panics past this boundary.
//!
//! Parsing is a pure function over the fetched HTML:
//! - headline from `og:title`, falling back to the first `<h1>`, then `<title>`
//! - body from `<article>` paragraphs, falling back to `<main>` paragraphs,
//!   then any paragraph in the document
//! - the primary image candidate from `og:image`, secondary candidates from
//!   `<img src>` in document order, all resolved to absolute URLs

use crate::config::ImageHeuristics;
use crate::filter;
use crate::models::{ExtractedContent, PageReference};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

static OG_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static OG_IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

/// Body selectors tried in priority order; the first that yields any
/// paragraph text wins.
static BODY_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article p", "main p", "p"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

/// Why an extraction attempt produced no content.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page reference was not a valid URL.
    #[error("invalid page reference: {0}")]
    BadReference(#[from] url::ParseError),

    /// The fetch failed at the transport level (connect, timeout, decode).
    #[error("failed to fetch the page: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("page request returned {0}")]
    Status(StatusCode),
}

/// Collaborator boundary for turning a page reference into content.
///
/// The listing and detail pipelines are generic over this trait so tests
/// can substitute scripted extractors.
pub trait ExtractContent {
    /// Attempt a fetch and parse for one page. A failure means "no
    /// content"; the caller decides whether to skip or surface it.
    async fn extract(
        &self,
        reference: &PageReference,
    ) -> Result<ExtractedContent, ExtractError>;
}

/// HTTP-backed extractor using the shared client and image heuristics.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: Client,
    images: ImageHeuristics,
}

impl HttpExtractor {
    pub fn new(client: Client, images: ImageHeuristics) -> Self {
        Self { client, images }
    }
}

impl ExtractContent for HttpExtractor {
    #[instrument(level = "info", skip_all, fields(reference = %reference))]
    async fn extract(
        &self,
        reference: &PageReference,
    ) -> Result<ExtractedContent, ExtractError> {
        let page_url = Url::parse(reference.as_str())?;

        let response = self.client.get(page_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status));
        }
        let html = response.text().await?;

        let page = parse_page(&html, &page_url);
        let image_url = filter::choose_image(page.top_image.as_deref(), &page.images, &self.images);
        debug!(
            headline = %truncate_for_log(&page.headline, 120),
            body_bytes = page.body.len(),
            image_candidates = page.images.len(),
            has_image = image_url.is_some(),
            "Parsed article page"
        );

        Ok(ExtractedContent {
            headline: page.headline,
            body: page.body,
            image_url,
            reference: reference.clone(),
        })
    }
}

/// Intermediate parse result before image selection.
#[derive(Debug)]
pub(crate) struct ParsedPage {
    pub headline: String,
    pub body: String,
    pub top_image: Option<String>,
    pub images: Vec<String>,
}

/// Parse fetched HTML into headline, body, and image candidates.
///
/// Pure: no I/O, deterministic for a given document. Missing pieces come
/// back as empty strings or empty collections, never as errors.
pub(crate) fn parse_page(html: &str, base: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        headline: extract_headline(&document),
        body: extract_body(&document),
        top_image: document
            .select(&OG_IMAGE_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("content"))
            .and_then(|content| resolve(base, content)),
        images: document
            .select(&IMG_SELECTOR)
            .filter_map(|el| el.value().attr("src"))
            .filter_map(|src| resolve(base, src))
            .collect(),
    }
}

fn extract_headline(document: &Html) -> String {
    if let Some(el) = document.select(&OG_TITLE_SELECTOR).next() {
        if let Some(content) = el.value().attr("content") {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    for selector in [&*H1_SELECTOR, &*TITLE_SELECTOR] {
        if let Some(el) = document.select(selector).next() {
            let text = el.text().collect::<Vec<_>>().join(" ");
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    String::new()
}

fn extract_body(document: &Html) -> String {
    for selector in BODY_SELECTORS.iter() {
        let paragraphs: Vec<String> = document
            .select(selector)
            .map(|el| {
                el.text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim()
                    .to_string()
            })
            .filter(|text| !text.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }
    }
    String::new()
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(|url| url.to_string())
}
