//! Data models for the article acquisition pipeline.
//!
//! This module defines the core data structures passed between the pipeline
//! stages:
//! - [`PageReference`]: the canonical address of a source page, used as the
//!   cache key
//! - [`ExtractedContent`]: structured content produced by the content
//!   extractor, immutable once created
//! - [`DisplayItem`]: the listing pipeline's output unit, rebuilt on every
//!   listing request and never persisted

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical address of a source page.
///
/// A `PageReference` is an opaque identifier: the pipeline never inspects it
/// beyond equality and hashing, which makes it usable as the article cache
/// key. A freshly discovered reference carries no content yet; content only
/// exists once the extractor has run for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageReference(String);

impl PageReference {
    /// Wrap a canonical page URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The underlying URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageReference {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

/// Structured content extracted from a single page.
///
/// Produced by the content extractor and stored in the article cache.
/// The headline and body may be empty strings when the page yielded no
/// usable text; the listing and detail pipelines decide what to do with
/// such content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedContent {
    /// The article headline.
    pub headline: String,
    /// The article body text.
    pub body: String,
    /// The best image URL found on the page, if any passed the heuristics.
    pub image_url: Option<String>,
    /// The page this content was extracted from.
    pub reference: PageReference,
}

/// One entry of the front page listing.
///
/// The `link` field is derived from the page reference so a host surface can
/// route a detail request back to the same reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    /// The article headline.
    pub headline: String,
    /// Detail-view link derived from the page reference.
    pub link: String,
    /// Image URL chosen by the image selector, if any.
    pub image_url: Option<String>,
}

impl DisplayItem {
    /// Build a listing entry from extracted content.
    pub fn from_content(content: &ExtractedContent) -> Self {
        Self {
            headline: content.headline.clone(),
            link: article_link(&content.reference),
            image_url: content.image_url.clone(),
        }
    }
}

/// Derive a detail-view link from a page reference.
///
/// The reference URL is carried as a percent-encoded query parameter so it
/// survives the round trip through a request surface unchanged.
pub fn article_link(reference: &PageReference) -> String {
    format!("/article?url={}", urlencoding::encode(reference.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_reference_display_and_accessors() {
        let reference = PageReference::new("https://example.com/news/articles/abc");
        assert_eq!(reference.as_str(), "https://example.com/news/articles/abc");
        assert_eq!(
            reference.to_string(),
            "https://example.com/news/articles/abc"
        );
    }

    #[test]
    fn test_article_link_percent_encodes_reference() {
        let reference = PageReference::new("https://example.com/a?b=1&c=2");
        let link = article_link(&reference);
        assert_eq!(
            link,
            "/article?url=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1%26c%3D2"
        );
    }

    #[test]
    fn test_display_item_from_content() {
        let content = ExtractedContent {
            headline: "AI Breakthrough".to_string(),
            body: "Body text".to_string(),
            image_url: Some("https://example.com/hero.jpg".to_string()),
            reference: PageReference::new("https://example.com/news/articles/ai"),
        };

        let item = DisplayItem::from_content(&content);
        assert_eq!(item.headline, "AI Breakthrough");
        assert_eq!(
            item.link,
            "/article?url=https%3A%2F%2Fexample.com%2Fnews%2Farticles%2Fai"
        );
        assert_eq!(
            item.image_url.as_deref(),
            Some("https://example.com/hero.jpg")
        );
    }

    #[test]
    fn test_display_item_serializes_for_json_output() {
        let item = DisplayItem {
            headline: "Test".to_string(),
            link: "/article?url=x".to_string(),
            image_url: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"headline\":\"Test\""));
        assert!(json.contains("\"image_url\":null"));
    }
}
