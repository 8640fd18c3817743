//! Source discovery: index the section front page for candidate articles.
//!
//! Discovery fetches the configured front page once and extracts every link
//! whose resolved path matches the configured article pattern, preserving
//! document order. The listing pipeline treats a discovery failure as an
//! empty candidate list, so an unreachable source degrades to "no valid
//! headlines" instead of an error propagating out of the pipeline.

use crate::config::{AppConfig, ConfigError};
use crate::models::PageReference;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Why the candidate list could not be produced.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The front page fetch failed at the transport level.
    #[error("failed to fetch the section front page: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("section front page request returned {0}")]
    Status(StatusCode),
}

/// Collaborator boundary for producing the ordered candidate list.
pub trait DiscoverSource {
    /// Discover an ordered sequence of page references to consider for the
    /// listing.
    async fn discover(&self) -> Result<Vec<PageReference>, DiscoveryError>;
}

/// HTTP-backed discovery over a section front page.
#[derive(Debug, Clone)]
pub struct HttpDiscovery {
    client: Client,
    source_url: Url,
    link_pattern: Regex,
}

impl HttpDiscovery {
    /// Build discovery from configuration, validating the source URL and
    /// link pattern up front.
    pub fn new(client: Client, config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client,
            source_url: Url::parse(&config.source_url)?,
            link_pattern: Regex::new(&config.link_pattern)?,
        })
    }
}

impl DiscoverSource for HttpDiscovery {
    #[instrument(level = "info", skip_all, fields(source = %self.source_url))]
    async fn discover(&self) -> Result<Vec<PageReference>, DiscoveryError> {
        let response = self.client.get(self.source_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status));
        }
        let html = response.text().await?;

        let candidates = candidate_links(&html, &self.source_url, &self.link_pattern);
        info!(count = candidates.len(), "Indexed candidate article links");
        debug!(candidates = ?candidates, "Candidate references");
        Ok(candidates)
    }
}

/// Extract article candidates from front page HTML.
///
/// Keeps document order, resolves relative links against the source URL,
/// drops fragments so the same article is one reference, and deduplicates
/// while preserving first occurrence.
pub(crate) fn candidate_links(html: &str, base: &Url, pattern: &Regex) -> Vec<PageReference> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .filter(|resolved| matches!(resolved.scheme(), "http" | "https"))
        .filter(|resolved| pattern.is_match(resolved.path()))
        .map(|mut resolved| {
            resolved.set_fragment(None);
            PageReference::new(resolved.to_string())
        })
        .unique()
        .collect()
}
