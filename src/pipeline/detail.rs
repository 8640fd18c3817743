//! Detail pipeline: resolve one page reference to full article content.
//!
//! A cache hit short-circuits extraction entirely; a miss triggers one
//! fresh extraction. The listing pipeline stays the canonical cache writer,
//! so fresh detail-view extractions are consumed directly and never written
//! back. Partial content (a headline but no body) is treated as total
//! failure.

use crate::extract::ExtractContent;
use crate::models::{ExtractedContent, PageReference};
use crate::pipeline::NewsContext;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// The article content could not be retrieved.
///
/// A transient fetch failure and a page that parses to an empty body both
/// surface as this one error.
#[derive(Debug, Error)]
pub enum DetailError {
    #[error("could not retrieve the article content")]
    ContentUnavailable,
}

/// Full content of a single article, ready for summarization or display.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

impl From<ExtractedContent> for ArticleView {
    fn from(content: ExtractedContent) -> Self {
        Self {
            title: content.headline,
            body: content.body,
            image_url: content.image_url,
        }
    }
}

/// Resolve a page reference to its article content, cache-first.
#[instrument(level = "info", skip_all, fields(reference = %reference))]
pub async fn article_view<E>(
    ctx: &NewsContext,
    extractor: &E,
    reference: &PageReference,
) -> Result<ArticleView, DetailError>
where
    E: ExtractContent,
{
    if let Some(cached) = ctx.cache.get(reference) {
        info!("Serving article from cache");
        return Ok(cached.into());
    }

    info!("Article not in cache; extracting fresh");
    let content = match extractor.extract(reference).await {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Fresh extraction failed");
            return Err(DetailError::ContentUnavailable);
        }
    };

    if content.body.trim().is_empty() {
        warn!("Fresh extraction produced no body text");
        return Err(DetailError::ContentUnavailable);
    }

    Ok(content.into())
}
