//! Listing pipeline: discovery, extraction, filtering, cache population.
//!
//! Produces the front page as an ordered sequence of display items, capped
//! at the configured result count, scanning at most the configured number
//! of discovered candidates. Result order is discovery order minus the
//! filtered-out items; there is no re-sorting.
//!
//! Failure semantics: discovery failure degrades to an empty candidate
//! list, a per-candidate extraction failure skips only that candidate, and
//! an empty final listing is reported as [`ListingError::NoValidHeadlines`].
//! Partial results always win over none when a failure is local to a single
//! candidate.

use crate::discovery::DiscoverSource;
use crate::extract::ExtractContent;
use crate::filter;
use crate::models::DisplayItem;
use crate::pipeline::NewsContext;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// The listing produced nothing to display.
#[derive(Debug, Error)]
pub enum ListingError {
    /// No candidate survived discovery, extraction, and filtering.
    #[error("could not fetch any valid headlines from the source")]
    NoValidHeadlines,
}

/// Assemble the front page listing.
///
/// For each discovered candidate, in order:
/// 1. reuse cached content when the reference is already cached, otherwise
///    run the extractor; an extraction failure skips the candidate without
///    consuming either cap
/// 2. skip content lacking a non-empty headline or body
/// 3. skip denylisted headlines; these consume a scan slot but produce no
///    result
/// 4. otherwise append a display item and insert the cache entry
///
/// Iteration stops as soon as the result cap is reached or the scan cap is
/// exhausted.
#[instrument(level = "info", skip_all)]
pub async fn front_page<D, E>(
    ctx: &NewsContext,
    discovery: &D,
    extractor: &E,
) -> Result<Vec<DisplayItem>, ListingError>
where
    D: DiscoverSource,
    E: ExtractContent,
{
    let candidates = match discovery.discover().await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(error = %e, "Source discovery failed; treating candidate list as empty");
            Vec::new()
        }
    };
    info!(count = candidates.len(), "Discovered candidate references");

    let mut items = Vec::new();
    let mut scanned = 0usize;
    for reference in candidates {
        if scanned >= ctx.config.scan_cap || items.len() >= ctx.config.result_cap {
            break;
        }

        let content = match ctx.cache.get(&reference) {
            Some(cached) => {
                debug!(%reference, "Using cached content");
                cached
            }
            None => match extractor.extract(&reference).await {
                Ok(content) => content,
                Err(e) => {
                    debug!(%reference, error = %e, "Extraction failed; skipping candidate");
                    continue;
                }
            },
        };
        scanned += 1;

        if content.headline.trim().is_empty() || content.body.trim().is_empty() {
            debug!(%reference, "Candidate lacks headline or body; skipping");
            continue;
        }
        if !filter::keep_headline(&content.headline, &ctx.config.ignored_headlines) {
            info!(headline = %content.headline, "Filtering out generic headline");
            continue;
        }

        items.push(DisplayItem::from_content(&content));
        ctx.cache.put(content);
    }

    info!(
        headlines = items.len(),
        scanned,
        cached = ctx.cache.len(),
        "Front page listing assembled"
    );

    if items.is_empty() {
        return Err(ListingError::NoValidHeadlines);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::PageReference;
    use crate::pipeline::fakes::{content, FailingDiscovery, FixedDiscovery, ScriptedExtractor};

    fn reference(i: usize) -> String {
        format!("https://example.com/news/articles/{i}")
    }

    fn context() -> NewsContext {
        NewsContext::new(AppConfig::default())
    }

    #[tokio::test]
    async fn test_scenario_denylisted_empty_and_valid_candidates() {
        let ctx = context();
        let discovery = FixedDiscovery {
            references: vec![
                PageReference::new("https://example.com/news/articles/a"),
                PageReference::new("https://example.com/news/articles/b"),
                PageReference::new("https://example.com/news/articles/c"),
            ],
        };
        let extractor = ScriptedExtractor::new([
            content("https://example.com/news/articles/a", "UK", "Some text", None),
            content("https://example.com/news/articles/b", "Real headline", "", None),
            content(
                "https://example.com/news/articles/c",
                "AI Breakthrough",
                "Body text",
                Some("https://example.com/hero.jpg"),
            ),
        ]);

        let items = front_page(&ctx, &discovery, &extractor).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].headline, "AI Breakthrough");
        assert_eq!(items[0].image_url.as_deref(), Some("https://example.com/hero.jpg"));

        // Only the surviving article is cached.
        assert!(ctx
            .cache
            .contains(&PageReference::new("https://example.com/news/articles/c")));
        assert_eq!(ctx.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_result_cap_and_scan_cap_are_honored() {
        let ctx = context();
        let references: Vec<PageReference> =
            (0..30).map(|i| PageReference::new(reference(i))).collect();
        let discovery = FixedDiscovery {
            references: references.clone(),
        };
        let extractor = ScriptedExtractor::new(
            (0..30).map(|i| content(&reference(i), &format!("Headline {i}"), "Body", None)),
        );

        let items = front_page(&ctx, &discovery, &extractor).await.unwrap();
        assert_eq!(items.len(), 12);
        // Results keep discovery order.
        assert_eq!(items[0].headline, "Headline 0");
        assert_eq!(items[11].headline, "Headline 11");
        // At most the scan cap's worth of candidates was examined.
        assert!(extractor.call_count() <= 25);
    }

    #[tokio::test]
    async fn test_all_denylisted_headlines_reports_no_valid_headlines() {
        let ctx = context();
        let discovery = FixedDiscovery {
            references: vec![
                PageReference::new("https://example.com/news/articles/uk"),
                PageReference::new("https://example.com/news/articles/europe"),
            ],
        };
        let extractor = ScriptedExtractor::new([
            content("https://example.com/news/articles/uk", "UK", "Text", None),
            content("https://example.com/news/articles/europe", "Europe", "Text", None),
        ]);

        let result = front_page(&ctx, &discovery, &extractor).await;
        assert!(matches!(result, Err(ListingError::NoValidHeadlines)));
        assert!(ctx.cache.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_failure_yields_no_valid_headlines() {
        let ctx = context();
        let extractor = ScriptedExtractor::new([]);

        let result = front_page(&ctx, &FailingDiscovery, &extractor).await;
        assert!(matches!(result, Err(ListingError::NoValidHeadlines)));
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_second_run_serves_cached_references_without_extraction() {
        let ctx = context();
        let references = vec![
            PageReference::new("https://example.com/news/articles/a"),
            PageReference::new("https://example.com/news/articles/b"),
        ];
        let discovery = FixedDiscovery {
            references: references.clone(),
        };
        let extractor = ScriptedExtractor::new([
            content("https://example.com/news/articles/a", "First", "Body", None),
            content("https://example.com/news/articles/b", "Second", "Body", None),
        ]);

        let first = front_page(&ctx, &discovery, &extractor).await.unwrap();
        assert_eq!(extractor.call_count(), 2);

        let second = front_page(&ctx, &discovery, &extractor).await.unwrap();
        // The cache-hit path is pure: same ordered output, no new fetches.
        assert_eq!(first, second);
        assert_eq!(extractor.call_count(), 2);
    }

    #[tokio::test]
    async fn test_extraction_failure_does_not_consume_scan_cap() {
        let ctx = NewsContext::new(AppConfig {
            scan_cap: 2,
            ..AppConfig::default()
        });

        let discovery = FixedDiscovery {
            references: vec![
                PageReference::new("https://example.com/news/articles/dead"),
                PageReference::new("https://example.com/news/articles/a"),
                PageReference::new("https://example.com/news/articles/b"),
            ],
        };
        // The dead link is not scripted, so extraction fails for it.
        let extractor = ScriptedExtractor::new([
            content("https://example.com/news/articles/a", "First", "Body", None),
            content("https://example.com/news/articles/b", "Second", "Body", None),
        ]);

        let items = front_page(&ctx, &discovery, &extractor).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].headline, "First");
        assert_eq!(items[1].headline, "Second");
    }

    #[tokio::test]
    async fn test_existing_cache_entry_is_not_overwritten() {
        let ctx = context();
        ctx.cache.put(content(
            "https://example.com/news/articles/a",
            "Cached headline",
            "Cached body",
            None,
        ));

        let discovery = FixedDiscovery {
            references: vec![PageReference::new("https://example.com/news/articles/a")],
        };
        let extractor = ScriptedExtractor::new([content(
            "https://example.com/news/articles/a",
            "Fresh headline",
            "Fresh body",
            None,
        )]);

        let items = front_page(&ctx, &discovery, &extractor).await.unwrap();
        assert_eq!(items[0].headline, "Cached headline");
        assert_eq!(extractor.call_count(), 0);

        let stored = ctx
            .cache
            .get(&PageReference::new("https://example.com/news/articles/a"))
            .unwrap();
        assert_eq!(stored.headline, "Cached headline");
    }
}
