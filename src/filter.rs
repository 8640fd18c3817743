//! Quality heuristics: image selection and headline filtering.
//!
//! Both are pure functions over configuration tables so tests can
//! substitute their own rules. Neither performs I/O.

use crate::config::{HeadlineSet, ImageHeuristics};

/// Whether a single URL passes the image heuristics.
///
/// A URL is acceptable iff it is non-empty, its lowercase form contains at
/// least one of the allowed extension substrings, and it contains none of
/// the rejection keywords.
pub fn acceptable_image(url: &str, rules: &ImageHeuristics) -> bool {
    if url.is_empty() {
        return false;
    }
    let lower = url.to_lowercase();
    if !rules.good_extensions.iter().any(|ext| lower.contains(ext)) {
        return false;
    }
    !rules.reject_keywords.iter().any(|kw| lower.contains(kw))
}

/// Choose the best image among the candidates extracted from a page.
///
/// The primary candidate (typically the page's `og:image`) wins outright
/// when acceptable; secondaries are never consulted in that case. Otherwise
/// the first acceptable secondary in document order wins. There is no
/// scoring: first match, order preserving, deterministic.
pub fn choose_image(
    primary: Option<&str>,
    candidates: &[String],
    rules: &ImageHeuristics,
) -> Option<String> {
    if let Some(url) = primary {
        if acceptable_image(url, rules) {
            return Some(url.to_string());
        }
    }
    candidates
        .iter()
        .find(|url| acceptable_image(url, rules))
        .cloned()
}

/// Whether a headline should be kept in the listing.
///
/// Rejects only exact, case-sensitive matches against the denylist.
pub fn keep_headline(headline: &str, ignored: &HeadlineSet) -> bool {
    !ignored.is_ignored(headline)
}
