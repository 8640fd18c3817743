//! Runtime configuration for the pipeline.
//!
//! All tunables live here rather than as inline literals: the source URL,
//! the listing caps, the fetch timeout, the image heuristics, and the
//! headline denylist. Defaults reproduce the stock behavior; an optional
//! YAML file passed via `--config` overrides any subset of fields.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::instrument;

/// Default section front page to discover articles from.
const DEFAULT_SOURCE_URL: &str = "https://www.bbc.com/innovation/technology";

/// Default pattern a candidate link's path must match to count as an article.
const DEFAULT_LINK_PATTERN: &str = "/articles/";

/// File-extension substrings an image URL must contain to be acceptable.
const GOOD_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Keyword substrings that disqualify an image URL.
const REJECT_KEYWORDS: [&str; 9] = [
    "logo",
    "icon",
    "avatar",
    "profile",
    "svg",
    "gif",
    "badge",
    "sponsor",
    "placeholder",
];

/// Generic section titles filtered out of the listing.
const IGNORED_HEADLINES: [&str; 13] = [
    "Latest News & Updates",
    "US & Canada",
    "UK",
    "England",
    "Northern Ireland",
    "Scotland",
    "Wales",
    "Africa",
    "Asia",
    "Australia",
    "Europe",
    "Latin America",
    "Middle East",
];

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file was not valid YAML for [`AppConfig`].
    #[error("failed to parse configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configured source URL did not parse.
    #[error("invalid source url: {0}")]
    SourceUrl(#[from] url::ParseError),

    /// The configured link pattern was not a valid regular expression.
    #[error("invalid link pattern: {0}")]
    LinkPattern(#[from] regex::Error),
}

/// Top-level application configuration.
///
/// Missing fields in a configuration file fall back to the defaults, so a
/// file only needs to name the fields it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Section front page to discover candidate articles from.
    pub source_url: String,
    /// Regular expression a candidate link's path must match.
    pub link_pattern: String,
    /// Maximum number of discovered candidates the listing pipeline scans.
    pub scan_cap: usize,
    /// Maximum number of display items the listing pipeline returns.
    pub result_cap: usize,
    /// Per-fetch timeout in seconds, applied to every page request.
    pub fetch_timeout_secs: u64,
    /// Optional upper bound on cached articles. `None` means unbounded,
    /// which matches the stock behavior: the cache grows for the lifetime
    /// of the process.
    pub cache_entry_limit: Option<usize>,
    /// Heuristic tables for the image selector.
    pub images: ImageHeuristics,
    /// Exact-match denylist for the headline filter.
    pub ignored_headlines: HeadlineSet,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
            scan_cap: 25,
            result_cap: 12,
            fetch_timeout_secs: 15,
            cache_entry_limit: None,
            images: ImageHeuristics::default(),
            ignored_headlines: HeadlineSet::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults for
    /// any fields the file does not set.
    #[instrument(level = "info")]
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}

/// Configuration tables for the image selector.
///
/// A URL is acceptable iff its lowercase form contains at least one entry
/// of `good_extensions` and none of `reject_keywords`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageHeuristics {
    /// Substrings that mark a URL as pointing at a usable image format.
    pub good_extensions: Vec<String>,
    /// Substrings that mark a URL as decorative or boilerplate.
    pub reject_keywords: Vec<String>,
}

impl Default for ImageHeuristics {
    fn default() -> Self {
        Self {
            good_extensions: GOOD_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            reject_keywords: REJECT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A fixed set of denylisted headlines, loaded once at startup and
/// read-only afterward.
///
/// Matching is exact and case-sensitive; `"UK"` is denylisted while
/// `"UK News"` is not.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct HeadlineSet(HashSet<String>);

impl HeadlineSet {
    /// Whether a headline is on the denylist.
    pub fn is_ignored(&self, headline: &str) -> bool {
        self.0.contains(headline)
    }
}

impl Default for HeadlineSet {
    fn default() -> Self {
        IGNORED_HEADLINES.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for HeadlineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps_match_stock_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.scan_cap, 25);
        assert_eq!(config.result_cap, 12);
        assert_eq!(config.fetch_timeout_secs, 15);
        assert!(config.cache_entry_limit.is_none());
    }

    #[test]
    fn test_default_image_heuristics() {
        let images = ImageHeuristics::default();
        assert!(images.good_extensions.contains(&".webp".to_string()));
        assert_eq!(images.good_extensions.len(), 4);
        assert!(images.reject_keywords.contains(&"sponsor".to_string()));
        assert_eq!(images.reject_keywords.len(), 9);
    }

    #[test]
    fn test_default_denylist_entries() {
        let ignored = HeadlineSet::default();
        assert!(ignored.is_ignored("UK"));
        assert!(ignored.is_ignored("Latest News & Updates"));
        assert!(!ignored.is_ignored("UK News"));
    }

    #[test]
    fn test_partial_yaml_overrides_defaults() {
        let yaml = r#"
source_url: "https://example.com/tech"
result_cap: 5
ignored_headlines:
  - "Sponsored"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.source_url, "https://example.com/tech");
        assert_eq!(config.result_cap, 5);
        // Untouched fields keep their defaults.
        assert_eq!(config.scan_cap, 25);
        assert!(config.ignored_headlines.is_ignored("Sponsored"));
        assert!(!config.ignored_headlines.is_ignored("UK"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let yaml = "surce_url: typo";
        let parsed: Result<AppConfig, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }
}
