//! Command-line interface definitions.
//!
//! Options can be provided via flags or environment variables. The two
//! subcommands mirror the two request surfaces: a front page listing and a
//! single-article detail view with summary.

use clap::{Parser, Subcommand};

/// Command-line arguments for news_digest.
///
/// # Examples
///
/// ```sh
/// # Print the filtered front page
/// news_digest headlines
///
/// # Summarize one article (requires OPENAI_API_KEY)
/// news_digest article https://www.bbc.com/news/articles/some-id
///
/// # Against a self-hosted OpenAI-compatible server
/// news_digest --api-base http://localhost:8080/v1 article <url>
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_API_BASE", default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// API key for the summarization backend
    #[arg(long, env = "OPENAI_API_KEY")]
    pub api_key: Option<String>,

    /// Model used for summaries
    #[arg(long, env = "SUMMARY_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch, filter, and print the front page headlines
    Headlines {
        /// Print the listing as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fetch one article and print an AI-generated summary
    Article {
        /// Canonical URL of the article page
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines_subcommand() {
        let cli = Cli::parse_from(["news_digest", "headlines"]);
        assert!(matches!(cli.command, Command::Headlines { json: false }));
        assert_eq!(cli.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_headlines_json_flag() {
        let cli = Cli::parse_from(["news_digest", "headlines", "--json"]);
        assert!(matches!(cli.command, Command::Headlines { json: true }));
    }

    #[test]
    fn test_article_subcommand_takes_url() {
        let cli = Cli::parse_from([
            "news_digest",
            "article",
            "https://example.com/news/articles/abc",
        ]);
        match cli.command {
            Command::Article { url } => {
                assert_eq!(url, "https://example.com/news/articles/abc");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_article_requires_url() {
        let parsed = Cli::try_parse_from(["news_digest", "article"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["news_digest", "-c", "news.yaml", "headlines"]);
        assert_eq!(cli.config.as_deref(), Some("news.yaml"));
    }
}
