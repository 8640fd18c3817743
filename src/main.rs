//! # News Digest
//!
//! A news acquisition and summarization pipeline that indexes a section
//! front page, extracts headline/body/image content per article, filters
//! low-value entries, caches results, and on demand produces an
//! AI-generated summary of a selected article.
//!
//! ## Usage
//!
//! ```sh
//! news_digest headlines
//! news_digest article https://www.bbc.com/news/articles/some-id
//! ```
//!
//! ## Architecture
//!
//! 1. **Discovery**: index candidate article links from the section front page
//! 2. **Extraction**: fetch and parse each candidate into structured content
//! 3. **Filtering**: image heuristics and the headline denylist
//! 4. **Caching**: extracted content is cached by reference so the detail
//!    view never re-does listing work
//! 5. **Summarization**: article body text through an OpenAI-compatible LLM

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cache;
mod cli;
mod config;
mod discovery;
mod extract;
mod filter;
mod models;
mod pipeline;
mod summarize;
mod utils;

use chrono::Local;
use cli::{Cli, Command};
use config::AppConfig;
use discovery::HttpDiscovery;
use extract::HttpExtractor;
use models::PageReference;
use pipeline::{detail, listing, NewsContext};
use summarize::{ChatCompletionsClient, RetryComplete, Summarizer};
use utils::{time_of_day, truncate_for_log, upcase};

const USER_AGENT: &str = concat!("news_digest/", env!("CARGO_PKG_VERSION"));

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    let args = Cli::parse();

    let config = match args.config.as_deref() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    debug!(?config, "Resolved configuration");

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()?;

    let ctx = NewsContext::new(config);

    match &args.command {
        Command::Headlines { json } => run_headlines(&ctx, client, *json).await?,
        Command::Article { url } => run_article(&ctx, client, &args, url).await?,
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// Run the listing pipeline and print the front page.
async fn run_headlines(
    ctx: &NewsContext,
    client: Client,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let discovery = HttpDiscovery::new(client.clone(), &ctx.config)?;
    let extractor = HttpExtractor::new(client, ctx.config.images.clone());

    match listing::front_page(ctx, &discovery, &extractor).await {
        Ok(items) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                println!(
                    "{} edition, {}",
                    upcase(&time_of_day()),
                    Local::now().date_naive()
                );
                println!();
                for item in &items {
                    println!("* {}", item.headline);
                    println!("  {}", item.link);
                    if let Some(image) = &item.image_url {
                        println!("  image: {image}");
                    }
                }
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Front page listing failed");
            println!(
                "Could not fetch any valid headlines. The source website might be \
                 blocking requests or has changed its structure."
            );
            Err(Box::new(e))
        }
    }
}

/// Run the detail pipeline for one article and print its summary.
async fn run_article(
    ctx: &NewsContext,
    client: Client,
    args: &Cli,
    url: &str,
) -> Result<(), Box<dyn Error>> {
    let extractor = HttpExtractor::new(client.clone(), ctx.config.images.clone());
    let reference = PageReference::new(url);

    let view = match detail::article_view(ctx, &extractor, &reference).await {
        Ok(view) => view,
        Err(e) => {
            error!(error = %e, %reference, "Detail view failed");
            println!("Could not retrieve the article content to summarize.");
            return Err(Box::new(e));
        }
    };

    debug!(body = %truncate_for_log(&view.body, 200), "Summarizing article");
    let backend = RetryComplete::new(
        ChatCompletionsClient::new(
            client,
            args.api_base.as_str(),
            args.model.as_str(),
            args.api_key.clone(),
        ),
        5,
        Duration::from_secs(1),
    );
    let summarizer = Summarizer::new(backend);
    let summary = summarizer.summarize(&view.body).await;

    println!("{}", view.title);
    println!();
    println!("{summary}");
    if let Some(image) = &view.image_url {
        println!();
        println!("image: {image}");
    }
    Ok(())
}
