//! Article summarization through an OpenAI-compatible chat-completions API.
//!
//! The summarizer is a total collaborator: it always returns a string.
//! Empty input, a missing credential, an unreachable backend, and an empty
//! model response each map to a fixed descriptive message instead of an
//! error propagating to the caller.
//!
//! # Architecture
//!
//! - [`CompleteAsync`]: core trait for sending a prompt to a backend
//! - [`ChatCompletionsClient`]: drives the chat-completions endpoint
//! - [`RetryComplete`]: decorator adding exponential backoff with jitter
//! - [`Summarizer`]: the total wrapper mapping outcomes to messages
//!
//! # Retry Strategy
//!
//! - Maximum 5 retry attempts
//! - Exponential backoff starting at 1 second, capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd
//! - A missing credential is never retried

use rand::{rng, Rng};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration as StdDuration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Response for empty or blank input text.
pub const NO_TEXT_RESPONSE: &str = "No text provided to summarize.";

/// Response when no API key is configured.
pub const MISSING_KEY_RESPONSE: &str =
    "Error: no API key is configured. Set the OPENAI_API_KEY environment variable.";

/// Response when the backend answered but produced no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Summarization failed. The API returned an empty \
     response. This could be due to content safety filters.";

/// Response when the backend could not be reached or kept failing.
pub const API_ERROR_RESPONSE: &str = "Could not summarize the text due to an API error. \
     Please check your API key and network connection.";

const PROMPT_PREAMBLE: &str = "You are an expert news summarizer. Provide a concise, \
     easy-to-read summary of the following article. Focus on the key points and main \
     takeaways. The summary should be about 3-4 sentences long.";

/// Why a completion request failed.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// No API key was configured for the backend.
    #[error("no API key is configured")]
    MissingCredential,

    /// The request failed at the transport level.
    #[error("summarization request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("summarization request returned {0}")]
    Status(StatusCode),

    /// The response body was not the expected JSON shape.
    #[error("summarization response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trait for sending a prompt to a completion backend.
///
/// Implementors can be decorated, e.g. with [`RetryComplete`] for backoff.
pub trait CompleteAsync {
    /// Send a prompt and return the model's text response.
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(
        client: Client,
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            model: model.into(),
            api_key,
        }
    }
}

impl CompleteAsync for ChatCompletionsClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(SummarizeError::MissingCredential)?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });
        let endpoint = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let t0 = Instant::now();
        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u128, "Completion request rejected");
            return Err(SummarizeError::Status(status));
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)?;
        info!(elapsed_ms = t0.elapsed().as_millis() as u128, "Completion request succeeded");
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

/// Decorator that adds exponential backoff retry logic to any
/// [`CompleteAsync`] implementation.
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
#[derive(Debug)]
pub struct RetryComplete<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryComplete<T>
where
    T: CompleteAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> CompleteAsync for RetryComplete<T>
where
    T: CompleteAsync,
{
    #[instrument(level = "info", skip_all)]
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.complete(prompt).await {
                Ok(response) => return Ok(response),
                Err(SummarizeError::MissingCredential) => {
                    return Err(SummarizeError::MissingCredential);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "complete() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "complete() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Total summarization wrapper around a completion backend.
///
/// [`summarize`](Self::summarize) never fails: every outcome, including
/// backend errors, becomes a displayable string.
#[derive(Debug)]
pub struct Summarizer<B> {
    backend: B,
}

impl<B> Summarizer<B>
where
    B: CompleteAsync,
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Summarize article body text into a short prose summary.
    #[instrument(level = "info", skip_all, fields(body_bytes = body.len()))]
    pub async fn summarize(&self, body: &str) -> String {
        if body.trim().is_empty() {
            return NO_TEXT_RESPONSE.to_string();
        }

        match self.backend.complete(&build_prompt(body)).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => {
                warn!("Backend returned an empty summary");
                EMPTY_RESPONSE_MESSAGE.to_string()
            }
            Err(SummarizeError::MissingCredential) => {
                warn!("No API key configured for the summarization backend");
                MISSING_KEY_RESPONSE.to_string()
            }
            Err(e) => {
                error!(error = %e, "Summarization failed");
                API_ERROR_RESPONSE.to_string()
            }
        }
    }
}

fn build_prompt(body: &str) -> String {
    format!("{PROMPT_PREAMBLE}\n\n---\n\nARTICLE: {body}")
}
