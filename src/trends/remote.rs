use futures::StreamExt;
use reqwest::redirect::Policy;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::model::{Category, Source, Trend};
use crate::util::{strip_control_chars, truncate_chars};

/// Top posts of the week from r/OutOfTheLoop.
pub const DEFAULT_SOURCE_URL: &str = "https://www.reddit.com/r/OutOfTheLoop/top.json?t=week&limit=40";

const MAX_RESPONSE_SIZE: usize = 1024 * 1024; // 1MB
const SUMMARY_MAX_CHARS: usize = 220;
const USER_AGENT: &str = concat!("boomer/", env!("CARGO_PKG_VERSION"), " (terminal)");

/// Errors that can occur while fetching the remote listing.
///
/// None of these reach the user directly: any failure leaves the current
/// snapshot in place.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out")]
    Timeout,
    /// Body was not a listing
    #[error("Parse error: {0}")]
    Parse(String),
    /// Server returned 429 Too Many Requests after max retries
    #[error("Rate limited after {0} retries")]
    RateLimited(u32),
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Create a custom redirect policy with loop detection and limited hops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Build the shared HTTP client used for every remote fetch.
///
/// Reddit rejects requests without a descriptive User-Agent, so one is always set.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .build()
}

// ============================================================================
// Remote Source
// ============================================================================

/// Where refreshed trends come from, plus the retry policy for getting them.
#[derive(Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    url: String,
    max_retries: u32,
    timeout: Duration,
}

impl RemoteSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>, max_retries: u32, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            max_retries,
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and map the listing.
    ///
    /// 429 and 5xx responses, as well as truncated bodies, are retried with
    /// exponential backoff (1s, 2s, 4s, ...) up to `max_retries` times. Other
    /// non-2xx statuses fail immediately.
    pub async fn fetch(&self) -> Result<Vec<Trend>, FetchError> {
        let mut retry_count = 0;

        let bytes = loop {
            let response = tokio::time::timeout(self.timeout, self.client.get(&self.url).send())
                .await
                .map_err(|_| FetchError::Timeout)?
                .map_err(FetchError::Network)?;

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if retry_count >= self.max_retries {
                    return Err(FetchError::RateLimited(self.max_retries));
                }
                self.back_off(retry_count, "Rate limited, backing off").await;
                retry_count += 1;
                continue;
            }

            if status.is_server_error() {
                if retry_count >= self.max_retries {
                    return Err(FetchError::HttpStatus(status.as_u16()));
                }
                self.back_off(retry_count, "Server error, retrying after delay").await;
                retry_count += 1;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            match read_limited_bytes(response, MAX_RESPONSE_SIZE).await {
                Ok(bytes) => break bytes,
                Err(FetchError::IncompleteResponse { expected, received }) => {
                    if retry_count >= self.max_retries {
                        return Err(FetchError::IncompleteResponse { expected, received });
                    }
                    self.back_off(retry_count, "Retrying incomplete download").await;
                    retry_count += 1;
                    continue;
                }
                Err(e) => return Err(e),
            }
        };

        let trends = parse_listing(&bytes)?;
        tracing::debug!(url = %self.url, count = trends.len(), "Fetched remote trends");
        Ok(trends)
    }

    async fn back_off(&self, retry_count: u32, message: &'static str) {
        let delay_secs = 1u64 << retry_count.min(6);
        tracing::warn!(
            url = %self.url,
            retry = retry_count,
            delay_secs = delay_secs,
            "{message}"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
    }
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

// ============================================================================
// Listing Mapping
// ============================================================================

// Every field is optional on the wire; `null` and missing are treated alike.
// A post is decoded one field at a time: scalars are coerced to text, and a
// field of an unusable type falls back to its default without touching the
// rest of the post. A child that is not an object is skipped.

#[derive(Debug, Default, Deserialize)]
struct Listing {
    data: Option<ListingData>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    children: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct Child {
    data: Option<Post>,
}

#[derive(Debug, Default, Deserialize)]
struct Post {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    selftext: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    permalink: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    subreddit: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    created: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    link_flair_text: Option<String>,
}

/// Strings as-is, numbers and booleans as their JSON text, anything else `None`.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers, or strings holding one.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Parse a listing body into trends, in listing order.
///
/// Children without a `data` object are skipped. Only a body that is not
/// JSON, or whose top-level shape is wrong, is a [`FetchError::Parse`].
pub fn parse_listing(bytes: &[u8]) -> Result<Vec<Trend>, FetchError> {
    let listing: Listing =
        serde_json::from_slice(bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

    let trends = listing
        .data
        .and_then(|d| d.children)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|child| match serde_json::from_value::<Child>(child) {
            Ok(child) => child.data,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping listing child that is not an object");
                None
            }
        })
        .map(post_to_trend)
        .collect();

    Ok(trends)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// `created` arrives as a float; integral values print without a fraction.
fn format_created(created: Option<f64>) -> String {
    match created {
        Some(c) if c.fract() == 0.0 && c.is_finite() => format!("{}", c as i64),
        Some(c) => c.to_string(),
        None => "unknown".to_string(),
    }
}

fn post_to_trend(post: Post) -> Trend {
    let subreddit = non_empty(post.subreddit);

    let id = non_empty(post.id)
        .or_else(|| non_empty(post.name))
        .unwrap_or_else(|| {
            format!(
                "{}_{}",
                subreddit.as_deref().unwrap_or("unknown"),
                format_created(post.created)
            )
        });

    let title = post
        .title
        .as_deref()
        .map(|t| strip_control_chars(t).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let selftext = post
        .selftext
        .as_deref()
        .map(|s| strip_control_chars(s).trim().to_string())
        .unwrap_or_default();

    let short_summary = first_paragraph(&selftext)
        .map(|p| truncate_chars(p, SUMMARY_MAX_CHARS).to_string())
        .unwrap_or_else(|| title.clone());

    let long_explanation = if selftext.is_empty() {
        title.clone()
    } else {
        selftext
    };

    let sources = match non_empty(post.permalink) {
        Some(permalink) => vec![Source::new(
            format!("r/{}", subreddit.as_deref().unwrap_or("OutOfTheLoop")),
            format!("https://www.reddit.com{permalink}"),
        )],
        None => Vec::new(),
    };

    let tags = non_empty(post.link_flair_text)
        .map(|flair| vec![strip_control_chars(&flair).into_owned()])
        .unwrap_or_default();

    Trend {
        id,
        title,
        short_summary,
        long_explanation,
        example_sentence: String::new(),
        category: Category::Trend,
        sources,
        tags,
        published: post.created.filter(|c| c.is_finite()).map(|c| c as i64),
    }
}

/// First non-blank paragraph, where paragraphs are separated by runs of newlines.
fn first_paragraph(text: &str) -> Option<&str> {
    text.split('\n').map(str::trim).find(|p| !p.is_empty())
}
