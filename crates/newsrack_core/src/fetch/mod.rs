//! Remote article search client.
//!
//! # Responsibility
//! - Define the fetch contract the sync path depends on.
//! - Decode the search API envelope into remote article values.
//!
//! # Invariants
//! - One invocation yields exactly one outcome: parsed articles or a
//!   classified failure. Parse failures are never reported as an empty
//!   success.
//! - The API credential is supplied out-of-band (constructor or env) and
//!   is never written to logs.

mod client;
mod response;

pub use client::HttpArticleSource;
pub use response::{parse_search_response, Byline, Headline, MediaAsset, RemoteArticle};

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default article search endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str =
    "https://api.nytimes.com/svc/search/v2/articlesearch.json";

/// Environment variable consulted by [`SearchConfig::from_env`].
pub const API_KEY_ENV: &str = "NEWSRACK_API_KEY";

/// Endpoint and credential for the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base URL of the search endpoint. Overridable for tests.
    pub endpoint: String,
    /// API key sent as the `api-key` query parameter.
    pub api_key: String,
}

impl SearchConfig {
    /// Creates a config against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Overrides the endpoint, e.g. to point at a local test server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Reads the API key from `NEWSRACK_API_KEY`.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim().to_string())),
            _ => Err(format!("environment variable {API_KEY_ENV} is not set")),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure classification for one fetch attempt.
#[derive(Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    Http { status: u16, body: Option<String> },
    /// The request never completed (connection, TLS, timeout).
    Transport(reqwest::Error),
    /// The response body could not be decoded into the expected shape.
    Parse(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, .. } => {
                write!(f, "search request failed with status {status}")
            }
            Self::Transport(err) => write!(f, "search request failed: {err}"),
            Self::Parse(message) => {
                write!(f, "search response could not be decoded: {message}")
            }
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Http { .. } | Self::Parse(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Source of remote articles for one refresh cycle.
///
/// The seam that lets tests drive the sync path without a network.
pub trait ArticleSource {
    fn fetch_articles(&self) -> FetchResult<Vec<RemoteArticle>>;
}
