//! HTTP implementation of the article source contract.
//!
//! # Responsibility
//! - Issue one GET against the configured search endpoint per call.
//! - Classify outcomes into the fetch failure taxonomy.
//!
//! # Invariants
//! - Non-2xx statuses become `FetchError::Http`, never a success.
//! - The api key travels only in the query string, never in log lines.

use super::response::parse_search_response;
use super::{ArticleSource, FetchError, FetchResult, RemoteArticle, SearchConfig};
use log::{error, info};
use reqwest::blocking::Client;
use std::time::{Duration, Instant};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking search API client. Runs on the background worker, never on
/// the interactive thread.
pub struct HttpArticleSource {
    http: Client,
    config: SearchConfig,
}

impl HttpArticleSource {
    pub fn new(config: SearchConfig) -> FetchResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }
}

impl ArticleSource for HttpArticleSource {
    fn fetch_articles(&self) -> FetchResult<Vec<RemoteArticle>> {
        let started_at = Instant::now();
        info!("event=fetch module=fetch status=start");

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[("api-key", self.config.api_key.as_str())])
            .send()
            .map_err(|err| {
                error!(
                    "event=fetch module=fetch status=error duration_ms={} error_code=transport error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                FetchError::Transport(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "event=fetch module=fetch status=error duration_ms={} error_code=http http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            let body = response.text().ok().filter(|text| !text.is_empty());
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().map_err(FetchError::Transport)?;
        let docs = parse_search_response(&body).map_err(|err| {
            error!(
                "event=fetch module=fetch status=error duration_ms={} error_code=parse error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;

        info!(
            "event=fetch module=fetch status=ok duration_ms={} doc_count={}",
            started_at.elapsed().as_millis(),
            docs.len()
        );
        Ok(docs)
    }
}
