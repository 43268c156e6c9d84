//! News Service client.
//!
//! The client speaks one exchange with the external News Service:
//!
//! ```text
//! POST {endpoint}/fetch-news
//! Content-Type: application/json
//!
//! {"topic": "...", "sources": "..."}
//! ```
//!
//! A success status carries a JSON array of articles (possibly empty). Any
//! other status is a failure whose body is ignored.
//!
//! # Architecture
//!
//! - [`NewsService`]: the seam the submitter depends on
//! - [`HttpNewsService`]: the `reqwest` implementation
//!
//! No timeout or retry is applied; a failed fetch is reported once.

use crate::error::{NewsError, NewsResult};
use crate::models::{Article, Query, parse_articles};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Path of the fetch endpoint, relative to the service root.
pub const FETCH_NEWS_PATH: &str = "/fetch-news";

/// Something that can answer a [`Query`] with articles.
pub trait NewsService {
    /// Fetch the articles matching `query`, in the order the service returns them.
    fn fetch_news(&self, query: &Query) -> impl Future<Output = NewsResult<Vec<Article>>> + Send;
}

/// [`NewsService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNewsService {
    client: Client,
    endpoint: Url,
}

impl HttpNewsService {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Endpoint`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> NewsResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> NewsResult<Self> {
        let endpoint = Url::parse(base_url)?.join(FETCH_NEWS_PATH)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl NewsService for HttpNewsService {
    #[instrument(level = "info", skip_all, fields(topic = %query.topic, sources = %query.sources))]
    async fn fetch_news(&self, query: &Query) -> NewsResult<Vec<Article>> {
        let t0 = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "News service unreachable"))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                %status,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "News service returned an error status"
            );
            return Err(NewsError::Status(status));
        }

        let body = response.text().await?;
        let articles = parse_articles(&body).inspect_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "News service body is not an article list"
            )
        })?;

        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched articles"
        );
        debug!(?articles, "Fetched article records");
        Ok(articles)
    }
}
