//! Feed retrieval.

use std::future::Future;
use std::time::Duration;

use firstlight_core::constants::USER_AGENT;

use crate::error::{ServiceError, ServiceResult};

/// Source of raw calendar feed text.
pub trait FeedFetcher {
    /// ## Summary
    /// Retrieves the feed at `url` as text.
    ///
    /// ## Errors
    /// Returns an error if the feed cannot be retrieved or the server answers
    /// with a non-success status.
    fn fetch(&self, url: &str) -> impl Future<Output = ServiceResult<String>> + Send;
}

/// Fetches feeds over HTTP(S) with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    /// ## Summary
    /// Builds a fetcher whose requests give up after `timeout`.
    ///
    /// ## Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

impl FeedFetcher for HttpFeedFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> ServiceResult<String> {
        let url = normalize_feed_url(url);
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Feed request was not successful");
            return Err(ServiceError::FetchStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "Fetched feed");

        Ok(body)
    }
}

/// Rewrites `webcal://` subscription links to `https://`.
#[must_use]
pub fn normalize_feed_url(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.get(..9) {
        Some(scheme) if scheme.eq_ignore_ascii_case("webcal://") => {
            format!("https://{}", &trimmed[9..])
        }
        _ => trimmed.to_string(),
    }
}
