//! HTTP clients for the metadata providers.

pub mod anilist;
pub mod jikan;

pub use anilist::AnilistClient;
pub use jikan::JikanClient;

use crate::constants::providers::{RATE_LIMIT_RETRY_DELAY, USER_AGENT};
use crate::models::provider::ProviderKind;
use crate::services::provider::ProviderError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings shared by both provider clients.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub retry_delay: Duration,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            retry_delay: RATE_LIMIT_RETRY_DELAY,
        }
    }

    pub(crate) fn build_client(&self) -> Client {
        Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Sends a request, retrying once after a delay when the provider answers
/// HTTP 429. `Retry-After` seconds are honored when present.
pub(crate) async fn send_with_retry(
    provider: ProviderKind,
    request: RequestBuilder,
    retry_delay: Duration,
) -> Result<Response, ProviderError> {
    let retry = request.try_clone();

    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e))?;

    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return Ok(response);
    }

    let Some(retry) = retry else {
        return Ok(response);
    };

    let delay = retry_after(response.headers()).unwrap_or(retry_delay);
    warn!(
        %provider,
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "Rate limited, retrying once"
    );
    tokio::time::sleep(delay).await;

    let response = retry
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e))?;
    debug!(%provider, status = %response.status(), "Retry finished");
    Ok(response)
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Turns a non-success status into [`ProviderError::Status`].
pub(crate) fn ensure_success(
    provider: ProviderKind,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn retry_after_reads_whole_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("3"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(3)));

        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(retry_after(&headers), None);
    }

    #[test]
    fn default_options_use_app_user_agent() {
        let options = ClientOptions::new("https://example.invalid");
        assert_eq!(options.user_agent, USER_AGENT);
        assert_eq!(options.retry_delay, RATE_LIMIT_RETRY_DELAY);
    }
}
