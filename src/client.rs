// HTTP client for the external link-shortening service.
//
// The service wraps every payload in `{ success, message, data }`; the
// envelope is stripped here so callers only see the payload or an error.

use crate::models::{ApiEnvelope, ClickHistory, CreatedLink};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, timeout, DNS failure and the like.
    #[error("link service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not a readable envelope.
    #[error("link service returned an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("cannot build a request URL from {0}")]
    InvalidUrl(Url),
}

#[derive(Debug, Clone)]
pub struct LinkApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LinkApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// The public short link for `short_code`.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), short_code)
    }

    /// Asks the service to shorten `long_url`.
    pub async fn shorten(&self, long_url: &str) -> Result<CreatedLink, ClientError> {
        let url = self.endpoint(&[""])?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({ "long_url": long_url }))
            .send()
            .await?;
        Self::unwrap_envelope(resp).await
    }

    /// Fetches the raw click history of `short_code`.
    pub async fn click_history(&self, short_code: &str) -> Result<ClickHistory, ClientError> {
        let url = self.endpoint(&["his", short_code])?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::unwrap_envelope(resp).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn unwrap_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&body)?;
        debug!(%status, success = envelope.success, "link service replied");

        if !envelope.success {
            let message = if envelope.message.is_empty() {
                format!("link service rejected the request ({status})")
            } else {
                envelope.message
            };
            return Err(ClientError::Rejected(message));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Rejected("link service response carried no data".to_string()))
    }
}
