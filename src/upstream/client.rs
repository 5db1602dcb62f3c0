use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use sqg_protocol::chat::ChatCompletionRequest;
use tracing::{debug, warn};

use super::{Completion, CompletionClient, UpstreamError, UpstreamReply, MAX_ERROR_BODY_SIZE};
use crate::{config::ProviderConfig, routers::error::sanitize_error_body};

/// `reqwest`-backed completion client for a single configured provider.
#[derive(Clone)]
pub struct HttpCompletionClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpCompletionClient {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Returns `None` when the provider URL or key is not configured.
    pub fn from_config(
        client: reqwest::Client,
        provider: &ProviderConfig,
        timeout: Duration,
    ) -> Option<Self> {
        let (url, api_key) = provider.endpoint()?;
        Some(Self::new(client, url, api_key, timeout))
    }
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Completion, UpstreamError> {
        debug!(url = %self.url, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, model = %request.model, error = %e, "Request to provider failed");
                UpstreamError::from_reqwest(e)
            })?;

        let status = response.status();
        debug!(model = %request.model, status = %status, "Received provider response");

        if !status.is_success() {
            let body = match read_response_body_limited(response, MAX_ERROR_BODY_SIZE).await {
                ReadBodyResult::Ok(body) => sanitize_error_body(&body),
                ReadBodyResult::TooLarge => "Response body too large".to_string(),
                ReadBodyResult::Error(e) => {
                    warn!(model = %request.model, error = %e, "Failed to read provider error body");
                    String::new()
                }
            };
            warn!(model = %request.model, status = %status, body = %body, "Provider returned error status");
            return Err(UpstreamError::Http { status, body });
        }

        // The deadline also covers reading the body; a stalled body surfaces as a timeout.
        let bytes = response.bytes().await.map_err(UpstreamError::from_reqwest)?;

        let reply = UpstreamReply::parse(&bytes);
        match &reply {
            UpstreamReply::LogicError {
                message,
                error_type,
            } => warn!(
                model = %request.model,
                error_type = ?error_type,
                provider_message = %message,
                "Provider returned error in body"
            ),
            UpstreamReply::Malformed(reason) => {
                warn!(model = %request.model, reason = %reason, "Provider returned malformed body")
            }
            UpstreamReply::Empty => warn!(model = %request.model, "Provider returned empty content"),
            UpstreamReply::Success(_) => {}
        }
        reply.into_result()
    }
}

/// Result of reading a response body with size limit
pub enum ReadBodyResult {
    /// Successfully read the full body
    Ok(String),
    /// Body exceeded max size
    TooLarge,
    /// Error reading body
    Error(String),
}

/// Read a response body incrementally with a size limit.
pub async fn read_response_body_limited(
    response: reqwest::Response,
    max_size: usize,
) -> ReadBodyResult {
    let mut stream = response.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();

    while let Some(chunk_result) = stream.next().await {
        match chunk_result {
            Ok(chunk) => {
                if buf.len() + chunk.len() > max_size {
                    return ReadBodyResult::TooLarge;
                }
                buf.extend_from_slice(&chunk);
            }
            Err(e) => return ReadBodyResult::Error(e.to_string()),
        }
    }

    // Decode once so multibyte sequences split across chunks stay intact.
    match String::from_utf8(buf) {
        Ok(body) => ReadBodyResult::Ok(body),
        Err(e) => ReadBodyResult::Error(format!("invalid UTF-8 in response body: {}", e)),
    }
}
