//! HTTP transport for OpenAI-compatible chat completions.

use crate::{Request, Response};
use reqwest::{
    Client, Method, StatusCode,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};

/// A failed completion request.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not a chat completion.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The completion had no content.
    #[error("completion returned no content")]
    Empty,
}

impl HttpError {
    /// Transport failures, rate limits, and server errors are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS
                    || *status == StatusCode::REQUEST_TIMEOUT
                    || status.is_server_error()
            }
            Self::Decode(_) | Self::Empty => false,
        }
    }
}

/// Sends chat completion requests to one endpoint with fixed headers.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Provider authenticating with `Authorization: Bearer <key>`.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> anyhow::Result<Self> {
        let mut headers = json_headers();
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Provider without authentication, e.g. a local Ollama.
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            headers: json_headers(),
            endpoint: endpoint.to_owned(),
        }
    }

    /// Provider authenticating with a custom header.
    pub fn custom_header(
        client: Client,
        name: &str,
        value: &str,
        endpoint: &str,
    ) -> anyhow::Result<Self> {
        let mut headers = json_headers();
        headers.insert(HeaderName::from_bytes(name.as_bytes())?, value.parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Chat completions endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one non-streaming completion request.
    pub async fn send(&self, body: &Request) -> Result<Response, HttpError> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("request: {}", serde_json::to_string(body)?);
        }
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::trace!("response ({status}): {text}");
        if !status.is_success() {
            return Err(HttpError::Status { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let json = HeaderValue::from_static("application/json");
    headers.insert(header::CONTENT_TYPE, json.clone());
    headers.insert(header::ACCEPT, json);
    headers
}
