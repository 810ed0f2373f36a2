//! Plain HTTP retrieval of product photos. No authentication, no retries;
//! bodies are returned exactly as the server sent them.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Per-request timeout. The fetch loop is strictly sequential, so one stuck
/// server would otherwise hold up every entry behind it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("server returned HTTP {status} for {url}")]
    ResponseError { status: StatusCode, url: String },
}

pub struct ImageClient {
    client: Client,
}

impl ImageClient {
    pub fn new() -> Result<Self, RemoteError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch one image, returning the raw response body. Callers write the
    /// bytes to disk undecoded.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::ResponseError {
                status,
                url: url.to_owned(),
            });
        }

        let body = response.bytes().await?;

        Ok(body.to_vec())
    }
}
