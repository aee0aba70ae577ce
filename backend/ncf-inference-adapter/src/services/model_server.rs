//! Outbound call to the model server

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::debug;

use crate::context::JSON_CONTENT_TYPE;
use crate::error::{AppError, Result};

/// A model server reachable at an invocation URI
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelServer: Send + Sync {
    /// POST `body` to `rest_uri` and return the raw body of a 200 response.
    ///
    /// Any other status yields [`AppError::ModelServerError`] carrying the
    /// response body text.
    async fn invoke(&self, rest_uri: &str, body: &str) -> Result<Vec<u8>>;
}

/// reqwest-backed model server client.
///
/// Single attempt per call, no retries, transport default timeouts.
#[derive(Clone, Default)]
pub struct HttpModelServer {
    client: Client,
}

impl HttpModelServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelServer for HttpModelServer {
    async fn invoke(&self, rest_uri: &str, body: &str) -> Result<Vec<u8>> {
        let start = Instant::now();

        let response = self
            .client
            .post(rest_uri)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body.to_owned())
            .send()
            .await?;

        let status = response.status();
        let content = response.bytes().await?;

        debug!(
            rest_uri,
            status = status.as_u16(),
            bytes = content.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Model server responded"
        );

        if status != StatusCode::OK {
            return Err(AppError::ModelServerError(
                String::from_utf8_lossy(&content).into_owned(),
            ));
        }

        Ok(content.to_vec())
    }
}
