// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use rivulet_core::{Result, RivuletError};
use url::Url;

/// Raw answer of a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status; `None` when the answer carried no response metadata.
    pub status: Option<u16>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
        }
    }

    pub fn without_status(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: None,
            body: body.into(),
        }
    }

    /// `true` for a status in `200..=299`.
    pub fn is_success(&self) -> bool {
        self.status
            .is_some_and(|status| (200..=299).contains(&status))
    }
}

/// Performs the network request of the fetch pipeline.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Issues one GET to `url`.
    ///
    /// # Errors
    ///
    /// `RivuletError::Transport` when no response was received at all.
    /// A response with a failing status is still `Ok`.
    async fn get(&self, url: &Url) -> Result<Response>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse a preconfigured client (timeouts, proxies, headers).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<Response> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|error| RivuletError::transport(format!("GET {url}: {error}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|error| RivuletError::transport(format!("reading body of {url}: {error}")))?;

        Ok(Response::new(status, body.to_vec()))
    }
}
