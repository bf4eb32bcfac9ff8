// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use parking_lot::Mutex;
use rivulet_core::{Result, RivuletError};
use rivulet_models::{Response, Transport};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Debug)]
enum Reply {
    Respond { response: Response, delay: Duration },
    Fail(RivuletError),
}

/// [`Transport`] that answers from a script instead of the network.
///
/// Replies are consumed in order, one per `get`. Once the script is
/// exhausted, every further request fails with a transport error.
/// Clones share the script and the request log.
///
/// ```rust
/// use rivulet_test_utils::StubTransport;
/// use rivulet_models::Transport;
/// use url::Url;
///
/// # async fn example() {
/// let stub = StubTransport::new().respond(200, b"[]".to_vec());
/// let url = Url::parse("https://example.test/posts").unwrap();
///
/// let response = stub.get(&url).await.unwrap();
/// assert_eq!(response.status, Some(200));
/// assert_eq!(stub.calls(), 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    script: Arc<Mutex<VecDeque<Reply>>>,
    requested: Arc<Mutex<Vec<Url>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(Reply::Respond {
            response: Response::new(status, body),
            delay: Duration::ZERO,
        })
    }

    /// Scripts a reply that arrives only after `delay` has elapsed.
    #[must_use]
    pub fn respond_after(self, delay: Duration, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(Reply::Respond {
            response: Response::new(status, body),
            delay,
        })
    }

    /// Scripts a reply that carries a body but no HTTP status.
    #[must_use]
    pub fn respond_without_status(self, body: impl Into<Vec<u8>>) -> Self {
        self.push(Reply::Respond {
            response: Response::without_status(body),
            delay: Duration::ZERO,
        })
    }

    #[must_use]
    pub fn fail(self, error: RivuletError) -> Self {
        self.push(Reply::Fail(error))
    }

    /// Number of requests issued so far.
    pub fn calls(&self) -> usize {
        self.requested.lock().len()
    }

    pub fn requested_urls(&self) -> Vec<Url> {
        self.requested.lock().clone()
    }

    fn push(self, reply: Reply) -> Self {
        self.script.lock().push_back(reply);
        self
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &Url) -> Result<Response> {
        self.requested.lock().push(url.clone());
        let reply = self.script.lock().pop_front();

        match reply {
            Some(Reply::Respond { response, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(response)
            }
            Some(Reply::Fail(error)) => Err(error),
            None => Err(RivuletError::transport(format!("no scripted reply for {url}"))),
        }
    }
}
