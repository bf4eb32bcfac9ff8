// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::FetchConfig;
use crate::post::PostList;
use crate::transport::{ReqwestTransport, Response, Transport};
use futures::stream::{self, Stream};
use rivulet_core::{Observed, PublishContext, Published, Result, RivuletError, StreamItem};
use rivulet_exec::{SubscribeExt, SubscriptionBag};
use rivulet_stream::{DecodeExt, TryMapValueExt};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// How the most recent fetch ended.
#[derive(Debug, Clone)]
pub enum FetchCompletion {
    Finished,
    Failed(RivuletError),
}

impl FetchCompletion {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    pub fn error(&self) -> Option<&RivuletError> {
        match self {
            Self::Finished => None,
            Self::Failed(error) => Some(error),
        }
    }
}

/// Accepts a response with a status in `200..=299` and yields its body.
///
/// # Errors
///
/// `RivuletError::BadServerResponse` for any other status, or when the
/// response has no status at all.
pub fn validate_response(response: Response) -> Result<Vec<u8>> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(RivuletError::bad_server_response(response.status))
    }
}

/// Single-shot pipeline: GET `url`, validate the status, decode the body.
///
/// The request is issued when the stream is first polled. The stream yields
/// exactly one item, either the decoded list or the first error.
pub fn fetch_posts(
    transport: Arc<dyn Transport>,
    url: Url,
) -> impl Stream<Item = StreamItem<PostList>> + Send {
    stream::once(async move { StreamItem::from(transport.get(&url).await) })
        .try_map_value(validate_response)
        .decode::<PostList>()
}

/// View-model that loads the post list.
///
/// State is exposed through two cells:
/// - [`posts`](Self::posts): the last successfully decoded list, replaced
///   as a whole; untouched by failed fetches
/// - [`completion`](Self::completion): `None` until a fetch ends, then how
///   the latest one ended
///
/// Both are only written from jobs on the model's [`PublishContext`].
pub struct PostsModel {
    posts: Published<PostList>,
    completion: Published<Option<FetchCompletion>>,
    url: Url,
    transport: Arc<dyn Transport>,
    context: PublishContext,
    subscriptions: SubscriptionBag,
}

impl PostsModel {
    /// Build a model that talks HTTP through [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// `RivuletError::InvalidUrl` if `config.url` is not an http(s) URL.
    pub fn new(config: FetchConfig, context: PublishContext) -> Result<Self> {
        Self::with_transport(config, context, ReqwestTransport::new())
    }

    /// # Errors
    ///
    /// `RivuletError::InvalidUrl` if `config.url` is not an http(s) URL.
    pub fn with_transport(
        config: FetchConfig,
        context: PublishContext,
        transport: impl Transport,
    ) -> Result<Self> {
        let url = parse_url(&config.url)?;
        Ok(Self {
            posts: Published::new(PostList::new()),
            completion: Published::new(None),
            url,
            transport: Arc::new(transport),
            context,
            subscriptions: SubscriptionBag::new(),
        })
    }

    /// Build a model and issue the first fetch right away.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// `RivuletError::InvalidUrl` if `config.url` is not an http(s) URL.
    pub fn start(config: FetchConfig, context: PublishContext) -> Result<Self> {
        let model = Self::new(config, context)?;
        model.fetch();
        Ok(model)
    }

    pub fn posts(&self) -> Observed<PostList> {
        self.posts.observe()
    }

    pub fn completion(&self) -> Observed<Option<FetchCompletion>> {
        self.completion.observe()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue one request and publish its outcome.
    ///
    /// On success the list is published first, then
    /// `FetchCompletion::Finished`. On failure only
    /// `FetchCompletion::Failed` is published.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch(&self) {
        let posts = self.posts.clone();
        let failed = self.completion.clone();
        let finished = self.completion.clone();
        let url = self.url.clone();
        debug!(%url, "fetching posts");

        fetch_posts(Arc::clone(&self.transport), self.url.clone())
            .subscribe(
                &self.context,
                move |list: PostList| {
                    info!(count = list.len(), "posts fetched");
                    posts.set(list);
                },
                move |error| {
                    warn!(%url, %error, "posts fetch failed");
                    failed.set(Some(FetchCompletion::Failed(error)));
                },
                move || finished.set(Some(FetchCompletion::Finished)),
            )
            .store_in(&self.subscriptions);
    }

    /// Number of fetches whose outcome has not been published yet.
    pub fn pending_fetches(&self) -> usize {
        self.subscriptions.len()
    }

    /// Cancel every fetch still in flight. Nothing they would have produced
    /// is published.
    pub fn cancel(&self) {
        self.subscriptions.cancel_all();
    }
}

fn parse_url(input: &str) -> Result<Url> {
    let url = Url::parse(input).map_err(|error| RivuletError::invalid_url(input, error.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RivuletError::invalid_url(
            input,
            format!("unsupported scheme '{other}'"),
        )),
    }
}
