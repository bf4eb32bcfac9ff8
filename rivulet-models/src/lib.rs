// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reactive view-models built from rivulet streams.
//!
//! - [`PostsModel`] - fetch a JSON list of posts, validate the status, decode,
//!   and publish the list (or a failure) on a [`PublishContext`]
//! - [`FormModel`] - a ticking counter, debounced text validity and a submit
//!   gate combining both
//!
//! Both models expose their state as [`Published`] cells and own a
//! [`SubscriptionBag`](rivulet_exec::SubscriptionBag); dropping a model stops
//! all of its pipelines.
//!
//! [`PublishContext`]: rivulet_core::PublishContext
//! [`Published`]: rivulet_core::Published

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod config;
pub mod form_model;
pub mod post;
pub mod posts_model;
pub mod transport;

pub use config::{FetchConfig, FormConfig, DEFAULT_POSTS_URL};
pub use form_model::{FormModel, ValidityIcon};
pub use post::{Post, PostList};
pub use posts_model::{fetch_posts, validate_response, FetchCompletion, PostsModel};
pub use transport::{ReqwestTransport, Response, Transport};
