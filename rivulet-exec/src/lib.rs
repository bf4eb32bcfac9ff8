// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Subscribing to value streams.
//!
//! [`SubscribeExt::subscribe`] drives a stream of
//! [`StreamItem<T>`](rivulet_core::StreamItem) on a background task and
//! delivers every callback as a job on a
//! [`PublishContext`](rivulet_core::PublishContext), so handlers for the same
//! context never run concurrently. The returned [`Subscription`] stops
//! delivery when cancelled or dropped; [`SubscriptionBag`] holds several of
//! them for one owner.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod subscribe;
pub mod subscription;

pub use subscribe::SubscribeExt;
pub use subscription::{Subscription, SubscriptionBag};
