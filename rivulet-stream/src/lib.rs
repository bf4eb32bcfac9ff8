// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value-stream operators.
//!
//! Every operator works on streams of [`StreamItem<T>`](rivulet_core::StreamItem)
//! and is provided through an extension trait, so operators chain like the
//! ones from [`futures::StreamExt`].
//!
//! ## Operators
//!
//! | Operator | Trait | Behavior |
//! |----------|-------|----------|
//! | [`map_value`](MapValueExt::map_value) | [`MapValueExt`] | Infallible transform of each value |
//! | [`try_map_value`](TryMapValueExt::try_map_value) | [`TryMapValueExt`] | Fallible transform; first failure terminates |
//! | [`combine_latest`](CombineLatestExt::combine_latest) | [`CombineLatestExt`] | Pairs the latest value of two streams |
//! | [`decode`](DecodeExt::decode) | [`DecodeExt`] | JSON payload to typed value; failure terminates |
//!
//! Errors travel through every operator unchanged. Operators that can fail
//! stop polling their source after emitting an error.
//!
//! ## Example
//!
//! ```rust
//! use rivulet_core::StreamItem;
//! use rivulet_stream::prelude::*;
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let text = stream::iter(vec![StreamItem::Value("abcd".to_string())]);
//! let count = stream::iter(vec![StreamItem::Value(12_u64)]);
//!
//! let mut gate = text
//!     .map_value(|t| t.len() > 3)
//!     .combine_latest(count)
//!     .map_value(|(valid, count)| valid && count >= 10);
//!
//! assert_eq!(gate.next().await, Some(StreamItem::Value(true)));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod combine_latest;
pub mod decode;
pub mod map_value;
pub mod prelude;
pub mod try_map_value;

pub use combine_latest::{CombineLatest, CombineLatestExt};
pub use decode::{Decode, DecodeExt};
pub use map_value::{MapValue, MapValueExt};
pub use try_map_value::{TryMapValue, TryMapValueExt};
