// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rivulet workspace.
//!
//! Development and testing only, not for production code.
//!
//! - [`test_channel`] / [`test_channel_with_errors`] - imperative sources for operator tests
//! - [`helpers`] - assertions that never hang a paused-clock test
//! - [`test_data`] - `Post` fixtures and JSON payloads
//! - [`StubTransport`] - scripted replacement for the HTTP transport
//!
//! ## Using Assertion Helpers
//!
//! ```rust
//! use rivulet_test_utils::assert_no_element_emitted;
//! use futures::stream;
//!
//! # async fn example() {
//! let mut silent = stream::pending::<i32>();
//! assert_no_element_emitted(&mut silent, 10).await;
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod stub_transport;
pub mod test_data;

use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{
    assert_no_element_emitted, assert_no_further_elements, assert_stream_ended, unwrap_stream,
    unwrap_value,
};
pub use stub_transport::StubTransport;

/// Creates a test channel that wraps every sent value in `StreamItem::Value`.
///
/// # Example
///
/// ```rust
/// use rivulet_test_utils::test_channel;
/// use rivulet_core::StreamItem;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
/// tx.send("hello").unwrap();
///
/// assert_eq!(stream.next().await, Some(StreamItem::Value("hello")));
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that carries `StreamItem<T>` as-is, so tests can
/// inject errors.
///
/// # Example
///
/// ```rust
/// use rivulet_test_utils::test_channel_with_errors;
/// use rivulet_core::{RivuletError, StreamItem};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel_with_errors::<i32>();
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(RivuletError::stream_error("boom"))).unwrap();
///
/// assert_eq!(stream.next().await, Some(StreamItem::Value(42)));
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
