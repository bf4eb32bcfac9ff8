// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use futures::stream::StreamExt;
use futures::{FutureExt, Stream};
use rivulet_core::StreamItem;
use std::time::Duration;
use tokio::time::sleep;

// All helpers poll the stream before the timeout so a zero timeout still
// observes anything that is already ready.

/// Panics if the stream yields anything, including its end, within
/// `timeout_ms`.
///
/// A zero timeout polls the stream exactly once and never lets a paused
/// clock move.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    if timeout_ms == 0 {
        if let Some(item) = stream.next().now_or_never() {
            panic!("Unexpected element emitted, expected no output: {item:?}");
        }
        return;
    }
    tokio::select! {
        biased;
        item = stream.next() => {
            panic!("Unexpected element emitted, expected no output: {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Panics if the stream yields an element within `timeout_ms`.
///
/// Unlike [`assert_no_element_emitted`], the end of the stream counts as
/// silence: use it where the producer may legitimately be gone.
pub async fn assert_no_further_elements<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        biased;
        item = stream.next() => {
            if let Some(item) = item {
                panic!("Unexpected element emitted after the last expected one: {item:?}");
            }
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Waits up to `timeout_ms` for the next item and returns it.
///
/// Panics if the stream ends or nothing arrives in time.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    tokio::select! {
        biased;
        item = stream.next() => match item {
            Some(item) => item,
            None => panic!("Stream ended while an element was expected"),
        },
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("No element emitted within {timeout_ms} ms");
        }
    }
}

/// Unwraps `Some(StreamItem::Value(_))`, panicking on anything else.
pub fn unwrap_value<T: Debug>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(value)) => value,
        other => panic!("Expected a value, got {other:?}"),
    }
}

pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        biased;
        item = stream.next() => {
            assert!(item.is_none(), "Expected end of stream, got {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("Stream still open after {timeout_ms} ms");
        }
    }
}
