// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Infallible value transformation.

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::{ready, Stream};
use pin_project::pin_project;
use rivulet_core::StreamItem;

/// Extension trait providing the `map_value` operator.
pub trait MapValueExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Applies `f` to every value, preserving order and timing.
    ///
    /// The transform is pure and cannot fail; errors are passed through
    /// unchanged and completion is forwarded as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet_core::StreamItem;
    /// use rivulet_stream::MapValueExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let source = stream::iter(vec![StreamItem::Value("ab"), StreamItem::Value("abcd")]);
    /// let valid: Vec<_> = source.map_value(|t| t.len() > 3).collect().await;
    /// assert_eq!(valid, vec![StreamItem::Value(false), StreamItem::Value(true)]);
    /// # }
    /// ```
    fn map_value<U, F>(self, f: F) -> MapValue<Self, F>
    where
        F: FnMut(T) -> U;
}

impl<S, T> MapValueExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn map_value<U, F>(self, f: F) -> MapValue<Self, F>
    where
        F: FnMut(T) -> U,
    {
        MapValue { stream: self, f }
    }
}

/// Stream returned by [`MapValueExt::map_value`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct MapValue<S, F> {
    #[pin]
    stream: S,
    f: F,
}

impl<S, T, U, F> Stream for MapValue<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> U,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let item = ready!(this.stream.poll_next(cx));
        Poll::Ready(item.map(|item| item.map(this.f)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}
