// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fallible value transformation with terminal error semantics.

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::FusedStream;
use futures::{ready, Stream};
use pin_project::pin_project;
use rivulet_core::{Result, StreamItem};

/// Extension trait providing the `try_map_value` operator.
pub trait TryMapValueExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Applies a fallible transform to every value.
    ///
    /// # Behavior
    ///
    /// - `Ok(u)` is emitted as `StreamItem::Value(u)`
    /// - `Err(e)` is emitted as `StreamItem::Error(e)`, then the stream ends
    /// - Upstream errors are forwarded and also end the stream
    /// - After termination the source is never polled again
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet_core::{RivuletError, StreamItem};
    /// use rivulet_stream::TryMapValueExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let statuses = stream::iter(vec![
    ///     StreamItem::Value(200_u16),
    ///     StreamItem::Value(500),
    ///     StreamItem::Value(204),
    /// ]);
    ///
    /// let checked: Vec<_> = statuses
    ///     .try_map_value(|status| {
    ///         if (200..=299).contains(&status) {
    ///             Ok(status)
    ///         } else {
    ///             Err(RivuletError::bad_server_response(Some(status)))
    ///         }
    ///     })
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(checked.len(), 2); // 200, then the terminal error
    /// assert!(checked[1].is_error());
    /// # }
    /// ```
    fn try_map_value<U, F>(self, f: F) -> TryMapValue<Self, F>
    where
        F: FnMut(T) -> Result<U>;
}

impl<S, T> TryMapValueExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn try_map_value<U, F>(self, f: F) -> TryMapValue<Self, F>
    where
        F: FnMut(T) -> Result<U>,
    {
        TryMapValue::new(self, f)
    }
}

/// Stream returned by [`TryMapValueExt::try_map_value`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct TryMapValue<S, F> {
    #[pin]
    stream: S,
    f: F,
    terminated: bool,
}

impl<S, F> TryMapValue<S, F> {
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            terminated: false,
        }
    }
}

impl<S, T, U, F> Stream for TryMapValue<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Result<U>,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.terminated {
            return Poll::Ready(None);
        }

        let item = match ready!(this.stream.poll_next(cx)) {
            Some(StreamItem::Value(value)) => match (this.f)(value) {
                Ok(mapped) => StreamItem::Value(mapped),
                Err(error) => {
                    *this.terminated = true;
                    StreamItem::Error(error)
                }
            },
            Some(StreamItem::Error(error)) => {
                *this.terminated = true;
                StreamItem::Error(error)
            }
            None => {
                *this.terminated = true;
                return Poll::Ready(None);
            }
        };

        Poll::Ready(Some(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.terminated {
            (0, Some(0))
        } else {
            let (_, upper) = self.stream.size_hint();
            (0, upper)
        }
    }
}

impl<S, T, U, F> FusedStream for TryMapValue<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Result<U>,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
