// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::timer::Timer;
use core::pin::Pin;
use futures::stream::FusedStream;
use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::future::Future;
use std::task::{Context, Poll};
use std::time::Duration;

/// Extension trait providing the `debounce` operator.
pub trait DebounceExt<T, TM>: Stream<Item = StreamItem<T>> + Sized
where
    TM: Timer,
{
    /// Emits a value only after `duration` has passed without a newer one.
    ///
    /// Trailing debounce:
    /// - each value starts (or restarts) the timer and replaces the pending value
    /// - when the timer fires, the pending value is emitted
    /// - when the source ends, a pending value is emitted immediately
    ///
    /// Errors are forwarded without delay, discard the pending value and end
    /// the stream, like `try_map_value`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rivulet_stream_time::{DebounceExt, TokioTimer};
    /// use rivulet_core::StreamItem;
    /// use futures::StreamExt;
    /// use std::time::Duration;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let typed = futures::stream::iter(["r", "ru", "rus", "rust"]).map(StreamItem::Value);
    /// let mut settled = Box::pin(typed.debounce(Duration::from_millis(50), TokioTimer));
    ///
    /// assert_eq!(settled.next().await, Some(StreamItem::Value("rust")));
    /// assert_eq!(settled.next().await, None);
    /// # }
    /// ```
    fn debounce(self, duration: Duration, timer: TM) -> Debounce<Self, T, TM>;
}

impl<S, T, TM> DebounceExt<T, TM> for S
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    fn debounce(self, duration: Duration, timer: TM) -> Debounce<Self, T, TM> {
        Debounce {
            stream: self,
            duration,
            timer,
            pending: None,
            sleep: None,
            source_ended: false,
            terminated: false,
        }
    }
}

/// Stream returned by [`DebounceExt::debounce`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct Debounce<S, T, TM: Timer> {
    #[pin]
    stream: S,
    duration: Duration,
    timer: TM,
    pending: Option<T>,
    #[pin]
    sleep: Option<TM::Sleep>,
    source_ended: bool,
    terminated: bool,
}

impl<S, T, TM> Stream for Debounce<S, T, TM>
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.terminated {
                return Poll::Ready(None);
            }

            if *this.source_ended {
                this.sleep.set(None);
                return match this.pending.take() {
                    Some(value) => Poll::Ready(Some(StreamItem::Value(value))),
                    None => {
                        *this.terminated = true;
                        Poll::Ready(None)
                    }
                };
            }

            if this.pending.is_some() {
                if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
                    if sleep.poll(cx).is_ready() {
                        this.sleep.set(None);
                        if let Some(value) = this.pending.take() {
                            return Poll::Ready(Some(StreamItem::Value(value)));
                        }
                    }
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    this.sleep
                        .set(Some(this.timer.sleep_future(*this.duration)));
                    *this.pending = Some(value);
                    // A zero duration may already be elapsed.
                    continue;
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    *this.pending = None;
                    this.sleep.set(None);
                    *this.terminated = true;
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                Poll::Ready(None) => {
                    *this.source_ended = true;
                    continue;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S, T, TM> FusedStream for Debounce<S, T, TM>
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
