// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::timer::Timer;
use core::pin::Pin;
use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::future::Future;
use std::task::{Context, Poll};
use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Infinite source emitting `1, 2, 3, …`, one value per `period`.
///
/// The first value is due one period after the stream is first polled.
/// Deadlines are computed from the previous deadline rather than from the
/// moment a value was consumed, so a slow consumer does not push later ticks
/// back. A zero `period` is treated as one millisecond.
///
/// # Example
///
/// ```rust
/// use rivulet_stream_time::{ticks, TokioTimer};
/// use rivulet_core::StreamItem;
/// use futures::StreamExt;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let first_three: Vec<_> = ticks(Duration::from_millis(5), TokioTimer)
///     .take(3)
///     .collect()
///     .await;
///
/// assert_eq!(
///     first_three,
///     vec![StreamItem::Value(1), StreamItem::Value(2), StreamItem::Value(3)]
/// );
/// # }
/// ```
pub fn ticks<TM: Timer>(period: Duration, timer: TM) -> Ticks<TM> {
    Ticks {
        timer,
        period: period.max(MIN_PERIOD),
        next_deadline: None,
        emitted: 0,
        sleep: None,
    }
}

/// Stream returned by [`ticks`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct Ticks<TM: Timer> {
    timer: TM,
    period: Duration,
    next_deadline: Option<TM::Instant>,
    emitted: u64,
    #[pin]
    sleep: Option<TM::Sleep>,
}

impl<TM: Timer> Ticks<TM> {
    /// Number of values emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl<TM: Timer> Stream for Ticks<TM> {
    type Item = StreamItem<u64>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if this.sleep.is_none() {
            let now = this.timer.now();
            let deadline = *this.next_deadline.get_or_insert(now + *this.period);
            let remaining = if deadline > now {
                deadline - now
            } else {
                Duration::ZERO
            };
            this.sleep.set(Some(this.timer.sleep_future(remaining)));
        }

        let Some(sleep) = this.sleep.as_mut().as_pin_mut() else {
            return Poll::Pending;
        };

        match sleep.poll(cx) {
            Poll::Ready(()) => {
                this.sleep.set(None);
                *this.next_deadline = this.next_deadline.map(|deadline| deadline + *this.period);
                *this.emitted += 1;
                Poll::Ready(Some(StreamItem::Value(*this.emitted)))
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
