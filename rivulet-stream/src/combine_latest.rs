// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `combine_latest` operator.
//!
//! # Behavior
//!
//! - Waits until both streams have emitted at least one value
//! - After that, emits `(left, right)` whenever either stream emits, pairing
//!   the new value with the latest value of the other side
//! - Errors from either side pass through immediately without touching state
//! - Completes when both sides complete, or as soon as one side completes
//!   without ever having emitted (no pair can be formed any more)
//!
//! # Example
//!
//! ```rust
//! use rivulet_stream::CombineLatestExt;
//! use rivulet_test_utils::{test_channel, helpers::unwrap_stream};
//! use rivulet_core::StreamItem;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (valid_tx, valid) = test_channel::<bool>();
//! let (count_tx, count) = test_channel::<u64>();
//!
//! let mut gate = valid.combine_latest(count);
//!
//! valid_tx.send(true).unwrap();
//! count_tx.send(3).unwrap();
//! count_tx.send(4).unwrap();
//!
//! assert_eq!(unwrap_stream(&mut gate, 500).await, StreamItem::Value((true, 3)));
//! assert_eq!(unwrap_stream(&mut gate, 500).await, StreamItem::Value((true, 4)));
//! # }
//! ```

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{Fuse, FusedStream};
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use rivulet_core::StreamItem;

/// Extension trait providing the `combine_latest` operator.
pub trait CombineLatestExt<L>: Stream<Item = StreamItem<L>> + Sized {
    /// Combines this stream with `other`, emitting the latest pair whenever
    /// either side emits.
    ///
    /// See the [module documentation](self) for the exact semantics.
    fn combine_latest<B, R>(self, other: B) -> CombineLatest<Self, B, L, R>
    where
        B: Stream<Item = StreamItem<R>>,
        L: Clone,
        R: Clone;
}

impl<S, L> CombineLatestExt<L> for S
where
    S: Stream<Item = StreamItem<L>>,
{
    fn combine_latest<B, R>(self, other: B) -> CombineLatest<Self, B, L, R>
    where
        B: Stream<Item = StreamItem<R>>,
        L: Clone,
        R: Clone,
    {
        CombineLatest {
            left: self.fuse(),
            right: other.fuse(),
            latest_left: None,
            latest_right: None,
            left_first: true,
            terminated: false,
        }
    }
}

/// Stream returned by [`CombineLatestExt::combine_latest`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct CombineLatest<A, B, L, R> {
    #[pin]
    left: Fuse<A>,
    #[pin]
    right: Fuse<B>,
    latest_left: Option<L>,
    latest_right: Option<R>,
    // Alternates which side is polled first so a busy side cannot starve the other
    left_first: bool,
    terminated: bool,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl<A, B, L, R> Stream for CombineLatest<A, B, L, R>
where
    A: Stream<Item = StreamItem<L>>,
    B: Stream<Item = StreamItem<R>>,
    L: Clone,
    R: Clone,
{
    type Item = StreamItem<(L, R)>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.terminated {
            return Poll::Ready(None);
        }

        let order = if *this.left_first {
            [Side::Left, Side::Right]
        } else {
            [Side::Right, Side::Left]
        };
        *this.left_first = !*this.left_first;

        loop {
            let mut progressed = false;

            for side in order {
                match side {
                    Side::Left => match this.left.as_mut().poll_next(cx) {
                        Poll::Ready(Some(StreamItem::Value(value))) => {
                            progressed = true;
                            *this.latest_left = Some(value);
                        }
                        Poll::Ready(Some(StreamItem::Error(error))) => {
                            return Poll::Ready(Some(StreamItem::Error(error)));
                        }
                        Poll::Ready(None) | Poll::Pending => continue,
                    },
                    Side::Right => match this.right.as_mut().poll_next(cx) {
                        Poll::Ready(Some(StreamItem::Value(value))) => {
                            progressed = true;
                            *this.latest_right = Some(value);
                        }
                        Poll::Ready(Some(StreamItem::Error(error))) => {
                            return Poll::Ready(Some(StreamItem::Error(error)));
                        }
                        Poll::Ready(None) | Poll::Pending => continue,
                    },
                }

                // A side just produced a value: emit as soon as a pair exists
                if let (Some(left), Some(right)) =
                    (this.latest_left.as_ref(), this.latest_right.as_ref())
                {
                    let pair = (left.clone(), right.clone());
                    return Poll::Ready(Some(StreamItem::Value(pair)));
                }
            }

            let left_done = this.left.is_terminated();
            let right_done = this.right.is_terminated();
            let starved = (left_done && this.latest_left.is_none())
                || (right_done && this.latest_right.is_none());

            if (left_done && right_done) || starved {
                *this.terminated = true;
                return Poll::Ready(None);
            }

            if !progressed {
                return Poll::Pending;
            }
        }
    }
}

impl<A, B, L, R> FusedStream for CombineLatest<A, B, L, R>
where
    A: Stream<Item = StreamItem<L>>,
    B: Stream<Item = StreamItem<R>>,
    L: Clone,
    R: Clone,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
