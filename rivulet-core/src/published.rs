// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observable state cell.
//!
//! A [`Published`] holds the last published value of a piece of state and
//! broadcasts each new value to every subscriber.
//!
//! ## Characteristics
//!
//! - **Replaying**: a new subscriber first receives the current value, then
//!   every value published after it subscribed.
//! - **Every set emits**: publishing a value equal to the current one still
//!   notifies subscribers.
//! - **Unbounded**: each subscriber has its own unbounded channel.
//! - **Cheap to clone**: all clones share the same state.
//!
//! ## Example
//!
//! ```
//! use rivulet_core::{Published, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let text = Published::new(String::new());
//! let mut changes = text.changes();
//!
//! text.set("abc".to_string());
//!
//! assert_eq!(changes.next().await, Some(StreamItem::Value(String::new())));
//! assert_eq!(changes.next().await, Some(StreamItem::Value("abc".to_string())));
//! assert_eq!(text.get(), "abc");
//! # }
//! ```

use crate::StreamItem;
use futures::channel::mpsc;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Stream of changes returned by [`Observed::changes`].
pub type Changes<T> = mpsc::UnboundedReceiver<StreamItem<T>>;

struct PublishedState<T> {
    value: T,
    senders: Vec<mpsc::UnboundedSender<StreamItem<T>>>,
}

/// Observable state cell holding the last published value.
///
/// The owner keeps the `Published` and hands readers an [`Observed`] from
/// [`observe`](Self::observe).
pub struct Published<T> {
    inner: Observed<T>,
}

/// Read-only view of a [`Published`] cell.
///
/// Exposes the value and the change stream, never a way to write:
///
/// ```compile_fail
/// use rivulet_core::Published;
///
/// let count = Published::new(0_u64);
/// count.observe().set(1);
/// ```
pub struct Observed<T> {
    state: Arc<Mutex<PublishedState<T>>>,
}

impl<T: Clone + Send + 'static> Published<T> {
    /// Create a cell holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Observed {
                state: Arc::new(Mutex::new(PublishedState {
                    value: initial,
                    senders: Vec::new(),
                })),
            },
        }
    }

    /// A read-only handle sharing this cell.
    pub fn observe(&self) -> Observed<T> {
        self.inner.clone()
    }

    /// The last published value.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Read the last published value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Publish `value` and notify every subscriber.
    pub fn set(&self, value: T) {
        let mut state = self.inner.state.lock();
        state.value = value;
        broadcast(&mut state);
    }

    /// Modify the value in place, then notify every subscriber.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut state = self.inner.state.lock();
        f(&mut state.value);
        broadcast(&mut state);
    }

    /// See [`Observed::changes`].
    pub fn changes(&self) -> Changes<T> {
        self.inner.changes()
    }

    /// See [`Observed::subscriber_count`].
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }
}

impl<T: Clone + Send + 'static> Observed<T> {
    pub fn get(&self) -> T {
        self.state.lock().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock().value)
    }

    /// Subscribe to the cell.
    ///
    /// The returned stream yields the current value immediately, then each
    /// subsequent publish. It never ends while the cell is alive.
    pub fn changes(&self) -> Changes<T> {
        let (tx, rx) = mpsc::unbounded();
        let mut state = self.state.lock();
        if tx
            .unbounded_send(StreamItem::Value(state.value.clone()))
            .is_ok()
        {
            state.senders.push(tx);
        }
        rx
    }

    /// Number of live subscribers.
    ///
    /// Dropped subscribers are pruned lazily on the next publish.
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

fn broadcast<T: Clone>(state: &mut PublishedState<T>) {
    let value = state.value.clone();
    state
        .senders
        .retain(|tx| tx.unbounded_send(StreamItem::Value(value.clone())).is_ok());
}

impl<T> Clone for Published<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Clone for Observed<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Default + Clone + Send + 'static> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Published")
            .field("value", &state.value)
            .field("subscribers", &state.senders.len())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Observed")
            .field("value", &state.value)
            .finish()
    }
}
