// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative cancellation shared between a pipeline owner and its tasks.

use event_listener::{Event, EventListener};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Cancellation token.
///
/// A `CancellationToken` can be cloned to create multiple handles to the same
/// cancellation state. When `cancel()` is called on any clone, all waiters on
/// `cancelled()` are notified.
///
/// # Example
///
/// ```
/// use rivulet_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
///
/// token.cancel();
/// token.cancel(); // idempotent
/// assert!(observer.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a new, not yet cancelled token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Cancel the token, waking all listeners.
    ///
    /// Calling it multiple times has the same effect as calling it once.
    pub fn cancel(&self) {
        // Flag before notify so woken waiters observe it
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Check if the token has been cancelled (non-blocking).
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Wait asynchronously until the token is cancelled.
    ///
    /// Resolves immediately if the token is already cancelled.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<Pin<Box<EventListener>>>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.token.is_cancelled() {
            return Poll::Ready(());
        }

        if self.listener.is_none() {
            self.listener = Some(Box::pin(self.token.inner.event.listen()));

            // cancel() may have run between the check above and listen()
            if self.token.is_cancelled() {
                return Poll::Ready(());
            }
        }

        match self.listener.as_mut() {
            Some(listener) => listener.as_mut().poll(cx),
            None => Poll::Pending,
        }
    }
}
