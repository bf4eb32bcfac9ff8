// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::subscription::Subscription;
use core::pin::pin;
use futures::stream::{Stream, StreamExt};
use parking_lot::Mutex;
use rivulet_core::{CancellationToken, PublishContext, RivuletError, RivuletTask, StreamItem};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Extension trait attaching callbacks to a stream of `StreamItem<T>`.
pub trait SubscribeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Starts consuming the stream and returns the handle that keeps it alive.
    ///
    /// # Behavior
    ///
    /// - The stream is polled on a spawned tokio task
    /// - `on_value` runs once per value, in stream order
    /// - `on_error` runs at most once; an error ends the subscription
    /// - `on_complete` runs at most once, when the stream ends without error
    /// - Every callback runs as a job on `context`, never on the polling task
    /// - After [`Subscription::cancel`] (or drop) no callback runs, including
    ///   jobs that were already queued
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use rivulet_core::{PublishContext, StreamItem};
    /// use rivulet_exec::SubscribeExt;
    /// use futures::stream;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let context = PublishContext::new("main");
    /// let (done_tx, done_rx) = tokio::sync::oneshot::channel();
    ///
    /// let _subscription = stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)])
    ///     .subscribe(
    ///         &context,
    ///         |value: i32| println!("got {value}"),
    ///         |error| eprintln!("failed: {error}"),
    ///         move || {
    ///             let _ = done_tx.send(());
    ///         },
    ///     );
    ///
    /// done_rx.await.unwrap();
    /// # }
    /// ```
    fn subscribe<OnValue, OnError, OnComplete>(
        self,
        context: &PublishContext,
        on_value: OnValue,
        on_error: OnError,
        on_complete: OnComplete,
    ) -> Subscription
    where
        OnValue: FnMut(T) + Send + 'static,
        OnError: FnOnce(RivuletError) + Send + 'static,
        OnComplete: FnOnce() + Send + 'static;

    /// Like [`subscribe`](Self::subscribe) with only a value handler.
    ///
    /// A terminal error is logged at `warn` level.
    fn subscribe_values<OnValue>(self, context: &PublishContext, on_value: OnValue) -> Subscription
    where
        OnValue: FnMut(T) + Send + 'static,
    {
        let name = context.name().to_string();
        self.subscribe(
            context,
            on_value,
            move |error| warn!(context = %name, %error, "subscription ended with error"),
            || {},
        )
    }
}

impl<S, T> SubscribeExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    fn subscribe<OnValue, OnError, OnComplete>(
        self,
        context: &PublishContext,
        on_value: OnValue,
        on_error: OnError,
        on_complete: OnComplete,
    ) -> Subscription
    where
        OnValue: FnMut(T) + Send + 'static,
        OnError: FnOnce(RivuletError) + Send + 'static,
        OnComplete: FnOnce() + Send + 'static,
    {
        let context = context.clone();
        let handlers = Arc::new(Mutex::new(Handlers {
            on_value,
            on_error: Some(on_error),
            on_complete: Some(on_complete),
        }));

        let finished = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&finished);
        let task = RivuletTask::spawn(move |cancel| drive(self, context, handlers, cancel, done));
        Subscription::new(task, finished)
    }
}

struct Handlers<OnValue, OnError, OnComplete> {
    on_value: OnValue,
    on_error: Option<OnError>,
    on_complete: Option<OnComplete>,
}

type Shared<H> = Arc<Mutex<H>>;

async fn drive<S, T, OnValue, OnError, OnComplete>(
    stream: S,
    context: PublishContext,
    handlers: Shared<Handlers<OnValue, OnError, OnComplete>>,
    cancel: CancellationToken,
    done: Arc<AtomicBool>,
) where
    S: Stream<Item = StreamItem<T>> + Send,
    T: Send + 'static,
    OnValue: FnMut(T) + Send + 'static,
    OnError: FnOnce(RivuletError) + Send + 'static,
    OnComplete: FnOnce() + Send + 'static,
{
    let mut stream = pin!(stream);
    debug!(context = %context.name(), "subscription started");

    loop {
        let item = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(context = %context.name(), "subscription cancelled");
                return;
            }
            item = stream.next() => item,
        };

        let delivered = match item {
            Some(StreamItem::Value(value)) => {
                deliver(&context, &cancel, &handlers, move |h| (h.on_value)(value))
            }
            Some(StreamItem::Error(error)) => {
                debug!(context = %context.name(), %error, "subscription terminated by error");
                deliver_last(&context, &cancel, &handlers, &done, move |h| {
                    if let Some(on_error) = h.on_error.take() {
                        on_error(error);
                    }
                });
                return;
            }
            None => {
                debug!(context = %context.name(), "subscription completed");
                deliver_last(&context, &cancel, &handlers, &done, |h| {
                    if let Some(on_complete) = h.on_complete.take() {
                        on_complete();
                    }
                });
                return;
            }
        };

        if !delivered {
            done.store(true, Ordering::Release);
            return;
        }
    }
}

/// Queues `job` on the context. The job is skipped if the subscription is
/// cancelled by the time it runs. Returns `false` if the context is closed.
fn deliver<H, F>(
    context: &PublishContext,
    cancel: &CancellationToken,
    handlers: &Shared<H>,
    job: F,
) -> bool
where
    H: Send + 'static,
    F: FnOnce(&mut H) + Send + 'static,
{
    let cancel = cancel.clone();
    let handlers = Arc::clone(handlers);

    context
        .dispatch(move || {
            if cancel.is_cancelled() {
                return;
            }
            job(&mut handlers.lock());
        })
        .is_ok()
}

/// Queues the terminal job. `done` is raised when that job runs, or right
/// away if the context is closed.
fn deliver_last<H, F>(
    context: &PublishContext,
    cancel: &CancellationToken,
    handlers: &Shared<H>,
    done: &Arc<AtomicBool>,
    job: F,
) where
    H: Send + 'static,
    F: FnOnce(&mut H) + Send + 'static,
{
    let finished = Arc::clone(done);
    let queued = deliver(context, cancel, handlers, move |h| {
        finished.store(true, Ordering::Release);
        job(h);
    });
    if !queued {
        done.store(true, Ordering::Release);
    }
}
