// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rivulet_core::RivuletTask;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Handle to an active subscription.
///
/// Cancelling is idempotent and safe after the stream has completed.
/// Dropping the handle cancels the subscription.
#[derive(Debug)]
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    task: RivuletTask,
    finished: Arc<AtomicBool>,
}

impl Subscription {
    pub(crate) fn new(task: RivuletTask, finished: Arc<AtomicBool>) -> Self {
        Self { task, finished }
    }

    /// Stop delivery. No callback runs after this returns.
    pub fn cancel(&self) {
        self.task.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_cancelled()
    }

    /// `true` once the terminal callback (completion or error) has been
    /// delivered, or the subscription can no longer deliver anything.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    fn is_live(&self) -> bool {
        !self.is_finished() && !self.is_cancelled()
    }

    /// Move the subscription into `bag`, tying its lifetime to the bag.
    pub fn store_in(self, bag: &SubscriptionBag) {
        bag.store(self);
    }
}

/// Owner-scoped collection of subscriptions.
///
/// Every stored subscription is cancelled by [`cancel_all`](Self::cancel_all)
/// or when the bag is dropped. Finished or cancelled entries are released on
/// the next [`store`](Self::store) or [`len`](Self::len), so a bag fed by
/// short-lived subscriptions does not grow.
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl SubscriptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, subscription: Subscription) {
        let mut subscriptions = self.subscriptions.lock();
        subscriptions.retain(Subscription::is_live);
        subscriptions.push(subscription);
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        let mut subscriptions = self.subscriptions.lock();
        subscriptions.retain(Subscription::is_live);
        subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancel and release every stored subscription.
    pub fn cancel_all(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions.lock());
        if subscriptions.is_empty() {
            return;
        }
        for subscription in &subscriptions {
            subscription.cancel();
        }
        debug!(count = subscriptions.len(), "subscriptions cancelled");
    }
}

impl Drop for SubscriptionBag {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
