// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Task spawning with cooperative cancellation.

use crate::CancellationToken;
use std::future::Future;

/// Task handle with automatic cancellation on drop.
///
/// `RivuletTask` spawns a background task on the tokio runtime and hands it a
/// `CancellationToken`. When the handle is dropped or cancelled, the token is
/// signaled and the task is expected to stop at its next checkpoint.
///
/// # Example
///
/// ```rust
/// use rivulet_core::RivuletTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = RivuletTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// task.cancel();
/// assert!(task.is_cancelled());
/// # }
/// ```
#[derive(Debug)]
pub struct RivuletTask {
    cancel: CancellationToken,
}

impl RivuletTask {
    /// Spawn a background task with cancellation support.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn_with_token(CancellationToken::new(), f)
    }

    /// Spawn a background task that observes an existing token.
    pub fn spawn_with_token<F, Fut>(cancel: CancellationToken, f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signal the task to stop.
    ///
    /// Does not wait for the task to finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A clone of the task's cancellation token.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for RivuletTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
