// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The single serialized context on which observed state is mutated.
//!
//! Producers may run on any tokio worker, but every delivery that mutates
//! state read by the outside world is queued onto a [`PublishContext`]. The
//! context drains its queue on one task, in FIFO order, so no two deliveries
//! ever run concurrently.
//!
//! # Example
//!
//! ```
//! use rivulet_core::{PublishContext, Published};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let context = PublishContext::new("main");
//! let count = Published::new(0_u64);
//!
//! let cell = count.clone();
//! context.dispatch(move || cell.update(|c| *c += 1)).unwrap();
//! context.flush().await.unwrap();
//!
//! assert_eq!(count.get(), 1);
//! # }
//! ```

use crate::{Result, RivuletError};
use futures::channel::{mpsc, oneshot};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a serialized delivery queue.
///
/// Cheap to clone; all clones feed the same queue. The draining task stops
/// once every handle has been dropped and the queue is empty.
#[derive(Clone, Debug)]
pub struct PublishContext {
    name: Arc<str>,
    jobs: mpsc::UnboundedSender<Job>,
}

impl PublishContext {
    /// Create a context and spawn its draining task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(name: impl Into<String>) -> Self {
        let name: Arc<str> = Arc::from(name.into());
        let (jobs, mut queue) = mpsc::unbounded::<Job>();

        let task_name = Arc::clone(&name);
        tokio::spawn(async move {
            debug!(context = %task_name, "publish context started");
            while let Some(job) = queue.next().await {
                job();
            }
            debug!(context = %task_name, "publish context stopped");
        });

        Self { name, jobs }
    }

    /// Name given at construction, used in log events.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a job for execution on the context.
    ///
    /// # Errors
    ///
    /// Returns `RivuletError::StreamProcessingError` if the draining task is
    /// gone (the runtime is shutting down).
    pub fn dispatch<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.jobs.unbounded_send(Box::new(job)).map_err(|_| {
            warn!(context = %self.name, "publish job dropped: context closed");
            RivuletError::stream_error(format!("publish context '{}' is closed", self.name))
        })
    }

    /// Wait until every job queued before this call has run.
    ///
    /// # Errors
    ///
    /// Returns `RivuletError::StreamProcessingError` if the context is closed.
    pub async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.dispatch(move || {
            let _ = done_tx.send(());
        })?;
        done_rx.await.map_err(|_| {
            RivuletError::stream_error(format!("publish context '{}' is closed", self.name))
        })
    }
}
