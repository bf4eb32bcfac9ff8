// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{CancellationToken, RivuletTask};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;

#[test]
fn test_cancel_is_idempotent_and_shared_between_clones() {
    // Arrange
    let token = CancellationToken::new();
    let clone = token.clone();

    // Act
    token.cancel();
    token.cancel();
    clone.cancel();

    // Assert
    assert!(token.is_cancelled());
    assert!(clone.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_resolves_immediately_when_already_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    timeout(Duration::from_millis(100), token.cancelled())
        .await
        .expect("cancelled() should resolve");
}

#[tokio::test]
async fn test_cancelled_wakes_waiting_task() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let waiter = token.clone();
    let (done_tx, done_rx) = oneshot::channel();

    tokio::spawn(async move {
        waiter.cancelled().await;
        let _ = done_tx.send(());
    });

    // Act
    tokio::task::yield_now().await;
    token.cancel();

    // Assert
    timeout(Duration::from_millis(500), done_rx).await??;
    Ok(())
}

#[tokio::test]
async fn test_task_is_cancelled_on_drop() -> anyhow::Result<()> {
    // Arrange
    let stopped = Arc::new(AtomicBool::new(false));
    let (done_tx, done_rx) = oneshot::channel();

    let task = {
        let stopped = Arc::clone(&stopped);
        RivuletTask::spawn(|cancel| async move {
            cancel.cancelled().await;
            stopped.store(true, Ordering::SeqCst);
            let _ = done_tx.send(());
        })
    };
    let token = task.token();

    // Act
    drop(task);

    // Assert
    timeout(Duration::from_millis(500), done_rx).await??;
    assert!(token.is_cancelled());
    assert!(stopped.load(Ordering::SeqCst));
    Ok(())
}

#[tokio::test]
async fn test_task_observes_external_token() {
    let token = CancellationToken::new();
    let task = RivuletTask::spawn_with_token(token.clone(), |_cancel| async {});

    token.cancel();

    assert!(task.is_cancelled());
}
