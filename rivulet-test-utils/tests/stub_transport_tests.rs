// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::RivuletError;
use rivulet_models::Transport;
use rivulet_test_utils::test_data::{posts_json, sample_posts};
use rivulet_test_utils::StubTransport;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

fn url() -> anyhow::Result<Url> {
    Ok(Url::parse("https://posts.example.test/posts")?)
}

#[tokio::test]
async fn test_replies_are_consumed_in_order() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new()
        .respond(200, posts_json(&sample_posts()))
        .respond_without_status(b"{}".to_vec())
        .fail(RivuletError::transport("reset by peer"));

    // Act
    let first = stub.get(&url()?).await?;
    let second = stub.get(&url()?).await?;
    let third = stub.get(&url()?).await;

    // Assert
    assert_eq!(first.status, Some(200));
    assert_eq!(first.body, posts_json(&sample_posts()));
    assert_eq!(second.status, None);
    assert!(matches!(third, Err(RivuletError::Transport { .. })));
    assert_eq!(stub.calls(), 3);

    Ok(())
}

#[tokio::test]
async fn test_exhausted_script_fails_every_request() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new();

    // Act
    let result = stub.get(&url()?).await;

    // Assert
    match result {
        Err(RivuletError::Transport { context }) => {
            assert!(context.contains("no scripted reply"));
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
    assert_eq!(stub.requested_urls(), vec![url()?]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delayed_reply_waits_on_the_clock() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().respond_after(Duration::from_secs(3), 200, Vec::new());
    let started = Instant::now();

    // Act
    let response = stub.get(&url()?).await?;

    // Assert
    assert_eq!(response.status, Some(200));
    assert!(started.elapsed() >= Duration::from_secs(3));

    Ok(())
}

#[tokio::test]
async fn test_clones_share_script_and_log() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().respond(204, Vec::new());
    let clone = stub.clone();

    // Act
    clone.get(&url()?).await?;

    // Assert
    assert_eq!(stub.calls(), 1);
    assert!(stub.get(&url()?).await.is_err());

    Ok(())
}
