// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{PublishContext, RivuletError, StreamItem};
use rivulet_models::{FetchCompletion, FetchConfig, PostsModel};
use rivulet_test_utils::test_data::{
    malformed_json, post_first, post_third, posts_json, sample_posts, wrong_shape_json,
};
use rivulet_test_utils::StubTransport;
use std::time::Duration;
use tokio::time::timeout;

const URL: &str = "https://posts.example.test/posts";

fn model_with(stub: &StubTransport) -> anyhow::Result<PostsModel> {
    let config = FetchConfig::default().with_url(URL);
    Ok(PostsModel::with_transport(
        config,
        PublishContext::new("posts"),
        stub.clone(),
    )?)
}

/// Issues one fetch and waits for the outcome it publishes.
async fn fetch_and_wait(model: &PostsModel) -> anyhow::Result<FetchCompletion> {
    let mut changes = model.completion().changes();
    // skip the replayed outcome of any earlier fetch
    let _ = changes.next().await;
    model.fetch();
    let outcome = timeout(Duration::from_secs(1), async move {
        while let Some(item) = changes.next().await {
            if let StreamItem::Value(Some(completion)) = item {
                return Some(completion);
            }
        }
        None
    })
    .await?;
    outcome.ok_or_else(|| anyhow::anyhow!("completion cell closed"))
}

#[tokio::test]
async fn test_fetch_publishes_posts_in_server_order() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().respond(200, posts_json(&sample_posts()));
    let model = model_with(&stub)?;
    let mut published = model.posts().changes();

    // Act
    let completion = fetch_and_wait(&model).await?;

    // Assert
    assert!(completion.is_finished());
    assert_eq!(model.posts().get(), sample_posts());
    assert_eq!(stub.calls(), 1);
    assert_eq!(stub.requested_urls()[0].as_str(), URL);

    // replayed empty list, then exactly one publish
    assert_eq!(published.next().await, Some(StreamItem::Value(Vec::new())));
    assert_eq!(published.next().await, Some(StreamItem::Value(sample_posts())));

    Ok(())
}

#[tokio::test]
async fn test_fetch_accepts_any_2xx_status() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().respond(299, posts_json(&[post_first()]));
    let model = model_with(&stub)?;

    // Act
    let completion = fetch_and_wait(&model).await?;

    // Assert
    assert!(completion.is_finished());
    assert_eq!(model.posts().get(), vec![post_first()]);

    Ok(())
}

#[tokio::test]
async fn test_fetch_non_success_status_leaves_posts_untouched() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new()
        .respond(200, posts_json(&[post_third()]))
        .respond(404, posts_json(&sample_posts()));
    let model = model_with(&stub)?;
    assert!(fetch_and_wait(&model).await?.is_finished());

    // Act
    let completion = fetch_and_wait(&model).await?;

    // Assert
    assert!(matches!(
        completion.error(),
        Some(RivuletError::BadServerResponse { status: Some(404) })
    ));
    assert_eq!(model.posts().get(), vec![post_third()]);

    Ok(())
}

#[tokio::test]
async fn test_fetch_status_just_outside_range_is_rejected() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new()
        .respond(199, posts_json(&sample_posts()))
        .respond(300, posts_json(&sample_posts()));
    let model = model_with(&stub)?;

    for expected in [199, 300] {
        // Act
        let completion = fetch_and_wait(&model).await?;

        // Assert
        assert!(matches!(
            completion.error(),
            Some(RivuletError::BadServerResponse { status: Some(s) }) if *s == expected
        ));
    }
    assert!(model.posts().get().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_fetch_without_response_metadata_is_bad_response() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().respond_without_status(posts_json(&sample_posts()));
    let model = model_with(&stub)?;

    // Act
    let completion = fetch_and_wait(&model).await?;

    // Assert
    assert!(matches!(
        completion.error(),
        Some(RivuletError::BadServerResponse { status: None })
    ));
    assert!(model.posts().get().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_fetch_malformed_json_is_decode_error() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new()
        .respond(200, malformed_json())
        .respond(200, wrong_shape_json());
    let model = model_with(&stub)?;

    for _ in 0..2 {
        // Act
        let completion = fetch_and_wait(&model).await?;

        // Assert
        assert!(matches!(
            completion.error(),
            Some(RivuletError::DecodeError { .. })
        ));
    }
    assert!(model.posts().get().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_fetch_transport_failure_is_reported() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().fail(RivuletError::transport("connection refused"));
    let model = model_with(&stub)?;

    // Act
    let completion = fetch_and_wait(&model).await?;

    // Assert
    let error = completion.error().cloned();
    assert!(matches!(error, Some(RivuletError::Transport { .. })));
    assert!(error.is_some_and(|e| e.is_recoverable()));

    Ok(())
}

#[tokio::test]
async fn test_each_fetch_issues_one_request_and_replaces_list() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new()
        .respond(200, posts_json(&sample_posts()))
        .respond(200, posts_json(&[post_third()]));
    let model = model_with(&stub)?;

    // Act
    fetch_and_wait(&model).await?;
    fetch_and_wait(&model).await?;

    // Assert
    assert_eq!(stub.calls(), 2);
    assert_eq!(model.posts().get(), vec![post_third()]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_late_response_publishes_nothing() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().respond_after(
        Duration::from_secs(5),
        200,
        posts_json(&sample_posts()),
    );
    let model = model_with(&stub)?;
    model.fetch();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Act
    model.cancel();
    tokio::time::sleep(Duration::from_secs(10)).await;

    // Assert
    assert_eq!(stub.calls(), 1);
    assert!(model.posts().get().is_empty());
    assert!(model.completion().get().is_none());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dropping_model_cancels_in_flight_fetch() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new().respond_after(
        Duration::from_secs(5),
        200,
        posts_json(&sample_posts()),
    );
    let model = model_with(&stub)?;
    let posts = model.posts();
    model.fetch();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Act
    drop(model);
    tokio::time::sleep(Duration::from_secs(10)).await;

    // Assert
    assert!(posts.get().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_invalid_url_is_rejected_at_construction() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new();

    for bad in ["not a url", "ftp://posts.example.test/posts"] {
        // Act
        let result = PostsModel::with_transport(
            FetchConfig::default().with_url(bad),
            PublishContext::new("posts"),
            stub.clone(),
        );

        // Assert
        match result {
            Err(RivuletError::InvalidUrl { url, .. }) => assert_eq!(url, bad),
            Err(other) => panic!("expected InvalidUrl, got {other:?}"),
            Ok(_) => panic!("expected InvalidUrl for {bad}"),
        }
    }
    assert_eq!(stub.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_default_config_targets_jsonplaceholder() -> anyhow::Result<()> {
    // Arrange
    let stub = StubTransport::new();

    // Act
    let model = PostsModel::with_transport(
        FetchConfig::default(),
        PublishContext::new("posts"),
        stub,
    )?;

    // Assert
    assert_eq!(
        model.url().as_str(),
        "https://jsonplaceholder.typicode.com/posts"
    );
    assert!(model.completion().get().is_none());

    Ok(())
}

#[tokio::test]
async fn test_repeated_fetches_do_not_accumulate() -> anyhow::Result<()> {
    // Arrange
    let mut stub = StubTransport::new();
    for _ in 0..20 {
        stub = stub.respond(200, posts_json(&[post_first()]));
    }
    let model = model_with(&stub)?;

    // Act
    for _ in 0..20 {
        assert!(fetch_and_wait(&model).await?.is_finished());
        assert_eq!(model.pending_fetches(), 0);
    }

    // Assert
    assert_eq!(stub.calls(), 20);
    assert_eq!(model.posts().get(), vec![post_first()]);

    Ok(())
}
