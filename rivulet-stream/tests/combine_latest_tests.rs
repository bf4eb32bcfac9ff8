// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{RivuletError, StreamItem};
use rivulet_stream::prelude::*;
use rivulet_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream,
};

#[tokio::test]
async fn test_combine_latest_waits_for_both_sides() -> anyhow::Result<()> {
    // Arrange
    let (valid_tx, valid) = test_channel::<bool>();
    let (count_tx, count) = test_channel::<u64>();
    let mut combined = valid.combine_latest(count);

    // Act & Assert
    valid_tx.send(false)?;
    valid_tx.send(true)?;
    assert_no_element_emitted(&mut combined, 10).await;

    count_tx.send(1)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value((true, 1))
    );

    Ok(())
}

#[tokio::test]
async fn test_combine_latest_pairs_with_latest_of_other_side() -> anyhow::Result<()> {
    // Arrange
    let (valid_tx, valid) = test_channel::<bool>();
    let (count_tx, count) = test_channel::<u64>();
    let mut combined = valid.combine_latest(count);

    valid_tx.send(true)?;
    count_tx.send(8)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value((true, 8))
    );

    // Act & Assert
    count_tx.send(9)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value((true, 9))
    );

    valid_tx.send(false)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value((false, 9))
    );

    count_tx.send(10)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value((false, 10))
    );
    assert_no_element_emitted(&mut combined, 10).await;

    Ok(())
}

#[tokio::test]
async fn test_combine_latest_feeds_gate_expression() -> anyhow::Result<()> {
    // Arrange
    let (valid_tx, valid) = test_channel::<bool>();
    let (count_tx, count) = test_channel::<u64>();
    let mut gate = valid
        .combine_latest(count)
        .map_value(|(valid, count)| valid && count >= 10);

    // Act & Assert
    valid_tx.send(true)?;
    count_tx.send(9)?;
    assert_eq!(unwrap_stream(&mut gate, 500).await, StreamItem::Value(false));

    count_tx.send(10)?;
    assert_eq!(unwrap_stream(&mut gate, 500).await, StreamItem::Value(true));

    valid_tx.send(false)?;
    assert_eq!(unwrap_stream(&mut gate, 500).await, StreamItem::Value(false));

    Ok(())
}

#[tokio::test]
async fn test_combine_latest_forwards_errors_without_touching_state() -> anyhow::Result<()> {
    // Arrange
    let (left_tx, left) = test_channel_with_errors::<&'static str>();
    let (right_tx, right) = test_channel::<u32>();
    let mut combined = left.combine_latest(right);

    left_tx.send(StreamItem::Value("a"))?;
    right_tx.send(1)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value(("a", 1))
    );

    // Act
    left_tx.send(StreamItem::Error(RivuletError::stream_error("glitch")))?;

    // Assert
    assert!(unwrap_stream(&mut combined, 500).await.is_error());

    right_tx.send(2)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value(("a", 2))
    );

    Ok(())
}

#[tokio::test]
async fn test_combine_latest_continues_after_one_side_completes() -> anyhow::Result<()> {
    // Arrange
    let (left_tx, left) = test_channel::<char>();
    let (right_tx, right) = test_channel::<u32>();
    let mut combined = left.combine_latest(right);

    left_tx.send('x')?;
    right_tx.send(1)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value(('x', 1))
    );

    // Act
    drop(left_tx);
    right_tx.send(2)?;

    // Assert
    assert_eq!(
        unwrap_stream(&mut combined, 500).await,
        StreamItem::Value(('x', 2))
    );

    drop(right_tx);
    assert_stream_ended(&mut combined, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_combine_latest_ends_when_silent_side_completes() -> anyhow::Result<()> {
    // Arrange
    let (left_tx, left) = test_channel::<char>();
    let (right_tx, right) = test_channel::<u32>();
    let mut combined = left.combine_latest(right);

    // Act
    right_tx.send(1)?;
    drop(left_tx);

    // Assert
    assert_stream_ended(&mut combined, 500).await;
    drop(right_tx);

    Ok(())
}
