// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{RivuletError, StreamItem};

#[test]
fn test_value_and_error_predicates() {
    // Arrange
    let value: StreamItem<i32> = StreamItem::Value(7);
    let error: StreamItem<i32> = StreamItem::Error(RivuletError::stream_error("boom"));

    // Assert
    assert!(value.is_value());
    assert!(!value.is_error());
    assert!(error.is_error());
    assert!(!error.is_value());
}

#[test]
fn test_map_transforms_values_and_keeps_errors() {
    // Arrange
    let value: StreamItem<i32> = StreamItem::Value(2);
    let error: StreamItem<i32> = StreamItem::Error(RivuletError::decode_error("bad"));

    // Act
    let mapped_value = value.map(|v| v * 10);
    let mapped_error = error.map(|v| v * 10);

    // Assert
    assert_eq!(mapped_value, StreamItem::Value(20));
    assert!(matches!(
        mapped_error,
        StreamItem::Error(RivuletError::DecodeError { .. })
    ));
}

#[test]
fn test_and_then_can_turn_value_into_error() {
    // Arrange
    let value: StreamItem<i32> = StreamItem::Value(-1);

    // Act
    let result = value.and_then(|v| {
        if v < 0 {
            StreamItem::Error(RivuletError::stream_error("negative"))
        } else {
            StreamItem::Value(v)
        }
    });

    // Assert
    assert!(result.is_error());
}

#[test]
fn test_errors_are_never_equal() {
    // Arrange
    let a: StreamItem<i32> = StreamItem::Error(RivuletError::stream_error("same"));
    let b: StreamItem<i32> = StreamItem::Error(RivuletError::stream_error("same"));

    // Assert
    assert_ne!(a, b);
}

#[test]
fn test_result_round_trip() {
    // Arrange
    let ok: Result<u8, RivuletError> = Ok(1);
    let err: Result<u8, RivuletError> = Err(RivuletError::bad_server_response(Some(500)));

    // Act
    let ok_item = StreamItem::from(ok);
    let err_item = StreamItem::from(err);

    // Assert
    assert_eq!(ok_item.clone().ok(), Some(1));
    assert!(err_item.clone().ok().is_none());
    assert!(matches!(
        Result::<u8, RivuletError>::from(err_item),
        Err(RivuletError::BadServerResponse { status: Some(500) })
    ));
}

#[test]
#[should_panic(expected = "called `StreamItem::unwrap()` on an `Error` value")]
fn test_unwrap_panics_on_error() {
    let item: StreamItem<i32> = StreamItem::Error(RivuletError::stream_error("boom"));
    item.unwrap();
}
