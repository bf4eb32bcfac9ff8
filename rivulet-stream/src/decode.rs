// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! JSON payload decoding.

use crate::try_map_value::TryMapValue;
use futures::Stream;
use rivulet_core::{Result, RivuletError, StreamItem};
use serde::de::DeserializeOwned;

/// Stream returned by [`DecodeExt::decode`].
pub type Decode<S, B, D> = TryMapValue<S, fn(B) -> Result<D>>;

/// Extension trait providing the `decode` operator.
pub trait DecodeExt<B>: Stream<Item = StreamItem<B>> + Sized
where
    B: AsRef<[u8]>,
{
    /// Parses each byte payload as JSON into `D`.
    ///
    /// A payload that is not valid JSON, or does not match the shape of `D`,
    /// yields `RivuletError::DecodeError` and ends the stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet_core::StreamItem;
    /// use rivulet_stream::DecodeExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let payloads = stream::iter(vec![StreamItem::Value(b"[1, 2, 3]".to_vec())]);
    /// let mut decoded = payloads.decode::<Vec<u32>>();
    /// assert_eq!(decoded.next().await, Some(StreamItem::Value(vec![1, 2, 3])));
    /// # }
    /// ```
    fn decode<D>(self) -> Decode<Self, B, D>
    where
        D: DeserializeOwned;
}

impl<S, B> DecodeExt<B> for S
where
    S: Stream<Item = StreamItem<B>>,
    B: AsRef<[u8]>,
{
    fn decode<D>(self) -> Decode<Self, B, D>
    where
        D: DeserializeOwned,
    {
        TryMapValue::new(self, decode_payload::<B, D> as fn(B) -> Result<D>)
    }
}

fn decode_payload<B, D>(payload: B) -> Result<D>
where
    B: AsRef<[u8]>,
    D: DeserializeOwned,
{
    serde_json::from_slice(payload.as_ref()).map_err(|error| {
        RivuletError::decode_error(format!(
            "{} ({})",
            error,
            core::any::type_name::<D>()
        ))
    })
}
