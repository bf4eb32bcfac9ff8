// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based operators with a pluggable clock.
//!
//! # Overview
//!
//! - **[`Timer`]** - clock abstraction (`now` + `sleep_future`)
//! - **[`TokioTimer`]** - tokio clock; honours `tokio::time::pause` in tests
//! - **[`DebounceExt`]** - `.debounce(duration, timer)`, trailing debounce
//! - **[`ticks`]** - source emitting `1, 2, 3, …` once per period
//!
//! # Example
//!
//! ```rust
//! use rivulet_stream_time::{ticks, TokioTimer};
//! use rivulet_core::StreamItem;
//! use futures::StreamExt;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut count = Box::pin(ticks(Duration::from_millis(10), TokioTimer));
//! assert_eq!(count.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(count.next().await, Some(StreamItem::Value(2)));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod debounce;
pub mod prelude;
pub mod ticks;
pub mod timer;
pub mod tokio_timer;

pub use debounce::{Debounce, DebounceExt};
pub use ticks::{ticks, Ticks};
pub use timer::Timer;
pub use tokio_timer::TokioTimer;
