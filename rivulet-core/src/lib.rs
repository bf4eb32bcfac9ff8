// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every rivulet crate.
//!
//! - [`StreamItem`] is the element type of every rivulet stream: a value or a
//!   terminal [`RivuletError`]. Graceful completion is the end of the stream.
//! - [`CancellationToken`] and [`RivuletTask`] provide cooperative cancellation
//!   for spawned pipeline work.
//! - [`Published`] is an observable state cell: it holds the last published
//!   value and broadcasts every change to its subscribers; [`Observed`] is
//!   its read-only view.
//! - [`PublishContext`] serializes all externally observed state mutations on
//!   a single task.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod cancellation_token;
pub mod publish_context;
pub mod published;
pub mod rivulet_error;
pub mod rivulet_task;
pub mod stream_item;

pub use self::cancellation_token::CancellationToken;
pub use self::publish_context::PublishContext;
pub use self::published::{Observed, Published};
pub use self::rivulet_error::{Result, RivuletError};
pub use self::rivulet_task::RivuletTask;
pub use self::stream_item::StreamItem;
