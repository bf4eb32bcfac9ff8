// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Settings for [`PostsModel`](crate::PostsModel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Location of the JSON list; parsed when the model is built.
    pub url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_POSTS_URL.to_string(),
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Settings for [`FormModel`](crate::FormModel).
///
/// ```
/// use rivulet_models::FormConfig;
/// use std::time::Duration;
///
/// let config = FormConfig::default().with_gate_threshold(3);
/// assert_eq!(config.tick_interval, Duration::from_secs(1));
/// assert_eq!(config.debounce, Duration::from_millis(500));
/// assert_eq!(config.gate_threshold, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    /// Period of the counter.
    pub tick_interval: Duration,
    /// Quiet time required before text is validated.
    pub debounce: Duration,
    /// Text is valid when it has strictly more characters than this.
    pub min_text_len: usize,
    /// Count the counter must reach before submit can be enabled.
    pub gate_threshold: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            debounce: Duration::from_millis(500),
            min_text_len: 3,
            gate_threshold: 10,
        }
    }
}

impl FormConfig {
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_min_text_len(mut self, min_text_len: usize) -> Self {
        self.min_text_len = min_text_len;
        self
    }

    #[must_use]
    pub fn with_gate_threshold(mut self, gate_threshold: u64) -> Self {
        self.gate_threshold = gate_threshold;
        self
    }
}
