// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::FormConfig;
use rivulet_core::{Observed, PublishContext, Published, Result};
use rivulet_exec::{SubscribeExt, SubscriptionBag};
use rivulet_stream::{CombineLatestExt, MapValueExt};
use rivulet_stream_time::{ticks, DebounceExt, Timer, TokioTimer};
use tracing::debug;

/// Icon shown next to the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityIcon {
    /// Empty text that is not (or no longer) valid.
    Hidden,
    Cross,
    Check,
}

/// View-model with three pipelines started at construction:
///
/// 1. a counter incremented once per `tick_interval`
/// 2. text validity: `text` debounced, then `chars > min_text_len`
/// 3. submit gate: combine-latest of validity and count,
///    `valid && count >= gate_threshold`
///
/// All of them stop on [`shutdown`](Self::shutdown) or when the model is
/// dropped.
///
/// ```
/// use rivulet_core::PublishContext;
/// use rivulet_models::{FormConfig, FormModel};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let form = FormModel::new(FormConfig::default(), PublishContext::new("main"));
/// form.set_text("rust").unwrap();
///
/// tokio::time::sleep(Duration::from_millis(10_010)).await;
/// assert_eq!(form.count_label(), "10");
/// assert!(form.submit_enabled());
/// # }
/// ```
pub struct FormModel {
    count: Published<u64>,
    text: Published<String>,
    text_is_valid: Published<bool>,
    show_button: Published<bool>,
    config: FormConfig,
    context: PublishContext,
    subscriptions: SubscriptionBag,
}

impl FormModel {
    /// Must be called from within a tokio runtime.
    pub fn new(config: FormConfig, context: PublishContext) -> Self {
        Self::with_timer(config, context, TokioTimer)
    }

    /// Like [`new`](Self::new) with a custom clock for the counter and the
    /// debounce.
    pub fn with_timer<TM: Timer>(config: FormConfig, context: PublishContext, timer: TM) -> Self {
        let model = Self {
            count: Published::new(0),
            text: Published::new(String::new()),
            text_is_valid: Published::new(false),
            show_button: Published::new(false),
            config,
            context,
            subscriptions: SubscriptionBag::new(),
        };

        model.start_counter(timer.clone());
        model.start_validation(timer);
        model.start_gate();
        debug!(context = %model.context.name(), "form pipelines started");

        model
    }

    fn start_counter<TM: Timer>(&self, timer: TM) {
        let count = self.count.clone();
        ticks(self.config.tick_interval, timer)
            .subscribe_values(&self.context, move |tick| {
                debug!(tick, "tick");
                count.set(tick);
            })
            .store_in(&self.subscriptions);
    }

    fn start_validation<TM: Timer>(&self, timer: TM) {
        let min_text_len = self.config.min_text_len;
        let text_is_valid = self.text_is_valid.clone();
        self.text
            .changes()
            .debounce(self.config.debounce, timer)
            .map_value(move |text| text.chars().count() > min_text_len)
            .subscribe_values(&self.context, move |valid| text_is_valid.set(valid))
            .store_in(&self.subscriptions);
    }

    fn start_gate(&self) {
        let gate_threshold = self.config.gate_threshold;
        let show_button = self.show_button.clone();
        self.text_is_valid
            .changes()
            .combine_latest(self.count.changes())
            .map_value(move |(valid, count)| valid && count >= gate_threshold)
            .subscribe_values(&self.context, move |enabled| show_button.set(enabled))
            .store_in(&self.subscriptions);
    }

    /// Record a keystroke. The text cell is updated on the publish context.
    ///
    /// # Errors
    ///
    /// `RivuletError::StreamProcessingError` if the publish context is closed.
    pub fn set_text(&self, text: impl Into<String>) -> Result<()> {
        let cell = self.text.clone();
        let text = text.into();
        self.context.dispatch(move || cell.set(text))
    }

    pub fn count(&self) -> Observed<u64> {
        self.count.observe()
    }

    pub fn text(&self) -> Observed<String> {
        self.text.observe()
    }

    pub fn text_is_valid(&self) -> Observed<bool> {
        self.text_is_valid.observe()
    }

    pub fn show_button(&self) -> Observed<bool> {
        self.show_button.observe()
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn count_label(&self) -> String {
        self.count.get().to_string()
    }

    /// Check while the last debounced validity holds, even if the text has
    /// since been cleared. Otherwise a cross for non-empty text.
    pub fn validity_icon(&self) -> ValidityIcon {
        if self.text_is_valid.get() {
            ValidityIcon::Check
        } else if self.text.with(String::is_empty) {
            ValidityIcon::Hidden
        } else {
            ValidityIcon::Cross
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.show_button.get()
    }

    /// `false` once [`shutdown`](Self::shutdown) has run.
    pub fn is_running(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Stop all three pipelines. Idempotent.
    pub fn shutdown(&self) {
        self.subscriptions.cancel_all();
    }
}

impl Drop for FormModel {
    fn drop(&mut self) {
        self.shutdown();
        debug!(context = %self.context.name(), "form pipelines stopped");
    }
}
