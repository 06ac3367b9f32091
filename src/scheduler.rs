//! Per-field debounced suggestion scheduler.
//!
//! Turns a stream of keystrokes on up to four fields into rate-limited calls
//! to a [`SuggestionSource`], merging results into live form state.
//!
//! # Per-field state machine
//!
//! ```text
//!            keystroke                 timer fires (long text)
//!   Idle ───────────────▶ Pending ───────────────────────────▶ InFlight
//!    ▲                    │  ▲ │ keystroke: restart timer          │
//!    │  timer fires       │  └─┘                                   │
//!    │  (short text):     │                                        │
//!    │  clear, no call    │        keystroke: Pending again,       │
//!    └────────────────────┘        the call keeps running ◀────────┤
//!    ▲                                                             │
//!    └──────────── response: merge / failure: discard ─────────────┘
//! ```
//!
//! - A keystroke aborts the field's not-yet-fired timer and starts a new one
//!   (last keystroke wins).
//! - When the timer fires it reads the field's text *at that moment*, so a
//!   burst of typing costs one call carrying the final text.
//! - Text shorter than `min_query_chars` (trimmed) clears the field's
//!   suggestions without a call.
//! - A call that has been issued is never cancelled.
//! - Failures go through [`on_suggestion_failure`], which discards them and
//!   leaves the displayed suggestions untouched.
//! - Each issued call is numbered per field. With `discard_stale_responses`
//!   a response that is not the field's latest call is dropped; without it
//!   every response is applied in arrival order.
//!
//! Fields share nothing but the lock guarding their slots; each field writes
//! only its own slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use star_journal_core::field::Field;
use star_journal_core::models::SuggestionBundle;

use crate::client::{FetchError, SuggestionSource};
use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub debounce: Duration,
    pub min_query_chars: usize,
    pub discard_stale_responses: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(350),
            min_query_chars: 3,
            discard_stale_responses: true,
        }
    }
}

impl From<&ClientConfig> for SchedulerConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_query_chars: config.min_query_chars,
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Idle,
    /// A debounce timer is armed.
    Pending,
    /// At least one call is outstanding and no timer is armed.
    InFlight,
}

/// Displayed suggestions for every field of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSuggestions {
    slots: [SuggestionBundle; 4],
}

impl FormSuggestions {
    pub fn get(&self, field: Field) -> &SuggestionBundle {
        &self.slots[field.index()]
    }

    fn set(&mut self, field: Field, bundle: SuggestionBundle) {
        self.slots[field.index()] = bundle;
    }
}

#[derive(Default)]
struct FieldSlot {
    text: String,
    timer: Option<JoinHandle<()>>,
    /// Bumped on every keystroke; a timer only fires if it still matches.
    keystroke: u64,
    /// Number of the latest call issued (or clear applied) for this field.
    latest_request: u64,
    in_flight: usize,
}

impl FieldSlot {
    fn state(&self) -> FieldState {
        if self.timer.is_some() {
            FieldState::Pending
        } else if self.in_flight > 0 {
            FieldState::InFlight
        } else {
            FieldState::Idle
        }
    }
}

struct Shared<S> {
    source: S,
    config: SchedulerConfig,
    slots: Mutex<[FieldSlot; 4]>,
    suggestions: watch::Sender<FormSuggestions>,
}

impl<S> Shared<S> {
    fn lock(&self) -> MutexGuard<'_, [FieldSlot; 4]> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, field: Field, bundle: SuggestionBundle) {
        self.suggestions.send_modify(|form| form.set(field, bundle));
    }
}

/// Debounced scheduler over a [`SuggestionSource`]. Cheap to clone; clones
/// share state.
///
/// Must be driven from within a tokio runtime.
pub struct SuggestionScheduler<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for SuggestionScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: SuggestionSource> SuggestionScheduler<S> {
    pub fn new(source: S, config: SchedulerConfig) -> Self {
        let (suggestions, _) = watch::channel(FormSuggestions::default());
        Self {
            shared: Arc::new(Shared {
                source,
                config,
                slots: Mutex::new(std::array::from_fn(|_| FieldSlot::default())),
                suggestions,
            }),
        }
    }

    /// Record a keystroke: store the field's new text and restart its
    /// debounce timer.
    pub fn on_input(&self, field: Field, text: impl Into<String>) {
        let mut slots = self.shared.lock();
        let slot = &mut slots[field.index()];
        slot.text = text.into();
        slot.keystroke += 1;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        let shared = self.shared.clone();
        let keystroke = slot.keystroke;
        let delay = self.shared.config.debounce;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(shared, field, keystroke).await;
        }));
    }

    pub fn state(&self, field: Field) -> FieldState {
        self.shared.lock()[field.index()].state()
    }

    /// The field's current text as last reported by [`on_input`](Self::on_input).
    pub fn text(&self, field: Field) -> String {
        self.shared.lock()[field.index()].text.clone()
    }

    /// Suggestions currently displayed for `field`.
    pub fn suggestions(&self, field: Field) -> SuggestionBundle {
        self.shared.suggestions.borrow().get(field).clone()
    }

    /// Watch every change to the displayed suggestions.
    pub fn subscribe(&self) -> watch::Receiver<FormSuggestions> {
        self.shared.suggestions.subscribe()
    }
}

/// Timer expiry for `field`. Does nothing if a newer keystroke replaced the
/// timer that scheduled this call.
async fn fire<S: SuggestionSource>(shared: Arc<Shared<S>>, field: Field, keystroke: u64) {
    let (query, request) = {
        let mut slots = shared.lock();
        let slot = &mut slots[field.index()];
        if slot.keystroke != keystroke {
            return;
        }
        slot.timer = None;
        slot.latest_request += 1;

        if slot.text.trim().chars().count() < shared.config.min_query_chars {
            tracing::trace!(%field, "query too short, clearing suggestions");
            shared.publish(field, SuggestionBundle::empty());
            return;
        }

        slot.in_flight += 1;
        (slot.text.clone(), slot.latest_request)
    };

    tracing::debug!(%field, request, "fetching suggestions");
    let outcome = shared.source.fetch(field, &query).await;

    let mut slots = shared.lock();
    let slot = &mut slots[field.index()];
    slot.in_flight -= 1;

    match outcome {
        Ok(bundle) => {
            if shared.config.discard_stale_responses && request != slot.latest_request {
                tracing::debug!(
                    %field,
                    request,
                    latest = slot.latest_request,
                    "dropping stale suggestion response"
                );
                return;
            }
            shared.publish(field, bundle);
        }
        Err(error) => on_suggestion_failure(field, &error),
    }
}

/// Failure branch: the error is discarded and the field keeps whatever it was
/// showing. The next keystroke is the retry.
pub fn on_suggestion_failure(field: Field, error: &FetchError) {
    tracing::debug!(%field, "discarding failed suggestion fetch: {}", error);
}
