//! # STAR Journal
//!
//! An engineering journal that structures entries as Situation, Task,
//! Action, Result, and offers contextual writing suggestions while the user
//! types.
//!
//! ## Architecture
//!
//! ```text
//!  keystroke ──▶ ┌───────────┐  GET /suggestions  ┌──────────┐
//!                │ Scheduler │ ─────────────────▶ │  Server  │
//!  form state ◀─ │ (debounce)│ ◀───────────────── │  (axum)  │
//!                └───────────┘   SuggestionBundle └────┬─────┘
//!                                                      ▼
//!                                    Extractor ─▶ Aggregator ◀─ Lexicon
//!                                         (star-journal-core)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! starj serve                                   # start the HTTP API
//! starj suggest --field action "tuned redis"    # one-shot via the API
//! starj suggest --local --field result "200ms"  # one-shot, in-process
//! starj compose --local < keystrokes.txt        # replay typing through the scheduler
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`lexicon`] | Lexicon file loading |
//! | [`server`] | HTTP API |
//! | [`client`] | HTTP and in-process suggestion sources |
//! | [`scheduler`] | Per-field debounced suggestion scheduling |
//! | [`draft`] | Entry draft editing helpers |

pub mod client;
pub mod config;
pub mod draft;
pub mod lexicon;
pub mod scheduler;
pub mod server;

