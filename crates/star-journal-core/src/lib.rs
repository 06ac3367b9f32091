//! # STAR Journal Core
//!
//! Pure logic behind the contextual suggestion engine: field identifiers,
//! the keyword lexicon, keyword extraction, suggestion aggregation, and the
//! request-level service that ties them together.
//!
//! This crate performs no I/O. It contains no tokio, HTTP, or filesystem
//! dependencies, so every operation is deterministic and safe to call from
//! any number of threads at once.
//!
//! ```rust
//! use std::sync::Arc;
//! use star_journal_core::field::Field;
//! use star_journal_core::lexicon::Lexicon;
//! use star_journal_core::service::SuggestionService;
//!
//! let service = SuggestionService::new(Arc::new(Lexicon::builtin()));
//! let bundle = service
//!     .suggest(Some("action"), Some("moved sessions into redis"))
//!     .unwrap();
//! assert!(bundle.tags.contains(&"caching".to_string()));
//! assert_eq!(Field::parse("action"), Some(Field::Action));
//! ```

pub mod field;
pub mod keywords;
pub mod lexicon;
pub mod models;
pub mod prompts;
pub mod service;
pub mod suggest;
