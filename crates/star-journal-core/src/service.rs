//! Request boundary for the suggestion engine.
//!
//! [`SuggestionService`] validates the query, runs extraction then
//! aggregation, and reports any internal defect as an error instead of
//! unwinding into the host. It holds only an `Arc` to the immutable
//! [`Lexicon`], so one instance can be cloned into every request handler.

use anyhow::{anyhow, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::field::Field;
use crate::keywords::extract_keywords;
use crate::lexicon::Lexicon;
use crate::models::SuggestionBundle;
use crate::suggest::aggregate;

#[derive(Debug, Clone)]
pub struct SuggestionService {
    lexicon: Arc<Lexicon>,
}

impl SuggestionService {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Serve a raw request. `field` is the wire identifier (unknown values
    /// get no augmentation); a missing or blank `query` yields an empty
    /// bundle.
    pub fn suggest(&self, field: Option<&str>, query: Option<&str>) -> Result<SuggestionBundle> {
        let field = field.and_then(Field::parse);
        match query {
            Some(q) => self.suggest_for(field, q),
            None => Ok(SuggestionBundle::empty()),
        }
    }

    /// Typed entry point used by in-process callers. Text that yields no
    /// keywords (blank, stop words only, punctuation) gets an empty bundle
    /// for every field.
    pub fn suggest_for(&self, field: Option<Field>, query: &str) -> Result<SuggestionBundle> {
        if query.trim().is_empty() {
            return Ok(SuggestionBundle::empty());
        }

        let lexicon = &self.lexicon;
        guarded(|| {
            let keywords = extract_keywords(query);
            if keywords.is_empty() {
                return SuggestionBundle::empty();
            }
            aggregate(lexicon, &keywords, field)
        })
    }
}

/// Run `f`, turning a panic into an error.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|panic| {
        let detail = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        anyhow!("suggestion pipeline failed: {}", detail)
    })
}
