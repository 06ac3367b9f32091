//! Suggestion aggregation: keywords → [`SuggestionBundle`].
//!
//! # Steps
//!
//! 1. Look up every keyword in the [`Lexicon`] and union its tags, actions,
//!    metrics, and patterns into insertion-ordered sets. Earlier keywords
//!    contribute before later ones.
//! 2. Scan the same keywords for metric-shaped tokens: `45%` adds
//!    `"percentage improvement"`, `200ms` or `30s` adds `"latency"`.
//! 3. Append the field's fixed augmentation (action → actions,
//!    result → metrics), skipping items already present.
//! 4. Truncate each category to its cap.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::field::Field;
use crate::lexicon::Lexicon;
use crate::models::{SuggestionBundle, MAX_ACTIONS, MAX_METRICS, MAX_PATTERNS, MAX_TAGS};

static PERCENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+%$").expect("Invalid percentage regex pattern"));
static MILLIS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+ms$").expect("Invalid millisecond regex pattern"));
static SECONDS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+s$").expect("Invalid second regex pattern"));

const PERCENTAGE_METRIC: &str = "percentage improvement";
const LATENCY_METRIC: &str = "latency";

/// Appended to actions when the user is writing the action field.
pub const ACTION_AUGMENTATION: [&str; 3] = ["created runbook", "added unit tests", "added tracing"];

/// Appended to metrics when the user is writing the result field.
pub const RESULT_AUGMENTATION: [&str; 3] = [
    "reduced p95 latency",
    "increased throughput",
    "reduced error rate",
];

/// Insertion-ordered string set.
#[derive(Debug, Default)]
struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    fn insert(&mut self, item: &str) {
        if self.seen.insert(item.to_string()) {
            self.items.push(item.to_string());
        }
    }

    fn extend<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) {
        for item in items {
            self.insert(item);
        }
    }

    fn into_capped(self, cap: usize) -> Vec<String> {
        let mut items = self.items;
        items.truncate(cap);
        items
    }
}

/// Metric names implied by numeric tokens in `keywords`, in scan order.
pub fn metric_heuristics(keywords: &[String]) -> Vec<&'static str> {
    let mut found = Vec::new();
    for keyword in keywords {
        if PERCENT_PATTERN.is_match(keyword) {
            found.push(PERCENTAGE_METRIC);
        }
        if MILLIS_PATTERN.is_match(keyword) || SECONDS_PATTERN.is_match(keyword) {
            found.push(LATENCY_METRIC);
        }
    }
    found
}

/// Build a capped, duplicate-free bundle for `keywords` typed into `field`.
///
/// `field` is `None` for identifiers outside the known set; those receive no
/// augmentation. Augmentation applies even to an empty keyword list; the
/// service never calls this without keywords.
pub fn aggregate(lexicon: &Lexicon, keywords: &[String], field: Option<Field>) -> SuggestionBundle {
    let mut tags = OrderedSet::default();
    let mut actions = OrderedSet::default();
    let mut metrics = OrderedSet::default();
    let mut patterns = OrderedSet::default();

    for keyword in keywords {
        if let Some(entry) = lexicon.get(keyword) {
            tags.extend(entry.tags.iter().map(String::as_str));
            actions.extend(entry.actions.iter().map(String::as_str));
            metrics.extend(entry.metrics.iter().map(String::as_str));
            patterns.extend(entry.patterns.iter().map(String::as_str));
        }
    }

    metrics.extend(metric_heuristics(keywords));

    match field {
        Some(Field::Action) => actions.extend(ACTION_AUGMENTATION),
        Some(Field::Result) => metrics.extend(RESULT_AUGMENTATION),
        _ => {}
    }

    SuggestionBundle {
        tags: tags.into_capped(MAX_TAGS),
        actions: actions.into_capped(MAX_ACTIONS),
        metrics: metrics.into_capped(MAX_METRICS),
        patterns: patterns.into_capped(MAX_PATTERNS),
    }
}
