//! Keyword lexicon: static mapping from a normalised keyword to the tags,
//! actions, metrics, and patterns it suggests.
//!
//! A [`Lexicon`] is built once at start-up (either [`Lexicon::builtin`] or
//! from entries loaded by the application) and then only read. It is shared
//! behind an `Arc` and needs no synchronisation.

use serde::Deserialize;
use std::collections::HashMap;

/// Suggestion fragment contributed by one keyword. Each list keeps the order
/// it was declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LexiconEntry {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Read-only keyword table.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    /// Build a lexicon from `(keyword, entry)` pairs. Keywords are trimmed and
    /// lowercased so they match extracted keywords; a later duplicate key
    /// replaces the earlier entry.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, LexiconEntry)>,
        K: AsRef<str>,
    {
        let mut lexicon = Self::default();
        lexicon.extend(entries);
        lexicon
    }

    /// Merge entries on top of this lexicon, replacing matching keys.
    pub fn extend<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, LexiconEntry)>,
        K: AsRef<str>,
    {
        for (key, entry) in entries {
            let key = key.as_ref().trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            self.entries.insert(key, entry);
        }
    }

    /// The lexicon shipped with the application, tuned for engineering
    /// narratives.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|raw| {
            (
                raw.keyword,
                LexiconEntry {
                    tags: to_owned(raw.tags),
                    actions: to_owned(raw.actions),
                    metrics: to_owned(raw.metrics),
                    patterns: to_owned(raw.patterns),
                },
            )
        }))
    }

    pub fn get(&self, keyword: &str) -> Option<&LexiconEntry> {
        self.entries.get(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the lexicon, yielding its entries in no particular order.
    pub fn into_entries(self) -> impl Iterator<Item = (String, LexiconEntry)> {
        self.entries.into_iter()
    }

    /// All keywords, sorted.
    pub fn keywords(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct RawEntry {
    keyword: &'static str,
    tags: &'static [&'static str],
    actions: &'static [&'static str],
    metrics: &'static [&'static str],
    patterns: &'static [&'static str],
}

const BUILTIN: &[RawEntry] = &[
    RawEntry {
        keyword: "react",
        tags: &["react", "frontend", "hooks"],
        actions: &["refactored components", "optimized rendering", "migrated class to hooks"],
        metrics: &["reduced re-renders", "bundle size reduction"],
        patterns: &["memoization", "code-splitting"],
    },
    RawEntry {
        keyword: "node",
        tags: &["nodejs", "backend"],
        actions: &["optimized event loop", "improved async handling"],
        metrics: &["reduced memory usage", "increased throughput"],
        patterns: &["worker threads", "queueing"],
    },
    RawEntry {
        keyword: "express",
        tags: &["express", "api"],
        actions: &["added middleware", "improved request validation"],
        metrics: &["reduced response time"],
        patterns: &["rate limiting", "structured logging"],
    },
    RawEntry {
        keyword: "mongodb",
        tags: &["mongodb", "database"],
        actions: &["added indexes", "optimized queries"],
        metrics: &["reduced query latency", "lower CPU usage"],
        patterns: &["indexing strategy", "aggregation pipeline"],
    },
    RawEntry {
        keyword: "redis",
        tags: &["redis", "caching"],
        actions: &["implemented caching", "set TTL policy"],
        metrics: &["cache hit ratio", "reduced DB load"],
        patterns: &["write-through cache", "pub/sub"],
    },
    RawEntry {
        keyword: "websocket",
        tags: &["websocket", "realtime"],
        actions: &["implemented socket rooms", "handled reconnection"],
        metrics: &["message delivery latency"],
        patterns: &["backoff retry", "presence tracking"],
    },
    RawEntry {
        keyword: "docker",
        tags: &["docker", "containers"],
        actions: &["created multi-stage build", "reduced image size"],
        metrics: &["faster deployments"],
        patterns: &["health checks", "entrypoint scripts"],
    },
    RawEntry {
        keyword: "kubernetes",
        tags: &["kubernetes", "orchestration"],
        actions: &["configured liveness/readiness probes", "set resource limits"],
        metrics: &["reduced pod restarts"],
        patterns: &["hpa", "rolling updates"],
    },
    RawEntry {
        keyword: "testing",
        tags: &["testing", "ci/cd"],
        actions: &["added unit tests", "added integration tests"],
        metrics: &["increased coverage", "reduced regressions"],
        patterns: &["test pyramid", "snapshot testing"],
    },
    RawEntry {
        keyword: "performance",
        tags: &["performance", "optimization"],
        actions: &["profiled hotspots", "eliminated bottlenecks"],
        metrics: &["p95 latency", "throughput", "cpu usage"],
        patterns: &["lazy loading", "debouncing", "batching"],
    },
    RawEntry {
        keyword: "security",
        tags: &["security"],
        actions: &["implemented input validation", "added authz checks"],
        metrics: &["reduced vulnerabilities"],
        patterns: &["content security policy", "principle of least privilege"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_all_keywords() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.len(), 11);
        assert_eq!(
            lexicon.keywords(),
            vec![
                "docker",
                "express",
                "kubernetes",
                "mongodb",
                "node",
                "performance",
                "react",
                "redis",
                "security",
                "testing",
                "websocket"
            ]
        );
    }

    #[test]
    fn test_builtin_entry_order_preserved() {
        let lexicon = Lexicon::builtin();
        let perf = lexicon.get("performance").unwrap();
        assert_eq!(perf.metrics, vec!["p95 latency", "throughput", "cpu usage"]);
        assert_eq!(perf.patterns, vec!["lazy loading", "debouncing", "batching"]);
    }

    #[test]
    fn test_from_entries_normalizes_keys() {
        let lexicon = Lexicon::from_entries([(
            "  Rust ",
            LexiconEntry {
                tags: vec!["rust".into()],
                ..Default::default()
            },
        )]);
        assert!(lexicon.get("rust").is_some());
        assert!(lexicon.get("Rust").is_none());
    }

    #[test]
    fn test_extend_replaces_existing_key() {
        let mut lexicon = Lexicon::builtin();
        lexicon.extend([(
            "redis",
            LexiconEntry {
                tags: vec!["kv-store".into()],
                ..Default::default()
            },
        )]);
        assert_eq!(lexicon.len(), 11);
        assert_eq!(lexicon.get("redis").unwrap().tags, vec!["kv-store"]);
        assert!(lexicon.get("redis").unwrap().actions.is_empty());
    }

    #[test]
    fn test_blank_keys_skipped() {
        let lexicon = Lexicon::from_entries([("   ", LexiconEntry::default())]);
        assert!(lexicon.is_empty());
    }

    #[test]
    fn test_entry_deserialize_defaults() {
        let entry: LexiconEntry = serde_json::from_str(r#"{"tags":["go"]}"#).unwrap();
        assert_eq!(entry.tags, vec!["go"]);
        assert!(entry.metrics.is_empty());
    }
}
