//! Keyword extraction from free text.
//!
//! # Algorithm
//!
//! 1. Lowercase the input.
//! 2. Replace every character outside `[a-z0-9+#.%\-]` with a space, so
//!    tokens like `c++`, `node.js`, `30ms` and `45%` survive while
//!    `ci/cd` splits into `ci` and `cd`.
//! 3. Split on runs of whitespace.
//! 4. Drop stop words.
//! 5. Drop tokens of two characters or fewer unless allow-listed (`go`, `c`, `ai`).
//! 6. Deduplicate, keeping the first occurrence.
//! 7. Keep at most [`MAX_KEYWORDS`].
//!
//! ```rust
//! use star_journal_core::keywords::extract_keywords;
//!
//! let kws = extract_keywords("Ported the Go worker to C++ and cut p99 to 30ms");
//! assert_eq!(kws, vec!["ported", "go", "worker", "c++", "cut", "p99", "30ms"]);
//! ```

use std::collections::HashSet;

/// Upper bound on keywords returned by [`extract_keywords`].
pub const MAX_KEYWORDS: usize = 20;

/// Function words common in engineering write-ups that never carry a signal.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "with", "by", "is", "it", "as",
    "at", "from", "this", "that", "these", "those", "be", "are", "was", "were", "am", "i", "we",
    "you", "they", "he", "she", "my", "our", "their", "your", "its", "into", "over", "under",
    "about", "after", "before", "during", "then", "than", "also", "etc", "via", "per", "vs", "not",
    "no", "yes", "if", "but",
];

/// Short technical names that must survive the length filter.
const SHORT_ALLOW: &[&str] = &["go", "c", "ai"];

/// Returns true for a character kept by the normaliser (after lowercasing).
fn is_token_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '+' | '#' | '.' | '-' | '%')
}

/// Lowercase `text` and blank out every character outside the token alphabet.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if is_token_char(c) { c } else { ' ' })
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

fn passes_length_filter(token: &str) -> bool {
    token.chars().count() > 2 || SHORT_ALLOW.contains(&token)
}

/// Extract a deduplicated, stop-word-filtered keyword sequence from `text`.
///
/// Pure and deterministic. Empty or whitespace-only input yields an empty
/// vector, which callers treat as "no suggestions".
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in normalized.split_whitespace() {
        if is_stop_word(token) || !passes_length_filter(token) {
            continue;
        }
        if !seen.insert(token) {
            continue;
        }
        keywords.push(token.to_string());
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }

    keywords
}

/// Whether `key` survives extraction unchanged, i.e. can ever be produced as
/// a keyword and so match a lexicon entry.
pub fn is_keyword(key: &str) -> bool {
    matches!(extract_keywords(key).as_slice(), [only] if only == key)
}
