//! Lexicon loading.
//!
//! The suggestion lexicon is static configuration: either the built-in
//! table from `star-journal-core` or a TOML file whose top-level tables are
//! keywords, for example:
//!
//! ```toml
//! [rust]
//! tags = ["rust", "systems"]
//! actions = ["removed unsafe blocks"]
//! metrics = ["reduced allocations"]
//! patterns = ["newtype", "builder"]
//! ```
//!
//! Missing lists default to empty. Keys are matched case-insensitively, and
//! a key that extraction can never produce (`"ci/cd"`, `"node js"`, a stop
//! word) is rejected. The result is built once at start-up and
//! shared read-only behind an `Arc`.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use star_journal_core::keywords::is_keyword;
use star_journal_core::lexicon::{Lexicon, LexiconEntry};

use crate::config::Config;

pub fn parse_lexicon(content: &str) -> Result<Lexicon> {
    let entries: BTreeMap<String, LexiconEntry> =
        toml::from_str(content).with_context(|| "Failed to parse lexicon")?;

    let unreachable: Vec<&str> = entries
        .keys()
        .map(String::as_str)
        .filter(|key| !is_keyword(&key.trim().to_lowercase()))
        .collect();
    if !unreachable.is_empty() {
        bail!(
            "Lexicon keys never produced by keyword extraction: {}",
            unreachable.join(", ")
        );
    }

    Ok(Lexicon::from_entries(entries))
}

pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lexicon file: {}", path.display()))?;
    parse_lexicon(&content).with_context(|| format!("Invalid lexicon file: {}", path.display()))
}

/// Build the process-wide lexicon selected by `[lexicon]`.
pub fn lexicon_from_config(config: &Config) -> Result<Arc<Lexicon>> {
    let lexicon = match &config.lexicon.path {
        None => Lexicon::builtin(),
        Some(path) => {
            let loaded = load_lexicon(path)?;
            if config.lexicon.extend_builtin {
                let mut merged = Lexicon::builtin();
                merged.extend(loaded.into_entries());
                merged
            } else {
                loaded
            }
        }
    };

    tracing::info!(
        keywords = lexicon.len(),
        source = %config
            .lexicon
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        "lexicon loaded"
    );

    Ok(Arc::new(lexicon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexiconConfig;

    const RUST_LEXICON: &str = r#"
[rust]
tags = ["rust", "systems"]
actions = ["removed unsafe blocks"]

[Tokio]
patterns = ["actor tasks"]
"#;

    #[test]
    fn test_parse_lexicon() {
        let lexicon = parse_lexicon(RUST_LEXICON).unwrap();
        assert_eq!(lexicon.len(), 2);
        let rust = lexicon.get("rust").unwrap();
        assert_eq!(rust.tags, vec!["rust", "systems"]);
        assert!(rust.metrics.is_empty());
        assert_eq!(lexicon.get("tokio").unwrap().patterns, vec!["actor tasks"]);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_lexicon("rust = \"systems\"").is_err());
        assert!(parse_lexicon("[rust]\ntags = \"systems\"").is_err());
    }

    #[test]
    fn test_parse_rejects_unmatchable_keys() {
        let err = parse_lexicon("[\"ci/cd\"]\ntags = [\"ci\"]\n\n[\"node js\"]\ntags = [\"node\"]\n")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ci/cd"), "{}", message);
        assert!(message.contains("node js"), "{}", message);

        assert!(parse_lexicon("[the]\ntags = [\"x\"]\n").is_err());
        assert!(parse_lexicon("[\"node.js\"]\ntags = [\"node\"]\n").is_ok());
    }

    #[test]
    fn test_builtin_when_unconfigured() {
        let lexicon = lexicon_from_config(&Config::minimal()).unwrap();
        assert_eq!(lexicon.len(), Lexicon::builtin().len());
    }

    #[test]
    fn test_file_replaces_or_extends_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, RUST_LEXICON).unwrap();

        let mut config = Config::minimal();
        config.lexicon = LexiconConfig {
            path: Some(path.clone()),
            extend_builtin: false,
        };
        let replaced = lexicon_from_config(&config).unwrap();
        assert_eq!(replaced.len(), 2);
        assert!(replaced.get("redis").is_none());

        config.lexicon.extend_builtin = true;
        let extended = lexicon_from_config(&config).unwrap();
        assert_eq!(extended.len(), Lexicon::builtin().len() + 2);
        assert!(extended.get("redis").is_some());
        assert!(extended.get("rust").is_some());
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let err = load_lexicon(Path::new("/nonexistent/lexicon.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lexicon.toml"));
    }
}
