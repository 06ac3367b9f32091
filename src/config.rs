use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use star_journal_core::prompts::TemplatePrompts;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub client: ClientConfig,
    /// Prompt and example overrides shown by `starj prompt`.
    #[serde(default)]
    pub template: TemplatePrompts,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LexiconConfig {
    /// TOML lexicon file. The built-in table is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Merge the file over the built-in table instead of replacing it.
    #[serde(default)]
    pub extend_builtin: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_discard_stale")]
    pub discard_stale_responses: bool,
    /// 0 leaves the timeout to the transport.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            discard_stale_responses: default_discard_stale(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}
fn default_debounce_ms() -> u64 {
    350
}
fn default_min_query_chars() -> usize {
    3
}
fn default_discard_stale() -> bool {
    true
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl ClientConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Config {
    /// Defaults for every section, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Resolve relative paths against the directory holding the config file.
    fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = &self.lexicon.path {
            if path.is_relative() {
                self.lexicon.path = Some(base.join(path));
            }
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.client.debounce_ms == 0 {
        anyhow::bail!("client.debounce_ms must be > 0");
    }

    if config.client.min_query_chars == 0 {
        anyhow::bail!("client.min_query_chars must be >= 1");
    }

    let base = config.client.base_url.as_str();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        anyhow::bail!(
            "client.base_url must start with http:// or https://, got '{}'",
            base
        );
    }

    if config.lexicon.extend_builtin && config.lexicon.path.is_none() {
        anyhow::bail!("lexicon.extend_builtin requires lexicon.path");
    }

    Ok(())
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)?;
    if let Some(dir) = path.parent() {
        config.resolve_paths(dir);
    }
    Ok(config)
}

/// Load `path` when it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}
