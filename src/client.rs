//! Suggestion sources used by the scheduler.
//!
//! - **[`HttpSuggestionSource`]** calls `GET {base_url}/suggestions` with reqwest.
//! - **[`LocalSuggestionSource`]** runs the [`SuggestionService`] in-process.
//!
//! Both implement [`SuggestionSource`], the seam the
//! [`SuggestionScheduler`](crate::scheduler::SuggestionScheduler) depends on.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use star_journal_core::field::Field;
use star_journal_core::models::SuggestionBundle;
use star_journal_core::service::SuggestionService;

use crate::config::ClientConfig;

/// Why a suggestion fetch produced no bundle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("suggestion request failed: {0}")]
    Transport(String),
    #[error("suggestion service returned HTTP {0}")]
    Status(u16),
    #[error("suggestion response could not be decoded: {0}")]
    Decode(String),
}

/// Something that turns `(field, text)` into a bundle.
#[async_trait]
pub trait SuggestionSource: Send + Sync + 'static {
    async fn fetch(&self, field: Field, query: &str) -> Result<SuggestionBundle, FetchError>;
}

/// Remote source backed by the HTTP API.
pub struct HttpSuggestionSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSuggestionSource {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: suggestions_endpoint(&config.base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn suggestions_endpoint(base_url: &str) -> String {
    format!("{}/suggestions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(&self, field: Field, query: &str) -> Result<SuggestionBundle, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("field", field.as_str()), ("q", query)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<SuggestionBundle>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// In-process source; no network involved.
#[derive(Clone)]
pub struct LocalSuggestionSource {
    service: Arc<SuggestionService>,
}

impl LocalSuggestionSource {
    pub fn new(service: SuggestionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[async_trait]
impl SuggestionSource for LocalSuggestionSource {
    async fn fetch(&self, field: Field, query: &str) -> Result<SuggestionBundle, FetchError> {
        self.service
            .suggest_for(Some(field), query)
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_journal_core::lexicon::Lexicon;

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(
            suggestions_endpoint("http://127.0.0.1:5000/api"),
            "http://127.0.0.1:5000/api/suggestions"
        );
        assert_eq!(
            suggestions_endpoint("http://127.0.0.1:5000/api/"),
            "http://127.0.0.1:5000/api/suggestions"
        );
    }

    #[test]
    fn test_http_source_builds_from_config() {
        let source = HttpSuggestionSource::new(&ClientConfig::default()).unwrap();
        assert_eq!(source.endpoint(), "http://127.0.0.1:5000/api/suggestions");
    }

    #[tokio::test]
    async fn test_local_source_applies_field() {
        let source = LocalSuggestionSource::new(SuggestionService::new(Arc::new(
            Lexicon::builtin(),
        )));
        let bundle = source.fetch(Field::Action, "deployed docker").await.unwrap();
        assert_eq!(bundle.tags, vec!["docker", "containers"]);
        assert!(bundle.actions.contains(&"added tracing".to_string()));
    }

    #[tokio::test]
    async fn test_http_source_reports_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ClientConfig {
            base_url: format!("http://127.0.0.1:{}/api", port),
            ..Default::default()
        };
        let source = HttpSuggestionSource::new(&config).unwrap();
        let err = source.fetch(Field::Task, "redis cache").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::Status(503).to_string(),
            "suggestion service returned HTTP 503"
        );
    }
}
