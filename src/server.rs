//! HTTP server for the suggestion engine.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/suggestions?field=..&q=..` | Contextual suggestions for one field |
//! | `GET`  | `/suggestions?field=..&q=..` | Same handler, unprefixed |
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/` | API banner |
//!
//! # Response Contract
//!
//! Suggestions are always returned as
//! `{ "tags": [], "actions": [], "metrics": [], "patterns": [] }`. A missing,
//! empty, or unparseable query is not an error; it yields the empty bundle.
//! An internal failure returns 500:
//!
//! ```json
//! { "message": "Failed to build suggestions",
//!   "error": { "code": "internal", "message": "Failed to build suggestions" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the browser form can
//! call the API from another origin.

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use star_journal_core::models::SuggestionBundle;
use star_journal_core::service::SuggestionService;

use crate::config::Config;
use crate::lexicon::lexicon_from_config;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    service: Arc<SuggestionService>,
}

impl AppState {
    pub fn new(service: SuggestionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the application router. Exposed so tests can drive it in-process.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/suggestions", get(handle_suggestions))
        .route("/api/suggestions", get(handle_suggestions))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Loads the lexicon selected by `[lexicon]`, binds to `[server].bind`, and
/// serves until Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let lexicon = lexicon_from_config(config)?;
    let state = AppState::new(SuggestionService::new(lexicon));
    let app = router(state);

    let bind_addr = config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("suggestion server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("suggestion server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    /// Human-readable message (top level, for simple clients).
    message: String,
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message.clone(),
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET / ============

#[derive(Serialize)]
struct BannerResponse {
    message: String,
}

async fn handle_root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "STAR Programmer Journal API".to_string(),
    })
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /suggestions ============

/// Query string for `GET /suggestions`. Both parameters are optional.
#[derive(Debug, Deserialize)]
struct SuggestionQuery {
    field: Option<String>,
    q: Option<String>,
}

/// Handler for `GET /suggestions` and `GET /api/suggestions`.
///
/// Returns `200` with a bundle for every well- or ill-formed query, and `500`
/// only when the pipeline itself fails.
async fn handle_suggestions(
    State(state): State<AppState>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<SuggestionBundle>, AppError> {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => {
            tracing::debug!("unreadable suggestion query treated as empty: {}", rejection);
            return Ok(Json(SuggestionBundle::empty()));
        }
    };

    let bundle = state
        .service
        .suggest(query.field.as_deref(), query.q.as_deref())
        .map_err(|e| {
            tracing::error!(field = ?query.field, "suggestion request failed: {:#}", e);
            internal_error("Failed to build suggestions")
        })?;

    Ok(Json(bundle))
}
