//! Local optimize backend.
//!
//! Exposes the two endpoints the client side talks to:
//!
//! - `GET /`: health check, `{"status":"ok"}`
//! - `POST /optimize`: `{"notes": "..."}` with `Authorization: Bearer <key>`,
//!   answered with `{"optimized": "..."}`
//!
//! The bearer key is forwarded to the chat-completions upstream for that one
//! request and never stored.

pub mod openai;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ScribeConfig;
use openai::Summarizer;

#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized: String,
}

/// Handler error rendered as `{"detail": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing or invalid API key")]
    Unauthorized,

    #[error("{0}")]
    Upstream(#[from] openai::SummarizeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({"detail": self.to_string()}));
        (status, body).into_response()
    }
}

/// Build the router with CORS limited to `allowed_origins`.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(health_handler))
        .route("/optimize", post(optimize_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn optimize_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<NotesRequest>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let api_key = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;

    tracing::info!(notes_len = request.notes.len(), "optimize request");
    let optimized = state
        .summarizer
        .summarize(api_key, &request.notes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "summarization failed");
            ApiError::from(e)
        })?;

    Ok(Json(OptimizeResponse { optimized }))
}

/// The token after `Bearer ` in the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Serve the backend on `server.host:server.port` until Ctrl-C.
pub async fn serve(config: ScribeConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    let summarizer = Summarizer::new(&config.openai)?;
    let state = AppState {
        summarizer: Arc::new(summarizer),
    };
    let router = build_router(state, &config.server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        model = %config.openai.model,
        "optimize backend listening at http://{bind_addr}"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down optimize backend");
        })
        .await?;

    Ok(())
}
