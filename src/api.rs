//! REST API server for the market commentary assistant
//!
//! Web chat endpoint, health check, landing page and the Telegram webhook.
//! Every message goes through `Orchestrator::handle`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::agent::Orchestrator;
use crate::models::Mode;
use crate::telegram::{TelegramResponder, Update};

const INDEX_HTML: &str = include_str!("../web/index.html");

const CHAT_FAILURE: &str =
    "Sorry — I hit an internal error while generating the response. Please try again.";

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatResponse {
    pub mode: Mode,
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
    /// `None` when no bot token is configured
    pub telegram: Option<Arc<TelegramResponder>>,
}

/// =============================
/// Landing Page & Health
/// =============================

async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.orchestrator.handle(&req.message).await {
        Ok(outcome) => Ok(Json(ChatResponse {
            mode: outcome.mode,
            response: outcome.response,
        })),
        Err(e) => {
            error!(error = %e, "Chat request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(CHAT_FAILURE)),
            ))
        }
    }
}

/// =============================
/// Telegram Webhook
/// =============================

async fn telegram_webhook(
    State(state): State<ApiState>,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    let Some(responder) = state.telegram.as_ref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": "TELEGRAM_BOT_TOKEN missing" })),
        );
    };

    // acked even when unparseable, so Telegram stops redelivering
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Ignoring malformed Telegram update");
            return (StatusCode::OK, Json(serde_json::json!({ "ok": true })));
        }
    };

    match responder.handle_update(&update).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "ok": true }))),
        Err(e) => {
            error!(update_id = update.update_id, error = %e, "Webhook update failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "ok": false })),
            )
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(
    orchestrator: Arc<Orchestrator>,
    telegram: Option<Arc<TelegramResponder>>,
) -> Router {
    let state = ApiState {
        orchestrator,
        telegram,
    };

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/chat", post(chat_handler))
        .route("/telegram/webhook", post(telegram_webhook))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server<F>(
    router: Router,
    address: &str,
    shutdown: F,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(address).await?;

    info!("API Server listening on http://{}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
