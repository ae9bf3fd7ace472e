//! Health/status HTTP server and, in webhook mode, the Telegram update endpoint.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use handler_chain::HandlerChain;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::types::Update;
use tracing::{info, warn};

use crate::access::AccessGuard;
use crate::status::BotStatus;
use crate::telegram::{dispatch_event, update_to_core};

pub const SERVICE_NAME: &str = "lookup-bot";

#[derive(Clone)]
pub struct ServerState {
    guard: Arc<AccessGuard>,
    status: BotStatus,
    /// Present only in webhook mode.
    chain: Option<HandlerChain>,
}

impl ServerState {
    pub fn new(guard: Arc<AccessGuard>, status: BotStatus, chain: Option<HandlerChain>) -> Self {
        Self {
            guard,
            status,
            chain,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: &'static str,
    service: &'static str,
    admin_count: usize,
    bot_status: &'static str,
}

/// `GET /`, `GET /health`, plus `POST /webhook` when the state carries a chain.
pub fn router(state: ServerState) -> Router {
    let mut router = Router::new()
        .route("/", get(status))
        .route("/health", get(health));
    if state.chain.is_some() {
        router = router.route("/webhook", post(webhook));
    }
    router.with_state(state)
}

async fn status(State(state): State<ServerState>) -> Json<StatusBody> {
    Json(StatusBody {
        status: "online",
        service: SERVICE_NAME,
        admin_count: state.guard.len(),
        bot_status: state.status.label(),
    })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Always answers 200; malformed payloads are logged and dropped.
async fn webhook(State(state): State<ServerState>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => {
            if let Some(chain) = &state.chain {
                dispatch_event(chain, update_to_core(&update)).await;
            }
        }
        Err(e) => warn!(error = %e, body_len = body.len(), "Ignoring malformed webhook update"),
    }
    StatusCode::OK
}

/// Binds `addr` and serves until the process stops.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %addr, "HTTP server listening");
    axum::serve(listener, router).await.context("HTTP server failed")?;
    Ok(())
}
