//! Liveness routes.

use axum::extract::State;
use axum::http::StatusCode;

use super::ApiState;

// ── / (GET) ───────────────────────────────────────────────────────────────────

pub async fn handle_root() -> (StatusCode, &'static str) {
    (StatusCode::IM_A_TEAPOT, "I'm a cyber")
}

// ── /info ─────────────────────────────────────────────────────────────────────

pub async fn handle_info(State(state): State<ApiState>) -> String {
    state.info.clone()
}

// ── /ping ─────────────────────────────────────────────────────────────────────

pub async fn handle_ping() -> &'static str {
    "OK"
}
