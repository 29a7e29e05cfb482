//! POST /: the gateway webhook.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::Value;

use txms_core::IncomingPayload;
use txms_services::RelayResponse;

use super::ApiState;

/// Gateways do not all send a JSON content type, so the body is parsed
/// by hand instead of through the `Json` extractor.
pub async fn handle_relay(State(state): State<ApiState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "webhook body is not JSON");
            return (StatusCode::BAD_REQUEST, "invalid JSON body".to_string()).into_response();
        }
    };

    let payload = IncomingPayload::from_json(&value, &state.body_name, &state.media_name);
    let response = state.relay.handle(&payload).await;

    let status =
        StatusCode::from_u16(response.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match response {
        RelayResponse::Single(formatted) => (status, Json(formatted.payload)).into_response(),
        RelayResponse::Batch(items) => {
            let payloads: Vec<_> = items.into_iter().map(|f| f.payload).collect();
            (status, Json(payloads)).into_response()
        }
    }
}
