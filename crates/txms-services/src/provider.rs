//! Provider dispatcher: submits a canonical transaction to the node.
//!
//! One POST per call, never retried:
//! - raw HTTP: the hex string is the whole request body (`text/plain`)
//! - JSON-RPC: `{"jsonrpc":"2.0","method":<m>,"params":[<tx>],"id":1}`
//!
//! Both replies are read the same way: a non-empty string `result` on a
//! success status confirms, an `error` rejects, anything else is a
//! transport error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Serialize;
use serde_json::Value;

use txms_core::{CanonicalTransaction, ProviderConfig, ProviderKind, RelayError, SubmissionOutcome};

use crate::submitter::TxSubmitter;

const USER_AGENT: &str = "txms";

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: [&'a str; 1],
    id: u32,
}

#[derive(Clone)]
pub struct ProviderDispatcher {
    http: HttpClient,
    config: Arc<ProviderConfig>,
}

impl ProviderDispatcher {
    pub fn new(config: ProviderConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: ProviderConfig, http: HttpClient) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub async fn dispatch(&self, tx: &CanonicalTransaction) -> SubmissionOutcome {
        let endpoint = self.config.endpoint.clone();
        let request = match self.config.kind {
            ProviderKind::RawHttp => self
                .http
                .post(endpoint)
                .header(CONTENT_TYPE, "text/plain")
                .body(tx.as_str().to_string()),
            ProviderKind::JsonRpc => self.http.post(endpoint).json(&RpcRequest {
                jsonrpc: "2.0",
                method: self.config.rpc_method.as_deref().unwrap_or_default(),
                params: [tx.as_str()],
                id: 1,
            }),
        };

        tracing::debug!(
            provider = self.config.kind.name(),
            endpoint = %self.config.endpoint,
            tag = %tx.tag(),
            "submitting transaction"
        );

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(tag = %tx.tag(), error = %e, "provider unreachable");
                return SubmissionOutcome::TransportError {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(tag = %tx.tag(), %status, error = %e, "provider reply is not JSON");
                return SubmissionOutcome::TransportError {
                    message: format!("unparseable provider reply (HTTP {status}): {e}"),
                };
            }
        };

        let outcome = interpret(status, &body);
        match &outcome {
            SubmissionOutcome::Confirmed { identifier } => {
                tracing::info!(tag = %tx.tag(), hash = %identifier, "transaction accepted")
            }
            SubmissionOutcome::Rejected { raw_error } => {
                tracing::warn!(tag = %tx.tag(), %status, error = %raw_error, "transaction rejected")
            }
            SubmissionOutcome::TransportError { message } => {
                tracing::warn!(tag = %tx.tag(), %status, error = %message, "unusable provider reply")
            }
        }
        outcome
    }
}

#[async_trait]
impl TxSubmitter for ProviderDispatcher {
    async fn submit(&self, tx: &CanonicalTransaction) -> Result<SubmissionOutcome, RelayError> {
        Ok(self.dispatch(tx).await)
    }
}

fn interpret(status: StatusCode, body: &Value) -> SubmissionOutcome {
    if status.is_success() {
        if let Some(identifier) = body
            .get("result")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        {
            return SubmissionOutcome::Confirmed {
                identifier: identifier.to_string(),
            };
        }
    }

    if let Some(raw_error) = error_text(body) {
        return SubmissionOutcome::Rejected { raw_error };
    }

    let message = if status.is_success() {
        "provider reply carried neither result nor error".to_string()
    } else {
        format!("provider returned HTTP {status}")
    };
    SubmissionOutcome::TransportError { message }
}

/// `error` as a string, or `error.message` from a structured error.
fn error_text(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(fields) => Some(
            fields
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(fields.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}
