//! txms integration test harness.
//!
//! Each test starts the real webhook router on a loopback port and points
//! it at wiremock servers standing in for the blockchain node and the MMS
//! carrier's media host. Nothing leaves the machine.
//!
//!   cargo test --test integration

mod attachments;
mod relay;
mod routes;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use txms_api::ApiState;
use txms_core::RelayConfig;
use txms_services::Relay;

// ── Harness ───────────────────────────────────────────────────────────────────

/// A relay serving on 127.0.0.1. Stops when dropped.
pub struct RunningRelay {
    pub url: String,
    task: JoinHandle<()>,
}

impl Drop for RunningRelay {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn spawn_relay(config: RelayConfig) -> Result<RunningRelay> {
    let relay = Relay::from_config(&config).context("failed to build relay")?;
    let state = ApiState::new(relay, &config.message);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind loopback listener")?;
    let addr = listener.local_addr()?;

    let task = tokio::spawn(async move {
        if let Err(e) = txms_api::serve_on(listener, state).await {
            eprintln!("relay server exited: {e}");
        }
    });

    Ok(RunningRelay {
        url: format!("http://{addr}"),
        task,
    })
}

/// Blockbook-style provider at `{uri}/api/v2/sendtx/`.
pub fn blockbook_config(uri: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.provider.base_url = uri.to_string();
    config.provider.endpoint = "api/v2/sendtx/".to_string();
    config.provider.provider_type = "blockbook".to_string();
    config.provider.timeout_secs = 5;
    config
}

/// JSON-RPC provider at `{uri}/rpc`.
pub fn rpc_config(uri: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.provider.provider_type = "rpc".to_string();
    config.provider.rpc_url = format!("{uri}/rpc");
    config.provider.rpc_method = "eth_sendRawTransaction".to_string();
    config.provider.timeout_secs = 5;
    config
}

/// POST a webhook body; returns status and parsed JSON reply.
pub async fn post_webhook(relay: &RunningRelay, body: &Value) -> Result<(u16, Value)> {
    let response = reqwest::Client::new()
        .post(&relay.url)
        .json(body)
        .send()
        .await
        .context("relay unreachable")?;
    let status = response.status().as_u16();
    let value = response.json::<Value>().await.context("relay reply is not JSON")?;
    Ok((status, value))
}

pub const TX: &str = "0xf86b8085e8d4a510008252089400000000000000000000000000000000000000008806f05b59d3b2000080820a95";
