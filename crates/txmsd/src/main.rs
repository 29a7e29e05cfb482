//! txmsd: SMS/MMS to blockchain transaction relay.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use txms_api::ApiState;
use txms_core::RelayConfig;
use txms_services::Relay;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal outside development.
    dotenvy::dotenv().ok();

    let written = RelayConfig::write_default_if_missing();
    let loaded = RelayConfig::load();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => {
            let mut config = RelayConfig::default();
            config.apply_env_overrides();
            config
        }
    };

    // RUST_LOG wins; otherwise DEBUG picks the level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if config.server.debug { "debug" } else { "info" })
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to write default config");
    }
    if let Err(e) = loaded {
        tracing::warn!(error = %e, "failed to load config, using defaults");
    }

    tracing::info!(
        config = %RelayConfig::file_path().display(),
        mms = config.message.mms,
        policy = ?config.message.dispatch_policy,
        "txmsd starting"
    );

    let relay = Relay::from_config(&config).context("failed to build relay")?;
    let state = ApiState::new(relay, &config.message).with_info(format!(
        "{} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));

    // ── Wait for exit ────────────────────────────────────────────────────────

    let bind = config.server.bind.clone();
    let port = config.server.port;
    tokio::select! {
        r = txms_api::serve(state, &bind, port) => {
            r.context("webhook server failed")?;
        }
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }

    Ok(())
}
