//! Configuration system for the txms relay.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $TXMS_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/txms/config.toml
//!   3. ~/.config/txms/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::provider::DispatchPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub provider: ProviderSettings,
    pub message: MessageConfig,
    pub errors: ErrorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the webhook listener binds to.
    pub bind: String,
    pub port: u16,
    /// Verbose logging when RUST_LOG is unset.
    pub debug: bool,
}

/// Raw provider settings, as configured. See [`crate::ProviderConfig`] for
/// the resolved form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Node base URL.
    pub base_url: String,
    /// Path appended to `base_url`, e.g. "api/v2/sendtx/".
    pub endpoint: String,
    /// "blockbook" (raw HTTP) or "rpc" (JSON-RPC).
    pub provider_type: String,
    /// JSON-RPC URL. Empty = `base_url` + `endpoint`.
    pub rpc_url: String,
    /// JSON-RPC method, e.g. "eth_sendRawTransaction".
    pub rpc_method: String,
    /// Bounds every provider call and attachment fetch.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Webhook field holding the message text.
    pub body_name: String,
    /// Webhook field holding attachment URLs.
    pub media_name: String,
    /// Process MMS attachments.
    pub mms: bool,
    /// Attachment path suffix that marks a message carrier.
    pub mms_suffix: String,
    pub dispatch_policy: DispatchPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorsConfig {
    /// Extra upstream-error phrases, TOML. Unset = builtin table only.
    pub table_path: Option<PathBuf>,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            debug: false,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoint: String::new(),
            provider_type: "blockbook".to_string(),
            rpc_url: String::new(),
            rpc_method: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            body_name: "body".to_string(),
            media_name: "mms".to_string(),
            mms: false,
            mms_suffix: ".txt".to_string(),
            dispatch_policy: DispatchPolicy::First,
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("txms")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl RelayConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            RelayConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("TXMS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&RelayConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text).map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply the relay's environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparseable values are skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("PROVIDER") {
            self.provider.base_url = v;
        }
        if let Some(v) = lookup("ENDPOINT") {
            self.provider.endpoint = v;
        }
        if let Some(v) = lookup("PROVIDER_TYPE") {
            self.provider.provider_type = v;
        }
        if let Some(v) = lookup("RPC_URL") {
            self.provider.rpc_url = v;
        }
        if let Some(v) = lookup("RPC_METHOD") {
            self.provider.rpc_method = v;
        }
        if let Some(v) = lookup("TIMEOUT") {
            match v.parse() {
                Ok(secs) => self.provider.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %v, "ignoring non-numeric TIMEOUT"),
            }
        }
        if let Some(v) = lookup("MMS") {
            self.message.mms = is_truthy(&v);
        }
        if let Some(v) = lookup("MMS_SUFFIX") {
            self.message.mms_suffix = v;
        }
        if let Some(v) = lookup("BODY_NAME") {
            self.message.body_name = v;
        }
        if let Some(v) = lookup("MEDIA_NAME") {
            self.message.media_name = v;
        }
        if let Some(v) = lookup("DISPATCH_POLICY") {
            match DispatchPolicy::from_tag(&v) {
                Some(policy) => self.message.dispatch_policy = policy,
                None => tracing::warn!(value = %v, "ignoring unknown DISPATCH_POLICY"),
            }
        }
        if let Some(v) = lookup("ERRORS_TABLE") {
            self.errors.table_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("BIND") {
            self.server.bind = v;
        }
        if let Some(v) = lookup("PORT") {
            if let Ok(p) = v.parse() {
                self.server.port = p;
            }
        }
        if let Some(v) = lookup("DEBUG") {
            self.server.debug = is_truthy(&v);
        }
    }
}

fn is_truthy(v: &str) -> bool {
    v == "true" || v == "1"
}
