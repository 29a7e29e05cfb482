//! Provider selection and dispatch policy.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ProviderSettings;
use crate::error::RelayError;

/// Wire protocol used to submit a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Blockbook-style: literal hex body, `{result}` reply.
    RawHttp,
    /// JSON-RPC 2.0 method call.
    JsonRpc,
}

impl ProviderKind {
    /// Parse a `PROVIDER_TYPE` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "blockbook" | "raw-http" | "raw" => Some(Self::RawHttp),
            "rpc" | "json-rpc" | "jsonrpc" => Some(Self::JsonRpc),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RawHttp => "raw-http",
            Self::JsonRpc => "json-rpc",
        }
    }
}

/// Resolved, immutable provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub endpoint: Url,
    /// Always `Some` for [`ProviderKind::JsonRpc`].
    pub rpc_method: Option<String>,
}

impl ProviderConfig {
    /// Resolve the raw provider settings.
    ///
    /// Raw-HTTP submits to `base_url` joined with `endpoint`. JSON-RPC
    /// submits to `rpc_url`, falling back to the same joined URL.
    pub fn resolve(settings: &ProviderSettings) -> Result<Self, RelayError> {
        let kind = ProviderKind::from_tag(&settings.provider_type)
            .ok_or_else(|| RelayError::UnknownProviderType(settings.provider_type.clone()))?;

        let joined = join_endpoint(&settings.base_url, &settings.endpoint);
        let (raw_url, rpc_method) = match kind {
            ProviderKind::RawHttp => (joined, None),
            ProviderKind::JsonRpc => {
                let method = settings.rpc_method.trim();
                if method.is_empty() {
                    return Err(RelayError::Misconfigured(
                        "json-rpc provider requires RPC_METHOD".to_string(),
                    ));
                }
                let url = if settings.rpc_url.trim().is_empty() {
                    joined
                } else {
                    settings.rpc_url.trim().to_string()
                };
                (url, Some(method.to_string()))
            }
        };

        if raw_url.is_empty() {
            return Err(RelayError::Misconfigured("no provider URL configured".to_string()));
        }
        let endpoint = Url::parse(&raw_url)
            .map_err(|e| RelayError::Misconfigured(format!("invalid provider URL {raw_url:?}: {e}")))?;

        Ok(Self {
            kind,
            endpoint,
            rpc_method,
        })
    }
}

/// `PROVIDER` with a trailing slash, then `ENDPOINT`.
fn join_endpoint(base: &str, endpoint: &str) -> String {
    let base = base.trim();
    if base.is_empty() {
        return String::new();
    }
    let endpoint = endpoint.trim();
    if base.ends_with('/') {
        format!("{base}{endpoint}")
    } else {
        format!("{base}/{endpoint}")
    }
}

/// How many segments of one message are submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchPolicy {
    /// Stop at the first segment that reaches an outcome.
    #[default]
    First,
    /// Submit every segment in order, one result each.
    All,
}

impl DispatchPolicy {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "first" => Some(Self::First),
            "all" | "batch" => Some(Self::All),
            _ => None,
        }
    }
}
