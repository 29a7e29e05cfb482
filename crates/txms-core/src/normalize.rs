//! Backend error normalization.
//!
//! Node software reports rejections in its own wording. The relay maps the
//! wording it knows to short, stable phrases and passes anything else
//! through untouched. The table is plain data: operators can extend or
//! override it with a TOML file of `"upstream text" = "phrase"` pairs.

use std::collections::HashMap;
use std::path::Path;

use crate::config::ConfigError;

/// Upstream error text (go-ethereum wording) to user-facing phrase.
pub const KNOWN_ERRORS: &[(&str, &str)] = &[
    ("nonce too low", "Nonce too low."),
    ("nonce too high", "Nonce too high."),
    ("nonce has max value", "Nonce has max value."),
    ("insufficient funds for gas * price + value", "Insufficient funds."),
    ("insufficient funds for transfer", "Insufficient funds."),
    ("replacement transaction underpriced", "Replacement transaction underpriced."),
    ("transaction underpriced", "Transaction underpriced."),
    ("already known", "Transaction already known."),
    ("known transaction", "Transaction already known."),
    ("intrinsic gas too low", "Intrinsic gas too low."),
    ("exceeds block gas limit", "Gas limit exceeds block gas limit."),
    ("gas limit reached", "Block gas limit reached."),
    ("invalid sender", "Invalid sender."),
    ("invalid transaction v, r, s values", "Invalid signature."),
    ("oversized data", "Transaction too large."),
    ("txpool is full", "Transaction pool is full."),
    ("transaction type not supported", "Transaction type not supported."),
    ("max fee per gas less than block base fee", "Fee too low for current base fee."),
    ("max priority fee per gas higher than max fee per gas", "Priority fee exceeds max fee."),
    ("negative value", "Negative value."),
    ("only replay-protected (EIP-155) transactions allowed over RPC", "Replay protection required."),
];

#[derive(Debug, Clone)]
pub struct ErrorNormalizer {
    table: HashMap<String, String>,
}

impl Default for ErrorNormalizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ErrorNormalizer {
    /// Normalizer over [`KNOWN_ERRORS`].
    pub fn builtin() -> Self {
        let table = KNOWN_ERRORS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { table }
    }

    /// Builtin table plus the entries of a TOML file. File entries win.
    pub fn with_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        let extra: HashMap<String, String> =
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?;
        Ok(Self::builtin().with_entries(extra))
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = (String, String)>) -> Self {
        self.table.extend(entries);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Map a raw backend error to its phrase, or return it unchanged.
    ///
    /// Matches the whole trimmed text, then the `"<known>: <detail>"` form
    /// nodes use to append context.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some(phrase) = self.table.get(trimmed) {
            return phrase.clone();
        }
        if let Some((head, _)) = trimmed.split_once(':') {
            if let Some(phrase) = self.table.get(head.trim()) {
                return phrase.clone();
            }
        }
        raw.to_string()
    }
}
