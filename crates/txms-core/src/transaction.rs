//! Canonical hex transaction type.

use serde::Serialize;
use std::fmt;

/// A `0x`-prefixed, lowercase hex string holding a serialized transaction.
///
/// Only constructible through [`CanonicalTransaction::from_hex`], so every
/// value matches `^0x[0-9a-f]+$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalTransaction(String);

impl CanonicalTransaction {
    /// Canonicalize a string matching `^(0[xX])?[0-9a-fA-F]+$`.
    /// Returns `None` for anything else.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = strip_hex_prefix(s);
        if !is_hex_digits(digits) {
            return None;
        }
        Some(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short tag used in response messages and logs: digits 1..4 plus the
    /// last three characters.
    pub fn tag(&self) -> String {
        let s = self.0.as_str();
        let head = &s[2.min(s.len())..5.min(s.len())];
        let tail = &s[s.len().saturating_sub(3)..];
        format!("{head}{tail}")
    }
}

impl fmt::Display for CanonicalTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalTransaction {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}
