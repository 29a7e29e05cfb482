//! Segment classification and normalization to canonical hex.

use std::sync::Arc;

use crate::codec::{TxCodec, TxmsCodec};
use crate::error::RelayError;
use crate::segment::MessageSegment;
use crate::transaction::CanonicalTransaction;

/// Turns message segments into canonical transactions.
///
/// Hex segments are normalized in place; anything else goes through the
/// compact codec. Deterministic and free of I/O.
#[derive(Clone)]
pub struct TransactionDecoder {
    codec: Arc<dyn TxCodec>,
}

impl Default for TransactionDecoder {
    fn default() -> Self {
        Self::new(Arc::new(TxmsCodec))
    }
}

impl TransactionDecoder {
    pub fn new(codec: Arc<dyn TxCodec>) -> Self {
        Self { codec }
    }

    pub fn decode(&self, segment: &MessageSegment) -> Result<CanonicalTransaction, RelayError> {
        let raw = segment.as_str();
        if raw.is_empty() {
            return Err(RelayError::EmptySegment);
        }

        if let Some(tx) = CanonicalTransaction::from_hex(raw) {
            tracing::debug!(tag = %tx.tag(), "hex message");
            return Ok(tx);
        }

        let decoded = self
            .codec
            .decode(raw)
            .map_err(|e| RelayError::DecodeFailure(e.to_string()))?;
        let tx = CanonicalTransaction::from_hex(&decoded).ok_or_else(|| {
            RelayError::DecodeFailure(format!("codec produced non-hex output {decoded:?}"))
        })?;
        tracing::debug!(tag = %tx.tag(), "compact message");
        Ok(tx)
    }
}
