//! Compact transaction codec.
//!
//! Packs a serialized transaction into as few SMS characters as possible:
//! every UTF-16 code unit of the text carries two bytes, big-endian.
//! Code units that would not survive a carrier (whitespace, control
//! characters, lone surrogates, and `~` itself) are escaped as `~` followed by
//! two code units of `0x100 + byte`.
//!
//! The relay only needs [`TxCodec::decode`]; `encode` exists for the CLI and
//! for tests.

use crate::transaction::CanonicalTransaction;

const ESCAPE: u16 = 0x7e;
const ESCAPE_BASE: u16 = 0x100;

/// Turns a compact message into a `0x`-prefixed hex transaction.
pub trait TxCodec: Send + Sync {
    fn decode(&self, text: &str) -> Result<String, CodecError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("empty input")]
    Empty,
    #[error("truncated escape at position {0}")]
    TruncatedEscape(usize),
    #[error("escape unit {unit:#06x} at position {pos} out of range")]
    BadEscape { pos: usize, unit: u16 },
    #[error("message decodes to no data")]
    NoData,
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("encoded text is not valid UTF-16")]
    Unencodable,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TxmsCodec;

impl TxmsCodec {
    /// Encode a hex transaction (with or without `0x`) into compact text.
    pub fn encode(&self, hex_tx: &str) -> Result<String, CodecError> {
        let tx = CanonicalTransaction::from_hex(hex_tx.trim()).ok_or(CodecError::Empty)?;
        let digits = &tx.as_str()[2..];
        let digits = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };

        let mut bytes = hex::decode(digits)?;
        if bytes.len() % 2 == 1 {
            bytes.insert(0, 0);
        }

        let mut units = Vec::with_capacity(bytes.len());
        for pair in bytes.chunks_exact(2) {
            let unit = u16::from_be_bytes([pair[0], pair[1]]);
            if needs_escape(unit) {
                units.push(ESCAPE);
                units.push(ESCAPE_BASE + u16::from(pair[0]));
                units.push(ESCAPE_BASE + u16::from(pair[1]));
            } else {
                units.push(unit);
            }
        }

        String::from_utf16(&units).map_err(|_| CodecError::Unencodable)
    }
}

impl TxCodec for TxmsCodec {
    fn decode(&self, text: &str) -> Result<String, CodecError> {
        let units: Vec<u16> = text.encode_utf16().collect();
        if units.is_empty() {
            return Err(CodecError::Empty);
        }

        let mut bytes = Vec::with_capacity(units.len() * 2);
        let mut i = 0;
        while i < units.len() {
            if units[i] == ESCAPE {
                let (Some(&hi), Some(&lo)) = (units.get(i + 1), units.get(i + 2)) else {
                    return Err(CodecError::TruncatedEscape(i));
                };
                bytes.push(escaped_byte(hi, i + 1)?);
                bytes.push(escaped_byte(lo, i + 2)?);
                i += 3;
            } else {
                bytes.extend_from_slice(&units[i].to_be_bytes());
                i += 1;
            }
        }

        // Leading zero bytes are padding from the encoder.
        let start = bytes
            .iter()
            .position(|b| *b != 0)
            .ok_or(CodecError::NoData)?;
        Ok(format!("0x{}", hex::encode(&bytes[start..])))
    }
}

fn escaped_byte(unit: u16, pos: usize) -> Result<u8, CodecError> {
    unit.checked_sub(ESCAPE_BASE)
        .and_then(|v| u8::try_from(v).ok())
        .ok_or(CodecError::BadEscape { pos, unit })
}

fn needs_escape(unit: u16) -> bool {
    if unit == ESCAPE {
        return true;
    }
    match char::from_u32(u32::from(unit)) {
        Some(c) => c.is_control() || c.is_whitespace(),
        None => true,
    }
}
