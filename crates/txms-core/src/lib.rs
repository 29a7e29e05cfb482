//! txms-core: shared types, decoding, and response shaping for the relay.
//! All other txms crates depend on this one.

pub mod codec;
pub mod config;
pub mod decoder;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod provider;
pub mod response;
pub mod segment;
pub mod transaction;

pub use codec::{CodecError, TxCodec, TxmsCodec};
pub use config::RelayConfig;
pub use decoder::TransactionDecoder;
pub use error::RelayError;
pub use normalize::ErrorNormalizer;
pub use payload::IncomingPayload;
pub use provider::{DispatchPolicy, ProviderConfig, ProviderKind};
pub use response::{Formatted, ResponsePayload, SubmissionOutcome};
pub use segment::{split, MessageSegment};
pub use transaction::CanonicalTransaction;
