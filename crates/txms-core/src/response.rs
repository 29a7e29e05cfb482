//! Submission outcomes and the response payloads built from them.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::normalize::ErrorNormalizer;
use crate::transaction::CanonicalTransaction;

/// Result of one provider round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Accepted; `identifier` is the transaction hash the node returned.
    Confirmed { identifier: String },
    /// The node understood the submission and declined it.
    Rejected { raw_error: String },
    /// Network, timeout, or unparseable reply.
    TransportError { message: String },
}

impl SubmissionOutcome {
    /// Identifier on success; rejections come back normalized.
    pub fn into_result(self, normalizer: &ErrorNormalizer) -> Result<String, RelayError> {
        match self {
            Self::Confirmed { identifier } => Ok(identifier),
            Self::Rejected { raw_error } => Err(RelayError::Rejected(normalizer.normalize(&raw_error))),
            Self::TransportError { message } => Err(RelayError::Transport(message)),
        }
    }
}

/// JSON body returned to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub message: String,
    pub sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errno: Option<u8>,
    /// ISO-8601, UTC, millisecond precision.
    pub date: String,
}

/// A payload paired with its HTTP-equivalent status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub status: u16,
    pub payload: ResponsePayload,
}

impl Formatted {
    pub fn confirmed(tx: &CanonicalTransaction, identifier: &str) -> Self {
        Self {
            status: 200,
            payload: ResponsePayload {
                message: format!("OK: <{}> {}", tx.tag(), identifier),
                sent: true,
                hash: Some(identifier.to_string()),
                error: None,
                errno: None,
                date: timestamp(),
            },
        }
    }

    /// Failure response. `tx` is known once decoding succeeded.
    pub fn failure(tx: Option<&CanonicalTransaction>, err: &RelayError) -> Self {
        let errno = err.errno();
        let tag = tx.map(|t| format!(" <{}>", t.tag())).unwrap_or_default();
        let (message, error) = match err {
            RelayError::Transport(detail) => (format!("Err({errno}):{tag}"), detail.clone()),
            RelayError::Rejected(phrase) => (format!("Err({errno}):{tag} {phrase}"), phrase.clone()),
            RelayError::DecodeFailure(detail)
            | RelayError::UnknownProviderType(detail)
            | RelayError::Misconfigured(detail) => {
                (format!("Err({errno}): {}", err.category()), detail.clone())
            }
            RelayError::EmptyMessage | RelayError::EmptySegment | RelayError::NoValidTransactions => (
                format!("Err({errno}): {}", err.category()),
                err.category().to_string(),
            ),
        };

        Self {
            status: err.status(),
            payload: ResponsePayload {
                message,
                sent: false,
                hash: None,
                error: Some(error),
                errno: Some(errno),
                date: timestamp(),
            },
        }
    }

    /// Format a provider outcome, normalizing rejections.
    pub fn from_outcome(
        tx: &CanonicalTransaction,
        outcome: SubmissionOutcome,
        normalizer: &ErrorNormalizer,
    ) -> Self {
        match outcome.into_result(normalizer) {
            Ok(identifier) => Self::confirmed(tx, &identifier),
            Err(err) => Self::failure(Some(tx), &err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
