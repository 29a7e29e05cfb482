//! Request-level error taxonomy.
//!
//! Every variant maps to a stable errno, a user-facing category and an
//! HTTP-equivalent status. Raw backend text only reaches a variant after it
//! has been through the [`ErrorNormalizer`](crate::ErrorNormalizer).

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("empty message")]
    EmptyMessage,
    #[error("empty message part")]
    EmptySegment,
    #[error("undecodable message part: {0}")]
    DecodeFailure(String),
    #[error("provider transport failed: {0}")]
    Transport(String),
    #[error("provider rejected transaction: {0}")]
    Rejected(String),
    #[error("unknown provider type: {0:?}")]
    UnknownProviderType(String),
    #[error("no valid transactions processed")]
    NoValidTransactions,
    #[error("provider misconfigured: {0}")]
    Misconfigured(String),
}

impl RelayError {
    /// Legacy error number carried in the `errno` response field.
    pub fn errno(&self) -> u8 {
        match self {
            Self::EmptyMessage => 1,
            Self::EmptySegment => 2,
            Self::Transport(_) => 3,
            Self::Rejected(_) => 4,
            Self::DecodeFailure(_) => 5,
            Self::UnknownProviderType(_) => 6,
            Self::NoValidTransactions => 7,
            Self::Misconfigured(_) => 8,
        }
    }

    /// Stable human-readable category.
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "Empty message",
            Self::EmptySegment => "Empty message part",
            Self::Transport(_) => "Provider unreachable",
            Self::Rejected(_) => "Transaction rejected",
            Self::DecodeFailure(_) => "Undecodable message part",
            Self::UnknownProviderType(_) => "Unknown provider type",
            Self::NoValidTransactions => "No valid transactions processed",
            Self::Misconfigured(_) => "Provider misconfigured",
        }
    }

    /// HTTP-equivalent status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::EmptyMessage
            | Self::EmptySegment
            | Self::DecodeFailure(_)
            | Self::NoValidTransactions => 422,
            Self::Rejected(_) => 400,
            Self::Transport(_) | Self::UnknownProviderType(_) | Self::Misconfigured(_) => 500,
        }
    }

    /// True for failures detected before any network call.
    pub fn is_validation(&self) -> bool {
        self.status() == 422
    }
}
