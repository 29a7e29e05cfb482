//! Submission trait.
//!
//! The pipeline talks to a backend only through this trait. The daemon
//! installs a [`ProviderDispatcher`](crate::ProviderDispatcher) when the
//! provider config resolves, and an [`UnconfiguredSubmitter`] when it does
//! not, so a bad config fails each request instead of the process.

use async_trait::async_trait;
use txms_core::{CanonicalTransaction, RelayError, SubmissionOutcome};

#[async_trait]
pub trait TxSubmitter: Send + Sync {
    /// One submission attempt. `Err` means the submission could not be
    /// attempted at all (configuration), never a backend failure.
    async fn submit(&self, tx: &CanonicalTransaction) -> Result<SubmissionOutcome, RelayError>;
}

/// Stands in for a provider whose configuration did not resolve.
pub struct UnconfiguredSubmitter {
    error: RelayError,
}

impl UnconfiguredSubmitter {
    pub fn new(error: RelayError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TxSubmitter for UnconfiguredSubmitter {
    async fn submit(&self, tx: &CanonicalTransaction) -> Result<SubmissionOutcome, RelayError> {
        tracing::error!(tag = %tx.tag(), error = %self.error, "provider not configured");
        Err(self.error.clone())
    }
}
