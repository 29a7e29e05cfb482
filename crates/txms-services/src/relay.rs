//! The decode-and-dispatch pipeline.
//!
//! body ─▶ split ─▶ decode ─▶ submit ─▶ normalize ─▶ format
//!
//! A request with a non-blank body uses the body. Otherwise, when MMS is
//! enabled, carrier attachments are fetched one at a time and the first one
//! that yields segments is used. Under [`DispatchPolicy::First`] the first
//! segment decides the response and the rest of the message is dropped.

use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use txms_core::config::ConfigError;
use txms_core::{
    split, DispatchPolicy, ErrorNormalizer, Formatted, IncomingPayload, MessageSegment,
    ProviderConfig, RelayConfig, RelayError, TransactionDecoder,
};

use crate::attachment::AttachmentResolver;
use crate::provider::ProviderDispatcher;
use crate::submitter::{TxSubmitter, UnconfiguredSubmitter};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Response for one request: a single payload, or one per segment under
/// [`DispatchPolicy::All`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayResponse {
    Single(Formatted),
    Batch(Vec<Formatted>),
}

impl RelayResponse {
    /// 200 when everything was accepted, otherwise the first failure's status.
    pub fn status(&self) -> u16 {
        match self {
            Self::Single(f) => f.status,
            Self::Batch(items) => items
                .iter()
                .find(|f| !f.is_success())
                .map(|f| f.status)
                .unwrap_or(200),
        }
    }

    pub fn payloads(&self) -> Vec<&txms_core::ResponsePayload> {
        match self {
            Self::Single(f) => vec![&f.payload],
            Self::Batch(items) => items.iter().map(|f| &f.payload).collect(),
        }
    }

    fn failure(err: &RelayError) -> Self {
        Self::Single(Formatted::failure(None, err))
    }
}

#[derive(Clone)]
pub struct Relay {
    decoder: TransactionDecoder,
    submitter: Arc<dyn TxSubmitter>,
    normalizer: Arc<ErrorNormalizer>,
    attachments: Option<AttachmentResolver>,
    policy: DispatchPolicy,
}

impl Relay {
    pub fn new(submitter: Arc<dyn TxSubmitter>, normalizer: ErrorNormalizer) -> Self {
        Self {
            decoder: TransactionDecoder::default(),
            submitter,
            normalizer: Arc::new(normalizer),
            attachments: None,
            policy: DispatchPolicy::First,
        }
    }

    /// Wire a relay from config. An unresolvable provider is not fatal:
    /// every request then fails with the resolution error.
    pub fn from_config(config: &RelayConfig) -> Result<Self, BuildError> {
        let timeout = Duration::from_secs(config.provider.timeout_secs.max(1));

        let submitter: Arc<dyn TxSubmitter> = match ProviderConfig::resolve(&config.provider) {
            Ok(provider) => {
                tracing::info!(
                    kind = provider.kind.name(),
                    endpoint = %provider.endpoint,
                    "provider configured"
                );
                Arc::new(ProviderDispatcher::new(provider, timeout)?)
            }
            Err(e) => {
                tracing::error!(error = %e, "provider configuration invalid; requests will fail");
                Arc::new(UnconfiguredSubmitter::new(e))
            }
        };

        let normalizer = match &config.errors.table_path {
            Some(path) => ErrorNormalizer::with_file(path)?,
            None => ErrorNormalizer::builtin(),
        };

        let mut relay = Self::new(submitter, normalizer).with_policy(config.message.dispatch_policy);
        if config.message.mms {
            relay = relay.with_attachments(AttachmentResolver::new(&config.message.mms_suffix, timeout)?);
        }
        Ok(relay)
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_attachments(mut self, resolver: AttachmentResolver) -> Self {
        self.attachments = Some(resolver);
        self
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn mms_enabled(&self) -> bool {
        self.attachments.is_some()
    }

    pub async fn handle(&self, payload: &IncomingPayload) -> RelayResponse {
        if let Some(from) = payload.from.as_deref() {
            tracing::debug!(from, "inbound message");
        }

        match &self.attachments {
            Some(resolver) if !payload.has_body() && !payload.attachments.is_empty() => {
                self.handle_attachments(resolver, &payload.attachments).await
            }
            _ => match split(payload.body.as_deref()) {
                Ok(segments) => self.process_segments(&segments).await,
                Err(e) => {
                    tracing::debug!(error = %e, "rejecting message");
                    RelayResponse::failure(&e)
                }
            },
        }
    }

    async fn handle_attachments(&self, resolver: &AttachmentResolver, urls: &[String]) -> RelayResponse {
        let mut batches = pin!(resolver.resolve(urls));

        // Later attachments are never fetched once one has been dispatched.
        match batches.next().await {
            Some(segments) => self.process_segments(&segments).await,
            None => {
                tracing::warn!(attachments = urls.len(), "no attachment yielded a transaction");
                RelayResponse::failure(&RelayError::NoValidTransactions)
            }
        }
    }

    async fn process_segments(&self, segments: &[MessageSegment]) -> RelayResponse {
        match self.policy {
            DispatchPolicy::First => match segments.first() {
                Some(segment) => RelayResponse::Single(self.process_segment(segment).await),
                None => RelayResponse::failure(&RelayError::NoValidTransactions),
            },
            DispatchPolicy::All => {
                // Trailing newlines are not message parts.
                let end = segments
                    .iter()
                    .rposition(|s| !s.is_empty())
                    .map_or(0, |last| last + 1);
                let mut results = Vec::with_capacity(end);
                for segment in &segments[..end] {
                    results.push(self.process_segment(segment).await);
                }
                RelayResponse::Batch(results)
            }
        }
    }

    async fn process_segment(&self, segment: &MessageSegment) -> Formatted {
        let tx = match self.decoder.decode(segment) {
            Ok(tx) => tx,
            Err(e) => {
                tracing::warn!(error = %e, "message part rejected before submission");
                return Formatted::failure(None, &e);
            }
        };

        match self.submitter.submit(&tx).await {
            Ok(outcome) => Formatted::from_outcome(&tx, outcome, &self.normalizer),
            Err(e) => Formatted::failure(Some(&tx), &e),
        }
    }
}
