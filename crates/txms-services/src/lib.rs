//! txms-services: network-facing parts of the relay: provider submission,
//! MMS attachment fetching, and the decode-and-dispatch pipeline.

pub mod attachment;
pub mod provider;
pub mod relay;
pub mod submitter;

pub use attachment::AttachmentResolver;
pub use provider::ProviderDispatcher;
pub use relay::{BuildError, Relay, RelayResponse};
pub use submitter::{TxSubmitter, UnconfiguredSubmitter};
