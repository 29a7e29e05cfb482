//! HTTP handlers: the gateway webhook and liveness routes.

pub mod relay;
pub mod status;

use std::sync::Arc;

use txms_core::config::MessageConfig;
use txms_services::Relay;

#[derive(Clone)]
pub struct ApiState {
    pub relay: Arc<Relay>,
    /// Webhook field holding the message text.
    pub body_name: String,
    /// Webhook field holding attachment URLs.
    pub media_name: String,
    /// "<name> v<version>", served on /info.
    pub info: String,
}

impl ApiState {
    pub fn new(relay: Relay, message: &MessageConfig) -> Self {
        Self {
            relay: Arc::new(relay),
            body_name: message.body_name.clone(),
            media_name: message.media_name.clone(),
            info: format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }
}

// Re-export handler functions for use in router setup.
pub use relay::handle_relay;
pub use status::{handle_info, handle_ping, handle_root};
