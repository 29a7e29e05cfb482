//! Inbound webhook payload.

use serde_json::Value;

/// The parts of a gateway webhook the relay cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingPayload {
    pub body: Option<String>,
    /// Attachment URLs in delivery order.
    pub attachments: Vec<String>,
    /// Sender number, logged only.
    pub from: Option<String>,
}

impl IncomingPayload {
    /// Extract the payload from a webhook JSON object using the configured
    /// field names. A non-string body counts as absent; non-string
    /// attachment entries are ignored. A lone string in the attachment
    /// field is accepted as a single URL.
    pub fn from_json(value: &Value, body_field: &str, media_field: &str) -> Self {
        let body = value
            .get(body_field)
            .and_then(Value::as_str)
            .map(str::to_string);

        let attachments = match value.get(media_field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(url)) => vec![url.clone()],
            _ => Vec::new(),
        };

        let from = value.get("from").and_then(Value::as_str).map(str::to_string);

        Self {
            body,
            attachments,
            from,
        }
    }

    /// True when the body carries something other than whitespace.
    pub fn has_body(&self) -> bool {
        self.body.as_deref().is_some_and(|b| !b.trim().is_empty())
    }
}
