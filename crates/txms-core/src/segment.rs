//! Message body splitting.

use std::fmt;

use crate::error::RelayError;

/// One trimmed line of a message body. May be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSegment(String);

impl MessageSegment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MessageSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a message body on line feeds into trimmed segments.
///
/// An absent or blank body is `EmptyMessage`. Empty segments in the middle
/// of a body are kept; the decoder reports them.
pub fn split(body: Option<&str>) -> Result<Vec<MessageSegment>, RelayError> {
    let body = body.ok_or(RelayError::EmptyMessage)?;
    if body.trim().is_empty() {
        return Err(RelayError::EmptyMessage);
    }

    Ok(body
        .split('\n')
        .map(|part| MessageSegment(part.trim().to_string()))
        .collect())
}
