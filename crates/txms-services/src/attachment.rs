//! MMS attachment resolution.
//!
//! Carriers deliver long messages as attachments. Only URLs whose path ends
//! with the carrier suffix are fetched; each fetched body is split exactly
//! like an SMS body. Fetch failures are logged and skipped.

use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use reqwest::Client as HttpClient;
use url::Url;

use txms_core::{split, MessageSegment};

#[derive(Clone)]
pub struct AttachmentResolver {
    http: HttpClient,
    /// Lowercased path suffix, e.g. ".txt".
    suffix: String,
}

impl AttachmentResolver {
    pub fn new(suffix: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent("txms")
            .build()?;
        Ok(Self::with_http_client(suffix, http))
    }

    pub fn with_http_client(suffix: &str, http: HttpClient) -> Self {
        Self {
            http,
            suffix: suffix.trim().to_ascii_lowercase(),
        }
    }

    /// Whether `url` names a message carrier. Query strings are ignored.
    pub fn is_carrier(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed.path().to_ascii_lowercase().ends_with(&self.suffix),
            Err(_) => false,
        }
    }

    /// Lazily fetch carrier attachments in order, yielding the segments of
    /// each one that could be fetched. Nothing is fetched until polled, and
    /// dropping the stream stops further fetches.
    pub fn resolve<'a>(
        &'a self,
        urls: &'a [String],
    ) -> impl Stream<Item = Vec<MessageSegment>> + 'a {
        let carriers = urls.iter().filter(move |url| {
            let carrier = self.is_carrier(url);
            if !carrier {
                tracing::debug!(url = %url, "skipping non-carrier attachment");
            }
            carrier
        });

        stream::iter(carriers)
            .then(move |url| self.fetch_segments(url))
            .filter_map(futures::future::ready)
    }

    async fn fetch_segments(&self, url: &str) -> Option<Vec<MessageSegment>> {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url, error = %e, "attachment fetch failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, %status, "attachment fetch returned error status");
            return None;
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url, error = %e, "attachment body unreadable");
                return None;
            }
        };

        let text = match String::from_utf8(body.to_vec()) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url, error = %e, "attachment is not UTF-8");
                return None;
            }
        };
        match split(Some(&text)) {
            Ok(segments) => {
                tracing::debug!(url, segments = segments.len(), "attachment resolved");
                Some(segments)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "attachment carries no message");
                None
            }
        }
    }
}
