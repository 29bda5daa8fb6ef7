use bytes::Bytes;
use tracing::warn;

use crate::types::Metadata;

pub const EVENT: &str = "event";
pub const JOB_UUID: &str = "job_uuid";
pub const RETURN_URL: &str = "return_url";

/// One incoming request from the transport layer: a metadata mapping, the
/// content payload (the script body for a start, unused for a cancel), and
/// the message id updates are correlated with.
#[derive(Clone, Debug)]
pub struct Request {
    pub metadata: Metadata,
    pub content: Bytes,
    pub message_id: String,
}

impl Request {
    pub fn new(metadata: Metadata, content: Bytes, message_id: impl Into<String>) -> Self {
        Self {
            metadata,
            content,
            message_id: message_id.into(),
        }
    }

    /// Decide the event kind, once, at the boundary. A missing field means
    /// `start` (legacy senders omit it), anything unrecognized is carried as
    /// `Unknown` for the dispatcher to log and drop.
    pub fn event(&self) -> Event {
        match self.metadata.get(EVENT).map(String::as_str) {
            None => {
                warn!("request metadata does not contain an event field, assuming 'start'");
                Event::Start
            }
            Some("start") => Event::Start,
            Some("cancel") => Event::Cancel,
            Some(other) => Event::Unknown(other.to_string()),
        }
    }

    pub fn job_uuid(&self) -> Option<&str> {
        self.metadata.get(JOB_UUID).map(String::as_str)
    }

    pub fn return_url(&self) -> &str {
        self.metadata
            .get(RETURN_URL)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Start,
    Cancel,
    Unknown(String),
}
