use std::fmt;

use serde::Serialize;

/// One reported fact about a job: an output chunk or the final exit code.
///
/// Updates serialize to the records the reporting sink ships over the wire:
/// `{"type":"output","stream":"stdout","content":…}` and
/// `{"type":"exit","code":…}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Update {
    Output { stream: StreamKind, content: String },
    Exit { code: i32 },
}

impl Update {
    pub fn output(stream: StreamKind, content: impl Into<String>) -> Self {
        Update::Output {
            stream,
            content: content.into(),
        }
    }

    pub fn exit(code: i32) -> Self {
        Update::Exit { code }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
