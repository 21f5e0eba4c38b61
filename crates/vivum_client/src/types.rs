use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque job identifier assigned by the backend when a fetch job is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque conversation identifier for chat queries against a fetched set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw payload of the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusReport {
    pub status: String,
}

/// Successful outcome of a monitor call. Completion is implied by the type;
/// the backend may have reported either `completed` or `ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobComplete {
    pub job_id: JobId,
}

/// Failure at the HTTP layer, before any status string is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("http status {0}")]
    Http(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Terminal outcome of a poll session, one variant per failure kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// The status request itself failed; the session ends immediately.
    #[error("status request failed: {source}")]
    Transport {
        #[source]
        source: ApiError,
    },
    /// Backend reported `failed` or an `error*`-prefixed status.
    #[error("job ended with status \"{status}\"")]
    JobFailed { status: String },
    /// Backend reported `timeout`.
    #[error("backend reported timeout")]
    JobTimedOut,
    /// No terminal status within the attempt ceiling or wall-clock budget.
    #[error("no terminal status after {attempts} polls")]
    PollCeilingExceeded { attempts: u32 },
    /// The caller cancelled the session; the call settles instead of hanging.
    #[error("monitoring cancelled")]
    Cancelled,
}
