//! Vivum client: HTTP API wrapper and job-status poll driver.
mod api;
mod chat;
mod poll;
mod request;
mod types;

pub use api::{ApiSettings, HttpVivumApi, VivumApi};
pub use chat::{ChatAnswer, Citation};
pub use poll::{monitor_progress, ChannelProgressSink, NullProgressSink, ProgressSink};
pub use request::{BooleanOperator, SearchFilters, SearchRequest, SearchSpec};
pub use types::{ApiError, ConversationId, JobComplete, JobId, PollError, StatusReport};
pub use vivum_core::{
    FailReason, JobStatus, PollSession, PollSettings, ProgressSnapshot, Tick, Verdict,
};
