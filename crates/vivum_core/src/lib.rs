//! Vivum core: pure poll-session state machine and status vocabulary.
mod session;
mod status;

pub use session::{FailReason, PollSession, PollSettings, ProgressSnapshot, Tick, Verdict};
pub use status::JobStatus;
