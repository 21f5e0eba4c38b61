use std::time::Duration;

use crate::status::JobStatus;

/// Timing parameters for one poll session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    pub period: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(2000),
            max_attempts: 120,
        }
    }
}

impl PollSettings {
    /// Wall-clock budget for the whole session. The attempt ceiling assumes
    /// constant tick duration; slow responses stretch real elapsed time, so
    /// the session also trips on this deadline.
    pub fn deadline(&self) -> Duration {
        self.period * self.max_attempts
    }
}

/// Data handed to the progress sink on every poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Raw status string as reported by the backend.
    pub status: String,
    /// Message from the status lookup table.
    pub message: &'static str,
    pub attempts: u32,
    pub max_attempts: u32,
    /// Elapsed estimate: `attempts x period`.
    pub elapsed: Duration,
}

/// Why a session ended without success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// Backend reported `failed` or an `error*`-prefixed status.
    Reported { status: String },
    /// Backend reported `timeout`.
    ReportedTimeout,
    /// The attempt ceiling was reached without a terminal status.
    CeilingExceeded { attempts: u32 },
    /// Wall-clock deadline crossed before the attempt ceiling.
    DeadlineExceeded { attempts: u32, elapsed: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Succeeded,
    Failed(FailReason),
}

/// Outcome of applying one poll tick to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Continue(ProgressSnapshot),
    Done {
        snapshot: ProgressSnapshot,
        verdict: Verdict,
    },
}

/// One client-side polling loop for a single job.
///
/// The session is a value owned by its driver; it yields exactly one
/// [`Tick::Done`] and must not be advanced afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSession {
    settings: PollSettings,
    attempts: u32,
    finished: bool,
}

impl PollSession {
    pub fn new(settings: PollSettings) -> Self {
        Self {
            settings,
            attempts: 0,
            finished: false,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Applies one poll tick: counts the attempt, builds the snapshot for
    /// this tick, and classifies the reported status.
    ///
    /// Checks run in priority order: success, then reported failure, then
    /// the client-side limits. `wall_elapsed` is real time since the
    /// session started.
    pub fn advance(&mut self, status: &JobStatus, wall_elapsed: Duration) -> Tick {
        debug_assert!(!self.finished, "session advanced after terminal tick");
        self.attempts += 1;
        let snapshot = ProgressSnapshot {
            status: status.as_str().to_string(),
            message: status.message(),
            attempts: self.attempts,
            max_attempts: self.settings.max_attempts,
            elapsed: self.settings.period * self.attempts,
        };

        let verdict = if status.is_success() {
            Some(Verdict::Succeeded)
        } else if let Some(reason) = reported_failure(status) {
            Some(Verdict::Failed(reason))
        } else if self.attempts >= self.settings.max_attempts {
            Some(Verdict::Failed(FailReason::CeilingExceeded {
                attempts: self.attempts,
            }))
        } else if wall_elapsed >= self.settings.deadline() {
            Some(Verdict::Failed(FailReason::DeadlineExceeded {
                attempts: self.attempts,
                elapsed: wall_elapsed,
            }))
        } else {
            None
        };

        match verdict {
            Some(verdict) => {
                self.finished = true;
                Tick::Done { snapshot, verdict }
            }
            None => Tick::Continue(snapshot),
        }
    }
}

fn reported_failure(status: &JobStatus) -> Option<FailReason> {
    match status {
        JobStatus::Failed | JobStatus::Error(_) => Some(FailReason::Reported {
            status: status.as_str().to_string(),
        }),
        JobStatus::Timeout => Some(FailReason::ReportedTimeout),
        _ => None,
    }
}
