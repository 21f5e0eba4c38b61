use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use vivum_core::{FailReason, JobStatus, PollSession, PollSettings, ProgressSnapshot, Tick, Verdict};
use vivum_logging::{vivum_debug, vivum_warn};

use crate::api::VivumApi;
use crate::types::{JobComplete, JobId, PollError};

/// Receives one snapshot per poll tick. Implementations must not panic;
/// a panicking sink unwinds through the monitor call.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, snapshot: ProgressSnapshot);
}

/// Forwards snapshots to a channel, for callers that render progress on
/// another task. Send failures are ignored; a dropped receiver just means
/// nobody is watching anymore.
pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<ProgressSnapshot>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<ProgressSnapshot>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, snapshot: ProgressSnapshot) {
        let _ = self.tx.send(snapshot);
    }
}

/// Sink for callers that only want the final outcome.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _snapshot: ProgressSnapshot) {}
}

/// Drives a fixed-period polling loop against the status endpoint until the
/// job reaches a terminal state.
///
/// The first poll happens one period after the call. Each tick awaits the
/// status request before running terminal checks, so ticks never overlap; a
/// slow response pushes later ticks out instead. The session, its interval,
/// and its attempt counter are all owned by this future, so concurrent
/// sessions for the same client cannot interfere and no timer outlives the
/// call.
///
/// The call settles exactly once: success on `completed`/`ready`, an error
/// for reported failures, client-side exhaustion, transport failures, or
/// cancellation. Cancelling through `cancel` settles with
/// [`PollError::Cancelled`]; no snapshot is emitted after that.
pub async fn monitor_progress(
    api: &dyn VivumApi,
    job_id: &JobId,
    settings: PollSettings,
    cancel: &CancellationToken,
    sink: &dyn ProgressSink,
) -> Result<JobComplete, PollError> {
    let started = Instant::now();
    let mut session = PollSession::new(settings.clone());
    let mut ticks = interval_at(started + settings.period, settings.period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                vivum_debug!(
                    "poll for job {job_id} cancelled after {} attempts",
                    session.attempts()
                );
                return Err(PollError::Cancelled);
            }
            _ = ticks.tick() => {}
        }

        let report = tokio::select! {
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            result = api.job_status(job_id) => {
                result.map_err(|source| PollError::Transport { source })?
            }
        };

        let status = JobStatus::parse(&report.status);
        match session.advance(&status, started.elapsed()) {
            Tick::Continue(snapshot) => {
                vivum_debug!(
                    "job {job_id} attempt {}/{}: {}",
                    snapshot.attempts,
                    snapshot.max_attempts,
                    snapshot.status
                );
                sink.emit(snapshot);
            }
            Tick::Done { snapshot, verdict } => {
                sink.emit(snapshot);
                return match verdict {
                    Verdict::Succeeded => {
                        vivum_debug!("job {job_id} completed after {} polls", session.attempts());
                        Ok(JobComplete {
                            job_id: job_id.clone(),
                        })
                    }
                    Verdict::Failed(reason) => {
                        let error = failure_error(reason);
                        vivum_warn!("job {job_id} did not complete: {error}");
                        Err(error)
                    }
                };
            }
        }
    }
}

fn failure_error(reason: FailReason) -> PollError {
    match reason {
        FailReason::Reported { status } => PollError::JobFailed { status },
        FailReason::ReportedTimeout => PollError::JobTimedOut,
        FailReason::CeilingExceeded { attempts }
        | FailReason::DeadlineExceeded { attempts, .. } => {
            PollError::PollCeilingExceeded { attempts }
        }
    }
}
