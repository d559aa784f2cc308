//! Executor capability used by the worker loop to run one job at a time.
//!
//! The real implementation spawns OS subprocesses (`qme-exec`); tests plug in
//! recording fakes. Execution is fire-and-forget from the queue's
//! perspective: implementations log their own failures and report an
//! [`ExecOutcome`] instead of an error.
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use qme_model::Job;

/// How a single job execution terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Process exited with code zero.
    Succeeded,
    /// Process exited with a non-zero code.
    Failed {
        /// Exit code reported by the OS.
        code: i32,
    },
    /// Process was terminated by a signal.
    Signaled,
    /// Program could not be started (not found, permission denied).
    SpawnFailed,
    /// Cancellation was requested while the process was running.
    Canceled,
}

impl ExecOutcome {
    /// Return a label value for metrics and log classification.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ExecOutcome::Succeeded => "succeeded",
            ExecOutcome::Failed { .. } => "failed",
            ExecOutcome::Signaled => "signaled",
            ExecOutcome::SpawnFailed => "spawn-failed",
            ExecOutcome::Canceled => "canceled",
        }
    }
}

/// Generic job executor used by the worker loop.
///
/// `execute` runs the job to completion. If `cancel` fires while the job is
/// running, the implementation terminates it best-effort and reports
/// [`ExecOutcome::Canceled`]. Failures never propagate as errors; they are
/// terminal for that job only.
#[async_trait]
pub trait JobExecutor: Send + Sync + 'static {
    /// Run one job to completion and classify how it ended.
    async fn execute(&self, job: &Job, cancel: &CancellationToken) -> ExecOutcome;
}

/// Shared handle to an executor.
pub type ExecutorHandle = Arc<dyn JobExecutor>;

#[cfg(test)]
mod tests {
    use super::ExecOutcome;

    #[test]
    fn labels_are_distinct() {
        let outcomes = [
            ExecOutcome::Succeeded,
            ExecOutcome::Failed { code: 1 },
            ExecOutcome::Signaled,
            ExecOutcome::SpawnFailed,
            ExecOutcome::Canceled,
        ];

        for (i, a) in outcomes.iter().enumerate() {
            for b in &outcomes[i + 1..] {
                assert_ne!(a.as_label(), b.as_label());
            }
        }
    }

    #[test]
    fn failed_keeps_exit_code() {
        let outcome = ExecOutcome::Failed { code: 42 };
        assert_eq!(outcome, ExecOutcome::Failed { code: 42 });
        assert_eq!(outcome.as_label(), "failed");
    }
}
