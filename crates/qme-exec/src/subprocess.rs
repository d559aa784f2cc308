use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use qme_core::executor::{ExecOutcome, JobExecutor};
use qme_model::Job;

use crate::ExecError;

/// Executor that runs jobs as OS subprocesses.
///
/// The child inherits the daemon's stdin/stdout/stderr, so job output lands
/// on the server process's streams. The job environment replaces the
/// daemon's own environment entirely; the submitting process captured it
/// verbatim at invocation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubprocessExecutor;

impl SubprocessExecutor {
    /// Create a new subprocess executor.
    pub fn new() -> Self {
        Self
    }

    fn spawn(&self, job: &Job) -> Result<Child, ExecError> {
        let mut cmd = Command::new(job.program());
        cmd.args(job.args());
        cmd.current_dir(job.working_directory());
        cmd.env_clear();
        for kv in job.env().iter() {
            cmd.env(kv.key(), kv.value());
        }
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        cmd.spawn().map_err(|source| ExecError::Spawn {
            program: job.program().to_string(),
            source,
        })
    }
}

#[async_trait]
impl JobExecutor for SubprocessExecutor {
    async fn execute(&self, job: &Job, cancel: &CancellationToken) -> ExecOutcome {
        trace!(
            job = %job,
            args = ?job.args(),
            cwd = ?job.working_directory(),
            env_len = job.env().len(),
            "spawning subprocess"
        );

        let mut child = match self.spawn(job) {
            Ok(child) => child,
            Err(e) => {
                error!(error = %e, "job could not be started");
                return ExecOutcome::SpawnFailed;
            }
        };
        debug!(job = %job, pid = ?child.id(), "subprocess started");

        let status_fut = child.wait();
        tokio::select! {
            res = status_fut => match res {
                Ok(status) => classify(job, status),
                Err(source) => {
                    let e = ExecError::Wait {
                        program: job.program().to_string(),
                        source,
                    };
                    error!(error = %e, "treating wait failure as abnormal termination");
                    ExecOutcome::Signaled
                }
            },
            _ = cancel.cancelled() => {
                debug!(job = %job, "cancellation requested; killing subprocess");
                if let Err(e) = child.kill().await {
                    debug!(job = %job, "failed to kill subprocess: {e}");
                }
                ExecOutcome::Canceled
            }
        }
    }
}

/// Map an exit status onto an outcome, logging the exit detail.
fn classify(job: &Job, status: ExitStatus) -> ExecOutcome {
    match status.code() {
        Some(0) => {
            debug!(job = %job, "job exited successfully");
            ExecOutcome::Succeeded
        }
        Some(code) => {
            warn!(job = %job, code, "job exited with non-zero code");
            ExecOutcome::Failed { code }
        }
        None => {
            warn!(job = %job, signal = ?status.signal(), "job terminated by signal");
            ExecOutcome::Signaled
        }
    }
}
