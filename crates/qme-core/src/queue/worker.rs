use std::future;
use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::executor::ExecutorHandle;
use crate::metrics::{MetricsHandle, noop_metrics};
use crate::queue::JobReceiver;

/// Single consuming loop that executes queued jobs serially and tracks
/// idle time.
///
/// The loop waits for either a new job or the idle deadline. Jobs run one at
/// a time; the executor call is awaited before the next job is pulled. The
/// idle deadline is re-armed each time a job finishes and starts out
/// disarmed, so a freshly started server does not shut down before its first
/// submission is processed. Once the deadline fires, the loop cancels the
/// shutdown token and terminates; it never resumes.
pub struct Worker {
    executor: ExecutorHandle,
    idle_window: Duration,
    shutdown: CancellationToken,
    kill: CancellationToken,
    metrics: MetricsHandle,
}

impl Worker {
    /// Create a worker loop.
    ///
    /// `shutdown` is cancelled by the worker when the idle window elapses;
    /// `kill` is observed by the executor to terminate a running job
    /// best-effort.
    pub fn new(
        executor: ExecutorHandle,
        idle_window: Duration,
        shutdown: CancellationToken,
        kill: CancellationToken,
    ) -> Self {
        Self {
            executor,
            idle_window,
            shutdown,
            kill,
            metrics: noop_metrics(),
        }
    }

    /// Replace the metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Run the loop until the idle window elapses or the job channel closes.
    pub async fn run(self, mut rx: JobReceiver) {
        let mut seq: u64 = 0;
        let mut idle_deadline: Option<Instant> = None;

        loop {
            let idle = async move {
                match idle_deadline {
                    Some(deadline) => time::sleep_until(deadline).await,
                    None => future::pending::<()>().await,
                }
            };

            tokio::select! {
                maybe_job = rx.recv() => match maybe_job {
                    Some(job) => {
                        seq += 1;
                        debug!(seq, job = %job, "worker: got job");

                        let started = Instant::now();
                        self.metrics.record_job_started(job.program());
                        let outcome = self.executor.execute(&job, &self.kill).await;
                        let elapsed_ms = started.elapsed().as_millis() as u64;
                        self.metrics
                            .record_job_completed(job.program(), &outcome, elapsed_ms);

                        info!(
                            seq,
                            job = %job,
                            outcome = outcome.as_label(),
                            elapsed_ms,
                            "job finished"
                        );
                        idle_deadline = Some(Instant::now() + self.idle_window);
                    }
                    None => {
                        debug!("job channel closed; worker stopping");
                        break;
                    }
                },
                _ = idle => {
                    info!(
                        idle_secs = self.idle_window.as_secs(),
                        "idle window elapsed; signaling shutdown"
                    );
                    self.shutdown.cancel();
                    break;
                }
            }
        }
    }
}
