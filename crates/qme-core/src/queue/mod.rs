//! Ordered hand-off of jobs from producers to the single worker loop.
//!
//! Producers (the coordinator's own first job, remote submissions relayed by
//! the endpoint) share a cloneable [`JobQueue`] handle; exactly one
//! [`Worker`] consumes the other end and executes jobs serially.
mod worker;
pub use worker::Worker;

use tokio::sync::mpsc;
use tracing::debug;

use qme_model::{EnqueuedJob, Job};

use crate::clock::ClockHandle;
use crate::error::CoreError;

/// Receiving side of the job channel, consumed by [`Worker::run`].
pub type JobReceiver = mpsc::UnboundedReceiver<Job>;

/// Create the job channel and its submission handle.
pub fn job_channel(clock: ClockHandle) -> (JobQueue, JobReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (JobQueue { tx, clock }, rx)
}

/// Cloneable submission handle feeding the worker loop.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::UnboundedSender<Job>,
    clock: ClockHandle,
}

impl JobQueue {
    /// Accept a job into the queue.
    ///
    /// Returns the acknowledgment immediately, stamped with the current
    /// clock reading; the job becomes visible to the worker loop
    /// asynchronously and the caller never waits on job execution. Each
    /// producer's submissions keep their own order. Fails only when the
    /// worker loop has already stopped.
    pub fn submit(&self, job: Job) -> Result<EnqueuedJob, CoreError> {
        let enqueued = EnqueuedJob::new(job.clone(), self.clock.now());
        self.tx.send(job).map_err(|_| CoreError::QueueClosed)?;
        debug!(job = %enqueued.job(), "job accepted into queue");
        Ok(enqueued)
    }
}
