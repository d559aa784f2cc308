use async_trait::async_trait;

use qme_core::queue::JobQueue;
use qme_model::{EnqueuedJob, Job};

use crate::IpcError;
use crate::handler::EnqueueHandler;

/// Adapter that bridges the worker's [`JobQueue`] to [`EnqueueHandler`].
///
/// This is the implementation the daemon wires in: remote submissions land
/// in the same queue as the server's own first job.
pub struct QueueHandler {
    queue: JobQueue,
}

impl QueueHandler {
    /// Create a new adapter around the given queue handle.
    pub fn new(queue: JobQueue) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl EnqueueHandler for QueueHandler {
    async fn enqueue(&self, job: Job) -> Result<EnqueuedJob, IpcError> {
        self.queue.submit(job).map_err(IpcError::from)
    }
}
