use async_trait::async_trait;

use qme_model::{EnqueuedJob, Job};

use crate::IpcError;

/// Server-side sink for decoded enqueue requests.
///
/// This trait abstracts the queue behind the endpoint, allowing tests to
/// plug in fakes and keeping the transport free of scheduling concerns.
#[async_trait]
pub trait EnqueueHandler: Send + Sync + 'static {
    /// Accept a job and return the acknowledgment to send back.
    async fn enqueue(&self, job: Job) -> Result<EnqueuedJob, IpcError>;
}
