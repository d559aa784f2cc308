use std::sync::Arc;

use crate::executor::ExecOutcome;

/// Backend metrics collection interface.
///
/// Implementations are injected into the worker loop and invoked once per
/// job around the executor call.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record that a job was pulled from the queue and started executing.
    fn record_job_started(&self, program: &str);

    /// Record job completion with outcome and duration.
    ///
    /// Called when the executor returns, whatever the outcome.
    fn record_job_completed(&self, program: &str, outcome: &ExecOutcome, duration_ms: u64);
}

/// Shared handle to a metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
