pub mod clock;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod queue;

pub mod prelude {
    pub use crate::clock::{Clock, ClockHandle, ManualClock, SystemClock, system_clock};
    pub use crate::error::CoreError;
    pub use crate::executor::{ExecOutcome, ExecutorHandle, JobExecutor};
    pub use crate::metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};
    pub use crate::queue::{JobQueue, JobReceiver, Worker, job_channel};
}
