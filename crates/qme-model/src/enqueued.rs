use std::fmt;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::Job;

/// Acknowledgment produced exactly once per accepted job.
///
/// Created at the moment a job is accepted into the queue, not when it
/// finishes executing. Returned to the submitter; carries no ownership back
/// to the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueuedJob {
    /// The accepted job, structurally identical to what was submitted.
    job: Job,
    /// Clock reading at submission time.
    #[serde(with = "time::serde::rfc3339")]
    enqueued_at: OffsetDateTime,
}

impl EnqueuedJob {
    /// Create an acknowledgment stamped with the given submission time.
    pub fn new(job: Job, enqueued_at: OffsetDateTime) -> Self {
        Self { job, enqueued_at }
    }

    /// Get the accepted job.
    pub fn job(&self) -> &Job {
        &self.job
    }

    /// Get the submission timestamp.
    pub fn enqueued_at(&self) -> OffsetDateTime {
        self.enqueued_at
    }
}

impl fmt::Display for EnqueuedJob {
    /// Formats as `<program> at <rfc3339>`, used for the client-side
    /// acknowledgment line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.enqueued_at.format(&Rfc3339) {
            Ok(ts) => write!(f, "{} at {}", self.job, ts),
            Err(_) => write!(f, "{} at <invalid-time>", self.job),
        }
    }
}
