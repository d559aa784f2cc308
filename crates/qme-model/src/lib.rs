mod domain;
pub use domain::{Env, KeyValue};

mod error;
pub use error::{ModelError, ModelResult};

mod job;
pub use job::Job;

mod enqueued;
pub use enqueued::EnqueuedJob;
