//! Subprocess executor for queued jobs.
//!
//! Translates a [`qme_model::Job`] into a child process spawned via
//! `tokio::process::Command`, with the daemon's standard streams passed
//! through to the child.
mod error;
pub use error::ExecError;

mod subprocess;
pub use subprocess::SubprocessExecutor;
