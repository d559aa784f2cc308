//! Local-socket endpoint carrying the daemon's single remote operation.
//!
//! Both roles live here: [`EnqueueClient`] submits a job to a running daemon,
//! [`EnqueueServer`] receives jobs and forwards them into the queue through
//! an [`EnqueueHandler`]. The wire encoding is newline-delimited JSON; both
//! ends are the same binary, so it is not a compatibility contract.
mod error;
pub use error::IpcError;

mod wire;
pub use wire::{Request, Response};

mod handler;
pub use handler::EnqueueHandler;

mod adapter;
pub use adapter::QueueHandler;

mod client;
pub use client::EnqueueClient;

mod server;
pub use server::EnqueueServer;
