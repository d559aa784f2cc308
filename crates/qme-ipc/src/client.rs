use std::path::PathBuf;

use tokio::io::BufReader;
use tokio::net::UnixStream;
use tracing::debug;

use qme_model::{EnqueuedJob, Job};

use crate::IpcError;
use crate::wire::{self, Request, Response};

/// Client role of the endpoint: submit one job to a running daemon.
pub struct EnqueueClient {
    socket_path: PathBuf,
}

impl EnqueueClient {
    /// Create a client dialing the given socket path.
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    /// Send a job to the daemon and wait for its acknowledgment.
    ///
    /// A connect failure maps to [`IpcError::ServerAbsent`], the expected
    /// outcome when no daemon is running, distinguishable from failures of
    /// the call itself. Dial attempts fail fast; they never hang.
    pub async fn send(&self, job: &Job) -> Result<EnqueuedJob, IpcError> {
        let stream = match UnixStream::connect(&self.socket_path).await {
            Ok(stream) => stream,
            Err(source) => {
                return Err(IpcError::ServerAbsent {
                    path: self.socket_path.clone(),
                    source,
                });
            }
        };
        debug!(path = %self.socket_path.display(), "connected to running daemon");

        let (read_half, mut write_half) = stream.into_split();
        wire::write_frame(&mut write_half, &Request::Enqueue(job.clone())).await?;

        let mut reader = BufReader::new(read_half);
        match wire::read_frame::<_, Response>(&mut reader).await? {
            Some(Response::Enqueued(enqueued)) => Ok(enqueued),
            Some(Response::Error(reason)) => Err(IpcError::Rejected(reason)),
            None => Err(IpcError::ConnectionClosed),
        }
    }
}
