use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::IpcError;
use crate::handler::EnqueueHandler;
use crate::wire::{self, Request, Response};

/// Server role of the endpoint: accept connections on the well-known
/// address and forward decoded jobs into the handler.
pub struct EnqueueServer<H> {
    socket_path: PathBuf,
    listener: UnixListener,
    handler: Arc<H>,
}

impl<H> EnqueueServer<H>
where
    H: EnqueueHandler,
{
    /// Remove any stale socket file and bind the address.
    ///
    /// Removal before bind is first-writer-wins: a leftover file from an
    /// uncleanly terminated server is cleared, and nothing fences against a
    /// genuine concurrent second server. A bind failure is fatal for
    /// server-role startup and is returned to the coordinator.
    pub fn bind(socket_path: impl Into<PathBuf>, handler: Arc<H>) -> Result<Self, IpcError> {
        let socket_path = socket_path.into();

        match std::fs::remove_file(&socket_path) {
            Ok(()) => debug!(path = %socket_path.display(), "removed stale socket file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %socket_path.display(), error = %e, "failed to remove stale socket file")
            }
        }

        let listener = UnixListener::bind(&socket_path).map_err(|source| IpcError::Bind {
            path: socket_path.clone(),
            source,
        })?;
        info!(path = %socket_path.display(), "listening");

        Ok(Self {
            socket_path,
            listener,
            handler,
        })
    }

    /// The address this server is bound to.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Accept connections until the stop token fires.
    ///
    /// Each connection is handled on its own task; per-connection failures
    /// are logged and never stop the accept loop. On stop the listener is
    /// closed and the socket file removed, so in-flight dials observe
    /// "server gone".
    pub async fn serve(self, stop: CancellationToken) {
        loop {
            tokio::select! {
                res = self.listener.accept() => match res {
                    Ok((stream, _addr)) => {
                        let handler = Arc::clone(&self.handler);
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, handler).await {
                                warn!(error = %e, "client connection failed");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "failed to accept connection");
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                },
                _ = stop.cancelled() => {
                    debug!("stop requested; closing listener");
                    break;
                }
            }
        }

        drop(self.listener);
        if let Err(e) = std::fs::remove_file(&self.socket_path) {
            if e.kind() != io::ErrorKind::NotFound {
                debug!(path = %self.socket_path.display(), error = %e, "socket cleanup failed");
            }
        }
        info!("server loop stopped");
    }
}

async fn handle_connection<H>(stream: UnixStream, handler: Arc<H>) -> Result<(), IpcError>
where
    H: EnqueueHandler,
{
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let Some(request) = wire::read_frame::<_, Request>(&mut reader).await? else {
        // Client connected and hung up without a request.
        return Ok(());
    };

    match request {
        Request::Enqueue(job) => {
            debug!(job = %job, "remote enqueue");
            let response = match handler.enqueue(job).await {
                Ok(enqueued) => Response::Enqueued(enqueued),
                Err(e) => Response::Error(e.to_string()),
            };
            wire::write_frame(&mut write_half, &response).await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use time::macros::datetime;
    use tokio_util::sync::CancellationToken;

    use qme_core::clock::ManualClock;
    use qme_core::queue::job_channel;
    use qme_model::{EnqueuedJob, Env, Job};

    use super::EnqueueServer;
    use crate::adapter::QueueHandler;
    use crate::client::EnqueueClient;
    use crate::handler::EnqueueHandler;
    use crate::IpcError;

    fn mk_job() -> Job {
        Job::new("/cwd", "sleep", vec!["1".into()], Env::new()).unwrap()
    }

    #[tokio::test]
    async fn round_trip_through_queue_handler() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qme.sock");

        let at = datetime!(2024-05-01 12:00:00 UTC);
        let clock = Arc::new(ManualClock::new(at));
        let (queue, mut rx) = job_channel(clock);

        let server = EnqueueServer::bind(&path, Arc::new(QueueHandler::new(queue))).unwrap();
        let stop = CancellationToken::new();
        let server_task = tokio::spawn(server.serve(stop.clone()));

        let client = EnqueueClient::new(&path);
        let enqueued = client.send(&mk_job()).await.unwrap();

        assert_eq!(enqueued.job(), &mk_job());
        assert_eq!(enqueued.enqueued_at(), at);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, mk_job());

        stop.cancel();
        server_task.await.unwrap();
    }

    #[tokio::test]
    async fn bind_replaces_a_stale_socket_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qme.sock");
        std::fs::write(&path, b"stale").unwrap();

        let clock = Arc::new(ManualClock::new(datetime!(2024-05-01 12:00:00 UTC)));
        let (queue, _rx) = job_channel(clock);

        let server = EnqueueServer::bind(&path, Arc::new(QueueHandler::new(queue))).unwrap();
        assert_eq!(server.socket_path(), path);
    }

    #[tokio::test]
    async fn bind_failure_is_fatal_not_silent() {
        let dir = tempfile::tempdir().unwrap();
        // Binding inside a non-existent directory must fail.
        let path = dir.path().join("no-such-dir").join("qme.sock");

        let clock = Arc::new(ManualClock::new(datetime!(2024-05-01 12:00:00 UTC)));
        let (queue, _rx) = job_channel(clock);

        let res = EnqueueServer::bind(&path, Arc::new(QueueHandler::new(queue)));
        assert!(matches!(res, Err(IpcError::Bind { .. })));
    }

    #[tokio::test]
    async fn stop_makes_the_address_dialable_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qme.sock");

        let clock = Arc::new(ManualClock::new(datetime!(2024-05-01 12:00:00 UTC)));
        let (queue, _rx) = job_channel(clock);

        let server = EnqueueServer::bind(&path, Arc::new(QueueHandler::new(queue))).unwrap();
        let stop = CancellationToken::new();
        let server_task = tokio::spawn(server.serve(stop.clone()));

        stop.cancel();
        server_task.await.unwrap();

        let client = EnqueueClient::new(&path);
        let res = client.send(&mk_job()).await;
        assert!(matches!(res, Err(ref e) if e.is_server_absent()));
    }

    #[tokio::test]
    async fn handler_errors_come_back_as_rejections() {
        struct RefusingHandler;

        #[async_trait]
        impl EnqueueHandler for RefusingHandler {
            async fn enqueue(&self, _job: Job) -> Result<EnqueuedJob, IpcError> {
                Err(IpcError::Queue(
                    qme_core::error::CoreError::QueueClosed,
                ))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qme.sock");

        let server = EnqueueServer::bind(&path, Arc::new(RefusingHandler)).unwrap();
        let stop = CancellationToken::new();
        let server_task = tokio::spawn(server.serve(stop.clone()));

        let client = EnqueueClient::new(&path);
        let res = client.send(&mk_job()).await;
        assert!(matches!(res, Err(IpcError::Rejected(_))));

        stop.cancel();
        server_task.await.unwrap();
    }
}
