use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use qme_core::clock::system_clock;
use qme_core::queue::{Worker, job_channel};
use qme_exec::SubprocessExecutor;
use qme_ipc::{EnqueueClient, EnqueueServer, QueueHandler};
use qme_model::Job;

use crate::signal;

/// Daemon configuration resolved from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Well-known socket address shared by both endpoint roles.
    pub socket_path: PathBuf,
    /// Inactivity window after which the server shuts itself down.
    pub idle_window: Duration,
}

/// Coordinator tying queue, executor and endpoint together.
///
/// `run` decides the process role: client when a daemon is already
/// listening on the address, server otherwise. Either way the process
/// terminates exactly once, through this type.
pub struct App {
    config: AppConfig,
}

impl App {
    /// Create the coordinator.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Forward the job to a running daemon, or become the daemon.
    pub async fn run(&self, job: Job) -> anyhow::Result<()> {
        let client = EnqueueClient::new(&self.config.socket_path);
        match client.send(&job).await {
            Ok(enqueued) => {
                info!(job = %enqueued.job(), "job forwarded to running daemon");
                println!("enqueued {enqueued}");
                Ok(())
            }
            Err(e) if e.is_server_absent() => {
                debug!(error = %e, "no daemon reachable");
                self.run_server(job).await
            }
            // Dial worked but the call failed: report it instead of racing
            // a live daemon for the socket.
            Err(e) => Err(e).context("forward job to daemon"),
        }
    }

    /// Server role: bind the endpoint, run the worker, block until idle
    /// timeout or a termination signal, then tear down.
    async fn run_server(&self, job: Job) -> anyhow::Result<()> {
        info!("assuming server role");

        let (queue, rx) = job_channel(system_clock());
        let shutdown = CancellationToken::new();
        let kill = CancellationToken::new();
        let worker = Worker::new(
            Arc::new(SubprocessExecutor::new()),
            self.config.idle_window,
            shutdown.clone(),
            kill.clone(),
        );
        let worker_task = tokio::spawn(worker.run(rx));

        let handler = Arc::new(QueueHandler::new(queue.clone()));
        let server =
            EnqueueServer::bind(&self.config.socket_path, handler).context("bind daemon socket")?;
        let stop = CancellationToken::new();
        let server_task = tokio::spawn(server.serve(stop.clone()));

        // The invoking command is the daemon's own first job.
        let first = queue.submit(job).context("queue own job")?;
        info!(job = %first.job(), "queued own job");

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("queue went idle; shutting down");
            }
            res = signal::wait_for_termination() => {
                res?;
                // A running job must not hold the shutdown hostage.
                kill.cancel();
            }
        }

        stop.cancel();
        server_task.await.context("endpoint server loop")?;
        drop(queue);
        worker_task.await.context("worker loop")?;

        info!("daemon stopped");
        Ok(())
    }
}
