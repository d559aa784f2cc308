mod app;
mod cli;
mod signal;

use clap::Parser;
use tracing::debug;

use qme_observe::init_logger;

use crate::app::{App, AppConfig};
use crate::cli::Cli;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.logger_config()?)?;
    debug!(socket = %cli.socket.display(), "logger initialized");

    let job = cli.job()?;
    let app = App::new(AppConfig {
        socket_path: cli.socket.clone(),
        idle_window: cli.idle_window(),
    });
    app.run(job).await
}
