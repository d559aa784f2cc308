use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use qme_model::{Env, Job};
use qme_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

/// Queue a command on the local execution daemon.
///
/// The first invocation becomes the daemon and runs its own command; every
/// later invocation forwards its command to the running daemon and exits
/// immediately. The daemon shuts itself down after the idle window.
#[derive(Debug, Parser)]
#[command(name = "qme", version, about)]
pub struct Cli {
    /// Path of the daemon's Unix socket.
    #[arg(
        long,
        env = "QME_SOCKET",
        default_value = "/tmp/qme.sock",
        value_name = "PATH"
    )]
    pub socket: PathBuf,

    /// Seconds of inactivity after which the daemon shuts itself down.
    #[arg(
        long,
        env = "QME_IDLE_TIMEOUT",
        default_value_t = 20,
        value_name = "SECONDS"
    )]
    pub idle_timeout: u64,

    /// Log level filter expression (e.g. "info", "qme_core=debug,info").
    #[arg(long, env = "QME_LOG", default_value = "info", value_name = "FILTER")]
    pub log_level: String,

    /// Log output format: text, json or journald.
    #[arg(
        long,
        env = "QME_LOG_FORMAT",
        default_value = "text",
        value_name = "FORMAT"
    )]
    pub log_format: String,

    /// Program to run, followed by its arguments.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "PROGRAM [ARGS]..."
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Build the logger configuration from the parsed flags.
    pub fn logger_config(&self) -> anyhow::Result<LoggerConfig> {
        Ok(LoggerConfig {
            format: self.log_format.parse::<LoggerFormat>()?,
            level: self.log_level.parse::<LoggerLevel>()?,
            ..Default::default()
        })
    }

    /// Inactivity window for the server role.
    pub fn idle_window(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }

    /// Capture the invocation into a job.
    ///
    /// The working directory and the full process environment are recorded
    /// here, at parse time, and travel with the job.
    pub fn job(&self) -> anyhow::Result<Job> {
        let cwd = std::env::current_dir().context("determine working directory")?;
        let env: Env = std::env::vars().collect();

        let program = self.command[0].clone();
        let args = self.command[1..].to_vec();
        Job::new(cwd, program, args, env).context("assemble job")
    }
}
