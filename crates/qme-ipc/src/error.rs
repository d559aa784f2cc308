use std::{io, path::PathBuf};

use thiserror::Error;

use qme_core::error::CoreError;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("no daemon listening on {}: {source}", path.display())]
    ServerAbsent {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {}: {source}", path.display())]
    Bind {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o failure during call: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode or decode message: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("server rejected job: {0}")]
    Rejected(String),

    #[error("connection closed before a response arrived")]
    ConnectionClosed,

    #[error(transparent)]
    Queue(#[from] CoreError),
}

impl IpcError {
    /// `true` when the failure means "no server present", the expected
    /// trigger for server-role promotion rather than a fault.
    pub fn is_server_absent(&self) -> bool {
        matches!(self, IpcError::ServerAbsent { .. })
    }
}
