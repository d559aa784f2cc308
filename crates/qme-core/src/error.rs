use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("job queue is closed: the worker loop has stopped")]
    QueueClosed,
}
