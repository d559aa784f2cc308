use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("job program is empty")]
    EmptyProgram,

    #[error("invalid environment entry: {0:?} (expected KEY=VALUE)")]
    InvalidEnvEntry(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
