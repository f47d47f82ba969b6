use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdaterError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("launch error: {0}")]
    Launch(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
