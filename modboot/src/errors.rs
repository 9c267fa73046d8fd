//! Error types shared across the bootstrapper and module providers.

use thiserror::Error;

/// Result alias used throughout modboot.
pub type ModbootResult<T> = Result<T, ModbootError>;

#[derive(Debug, Error)]
pub enum ModbootError {
    /// The module could not be fetched, validated or linked.
    #[error("module load failed: {0}")]
    Load(String),

    /// The module's entry point reported a failure.
    #[error("module entry point failed: {0}")]
    Invocation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
