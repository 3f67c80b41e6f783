use std::path::PathBuf;

use lection_context::ContextError;
use lection_domain::DomainError;
use thiserror::Error;

/// Everything that can stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot read settings from {}: {source}", path.display())]
    ReadSettings {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    ParseSettings {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Wiring failed: missing bean, cycle, or a factory error.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A service call failed, e.g. the author does not exist.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type AppResult<T> = Result<T, AppError>;
