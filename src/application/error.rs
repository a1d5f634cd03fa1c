//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add I/O-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("asset not found: {0}")]
    AssetMissing(PathBuf),

    #[error("filesystem error: {context}")]
    Filesystem {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
