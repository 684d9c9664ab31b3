//! Logging error types

use thiserror::Error;

/// Errors from the logging subsystem
#[derive(Debug, Clone, Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitFailed(String),

    #[error("Unknown log level: {0}")]
    InvalidLevel(String),
}
