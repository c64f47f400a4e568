//! Shared error taxonomy for cloud providers

use thiserror::Error;

/// Errors surfaced by provider operations
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid parameter: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Gave up waiting for {what} after {attempts} attempts")]
    Exhausted { what: String, attempts: u32 },
}

pub type Result<T> = std::result::Result<T, CloudError>;
