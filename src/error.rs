// ABOUTME: Crate-wide error type for the cloudkms CLI
// ABOUTME: Collaborator failures keep their original message; nothing is retried

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Service error: {0}")]
    Service(String),
}
