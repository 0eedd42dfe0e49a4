//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("pin path must not be empty")]
    EmptyPath,
}
