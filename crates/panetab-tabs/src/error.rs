//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Maximum number of tabs reached ({max})")]
    CapacityExceeded { max: usize },

    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Invalid drop: {0}")]
    InvalidDrop(String),

    #[error("Invalid drag transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
