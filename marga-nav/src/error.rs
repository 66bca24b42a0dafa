//! Error types for MargaNav
//!
//! Navigation itself never fails: `Navigator::move_to` reports its result
//! through [`NavOutcome`](crate::NavOutcome). These errors cover the
//! surfaces around it (configuration, scenario files, I/O).

use thiserror::Error;

/// MargaNav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
