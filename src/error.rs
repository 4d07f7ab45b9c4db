//! Error types. Gameplay itself cannot fail; only the terminal, the config
//! file and the log sink can.

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error returned by the binary.
#[derive(Error, Debug)]
pub enum GameError {
    /// Terminal or other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded, saved or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log sink could not be set up
    #[error("Logging error: {0}")]
    Logging(String),
}
