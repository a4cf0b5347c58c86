//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`run`](crate::run)
//! turns the error into a message on stderr and an exit code via
//! [`exit_code::for_error`](crate::exit_code::for_error).

use std::fmt;

use hucfr_ai::AiError;
use hucfr_engine::errors::GameError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine rejected an operation
    Engine(GameError),

    /// Training, loading or saving a model failed
    Model(String),

    /// Operation was interrupted (e.g., by user with Ctrl+C)
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Model(msg) => write!(f, "Model error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<AiError> for CliError {
    fn from(error: AiError) -> Self {
        match error {
            AiError::Game(e) => CliError::Engine(e),
            AiError::InvalidConfig(msg) => CliError::Config(msg),
            other => CliError::Model(other.to_string()),
        }
    }
}
