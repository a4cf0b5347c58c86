use hucfr_engine::errors::GameError;
use hucfr_engine::history::Street;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Model serialization failed: {0}")]
    Model(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Model has no {0} street")]
    MissingStreet(Street),
}
