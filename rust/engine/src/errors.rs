use thiserror::Error;

use crate::history::Street;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Blinds have not been posted")]
    BlindsNotPosted,
    #[error("Blinds already posted")]
    BlindsAlreadyPosted,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Raise not allowed: the betting round is already matched after a raise")]
    RaiseNotAllowed,
    #[error("Betting round on {0} is still open")]
    RoundNotClosed(Street),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("No seat {0} at a heads-up table")]
    InvalidSeat(usize),
    #[error("Invalid setup: {0}")]
    InvalidSetup(String),
    #[error("Action history too long to encode")]
    HistoryOverflow,
}
