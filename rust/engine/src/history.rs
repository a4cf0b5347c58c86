use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::errors::GameError;

/// A betting street in Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards only
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Number of community cards visible on this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Separator between streets in a whole-hand history string.
pub const STREET_SEPARATOR: char = '/';

/// One applied action. `action` is the effective action after sizing rules,
/// so a raise that resolved to a call is recorded as `Call`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub street: Street,
    pub action: Action,
    /// Chips moved from stack to pot by this action
    pub chips: u32,
}

/// Compact, exact encoding of a single street's action history.
///
/// Two bits per action below a leading sentinel bit, so `""`, `"c"` and
/// `"cc"` never collide. Histories longer than 31 actions do not fit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HistoryKey(u64);

impl HistoryKey {
    pub const MAX_LEN: usize = 31;

    pub fn empty() -> Self {
        HistoryKey(1)
    }

    pub fn from_history(history: &str) -> Result<Self, GameError> {
        history
            .chars()
            .try_fold(Self::empty(), |key, ch| key.push(ch))
    }

    pub fn push(self, ch: char) -> Result<Self, GameError> {
        let code = match ch {
            'f' => 1,
            'c' => 2,
            'r' => 3,
            other => return Err(GameError::InvalidAction(other.to_string())),
        };
        if self.len() >= Self::MAX_LEN {
            return Err(GameError::HistoryOverflow);
        }
        Ok(HistoryKey((self.0 << 2) | code))
    }

    pub fn len(self) -> usize {
        ((63 - self.0.leading_zeros()) / 2) as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 1
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len()).rev() {
            let ch = match (self.0 >> (2 * i)) & 0b11 {
                1 => 'f',
                2 => 'c',
                _ => 'r',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
