use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// The closed set of actions available at every decision point.
///
/// `Call` doubles as check when nothing is owed. Raise sizes are resolved by
/// [`crate::rules::validate_action`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Call,
    RaiseSmall,
    RaiseMedium,
    RaiseLarge,
}

pub const NUM_ACTIONS: usize = 5;

impl Action {
    pub const ALL: [Action; NUM_ACTIONS] = [
        Action::Fold,
        Action::Call,
        Action::RaiseSmall,
        Action::RaiseMedium,
        Action::RaiseLarge,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Action> {
        Self::ALL.get(i).copied()
    }

    pub fn is_raise(self) -> bool {
        matches!(
            self,
            Action::RaiseSmall | Action::RaiseMedium | Action::RaiseLarge
        )
    }

    /// History character: `f`, `c` or `r`.
    pub fn symbol(self) -> char {
        match self {
            Action::Fold => 'f',
            Action::Call => 'c',
            Action::RaiseSmall | Action::RaiseMedium | Action::RaiseLarge => 'r',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Call => "call",
            Action::RaiseSmall => "raise_small",
            Action::RaiseMedium => "raise_medium",
            Action::RaiseLarge => "raise_large",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single place action names are parsed.
///
/// ```
/// use hucfr_engine::action::Action;
///
/// assert_eq!("check".parse::<Action>().unwrap(), Action::Call);
/// assert_eq!("RAISE_LARGE".parse::<Action>().unwrap(), Action::RaiseLarge);
/// assert!("bet".parse::<Action>().is_err());
/// ```
impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fold" => Ok(Action::Fold),
            "c" | "k" | "call" | "check" => Ok(Action::Call),
            "rs" | "raise_small" | "small" => Ok(Action::RaiseSmall),
            "r" | "rm" | "raise" | "raise_medium" | "medium" => Ok(Action::RaiseMedium),
            "rl" | "raise_large" | "large" | "allin" | "all-in" | "shove" => {
                Ok(Action::RaiseLarge)
            }
            other => Err(GameError::InvalidAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for a in Action::ALL {
            assert_eq!(Action::from_index(a.index()), Some(a));
        }
        assert_eq!(Action::from_index(NUM_ACTIONS), None);
    }

    #[test]
    fn display_parses_back() {
        for a in Action::ALL {
            assert_eq!(a.to_string().parse::<Action>().unwrap(), a);
        }
    }
}
