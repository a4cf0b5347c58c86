//! Static preflop ranges for the two heads-up seats.

use hucfr_engine::cards::{hole_notation, Card};

/// Hands the button opens with, roughly half of all holdings by weight.
pub const BUTTON_OPEN: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "AKs", "AQs", "AJs", "KQs", "AKo",
    "AQo", "AJo", "KQo", "T9s", "98s", "87s", "76s", "65s", "KJo", "QJo", "JTo",
];

/// Hands the big blind continues with against a button raise.
pub const BIG_BLIND_DEFEND: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "AKs", "AQs", "AJs", "KQs", "AKo", "AQo", "AJo",
    "KJo", "QJo", "JTo", "T9s", "98s", "87s", "76s", "65s", "54s",
];

pub fn in_open_range(hole: [Card; 2]) -> bool {
    BUTTON_OPEN.contains(&hole_notation(&hole).as_str())
}

pub fn in_defend_range(hole: [Card; 2]) -> bool {
    BIG_BLIND_DEFEND.contains(&hole_notation(&hole).as_str())
}
