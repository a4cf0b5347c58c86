//! Monte Carlo equity against a sampled opponent hand.

use std::fmt;
use std::str::FromStr;

use hucfr_engine::cards::Card;
use hucfr_engine::deck::live_cards;
use hucfr_engine::hand::evaluate_hand;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::errors::AiError;

/// Which opponent hole pairs the estimator samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentProfile {
    /// Any two cards
    #[default]
    Uniform,
    /// Pairs 77+, two broadway cards, suited aces
    Tight,
    /// Any pair, suited hand, connector or one-gapper, or a ten-plus card
    Loose,
    /// Any pair, J8+ type hands, suited connectors
    Balanced,
}

impl OpponentProfile {
    pub fn admits(self, hole: [Card; 2]) -> bool {
        let (a, b) = (hole[0].rank.value(), hole[1].rank.value());
        let (high, low) = (a.max(b), a.min(b));
        let pair = high == low;
        let suited = hole[0].suit == hole[1].suit;
        let gap = high - low;
        match self {
            OpponentProfile::Uniform => true,
            OpponentProfile::Tight => {
                (pair && high >= 7) || (low >= 10 && high >= 12) || (suited && high == 14)
            }
            OpponentProfile::Loose => pair || suited || gap <= 2 || high >= 10,
            OpponentProfile::Balanced => {
                pair || (high >= 11 && low >= 8) || (suited && gap == 1)
            }
        }
    }
}

impl fmt::Display for OpponentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpponentProfile::Uniform => "uniform",
            OpponentProfile::Tight => "tight",
            OpponentProfile::Loose => "loose",
            OpponentProfile::Balanced => "balanced",
        };
        f.write_str(s)
    }
}

impl FromStr for OpponentProfile {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "random" | "any" => Ok(OpponentProfile::Uniform),
            "tight" => Ok(OpponentProfile::Tight),
            "loose" => Ok(OpponentProfile::Loose),
            "balanced" => Ok(OpponentProfile::Balanced),
            other => Err(AiError::InvalidConfig(format!(
                "unknown opponent profile '{other}'"
            ))),
        }
    }
}

/// Estimates the probability that `hole` wins at showdown, counting ties as
/// half, against an opponent pair drawn from `profile` and a random board
/// completion.
///
/// Returns 0.0 when `simulations` is zero. If no live pair fits the profile
/// the estimator samples from all live cards instead.
///
/// ```
/// use hucfr_ai::equity::{equity, OpponentProfile};
/// use hucfr_engine::cards::parse_cards;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let hole = parse_cards("As Ad").unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let eq = equity([hole[0], hole[1]], &[], 2_000, OpponentProfile::Uniform, &mut rng);
/// assert!(eq > 0.75 && eq < 0.92);
/// ```
pub fn equity<R: Rng + ?Sized>(
    hole: [Card; 2],
    board: &[Card],
    simulations: u32,
    profile: OpponentProfile,
    rng: &mut R,
) -> f64 {
    if simulations == 0 {
        return 0.0;
    }
    let mut dead = hole.to_vec();
    dead.extend_from_slice(board);
    let live = live_cards(&dead);
    let missing = 5usize.saturating_sub(board.len());
    if live.len() < 2 + missing {
        return 0.0;
    }

    let range: Vec<[Card; 2]> = match profile {
        OpponentProfile::Uniform => Vec::new(),
        p => live_pairs(&live)
            .into_iter()
            .filter(|&h| p.admits(h))
            .collect(),
    };

    let mut pool = live.clone();
    let mut score = 0.0f64;
    let mut full_board = Vec::with_capacity(5);
    let mut mine = Vec::with_capacity(7);
    let mut theirs = Vec::with_capacity(7);
    for _ in 0..simulations {
        let (opp, runout): ([Card; 2], &[Card]) = match range.choose(rng) {
            Some(&opp) => {
                pool.clear();
                pool.extend(live.iter().copied().filter(|c| !opp.contains(c)));
                let (drawn, _) = pool.partial_shuffle(rng, missing);
                (opp, &*drawn)
            }
            None => {
                // the pool still holds every live card, only reordered
                let (drawn, _) = pool.partial_shuffle(rng, 2 + missing);
                ([drawn[0], drawn[1]], &drawn[2..])
            }
        };

        full_board.clear();
        full_board.extend_from_slice(board);
        full_board.extend_from_slice(runout);
        mine.clear();
        mine.extend_from_slice(&full_board);
        mine.extend_from_slice(&hole);
        theirs.clear();
        theirs.extend_from_slice(&full_board);
        theirs.extend_from_slice(&opp);

        score += match evaluate_hand(&mine).cmp(&evaluate_hand(&theirs)) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        };
    }
    score / simulations as f64
}

fn live_pairs(live: &[Card]) -> Vec<[Card; 2]> {
    let mut out = Vec::with_capacity(live.len() * live.len() / 2);
    for (i, &a) in live.iter().enumerate() {
        for &b in &live[i + 1..] {
            out.push([a, b]);
        }
    }
    out
}
