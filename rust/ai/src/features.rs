//! Numeric description of a decision point, the input to bucketing.

use hucfr_engine::cards::Card;
use hucfr_engine::game::GameState;
use hucfr_engine::player::STARTING_STACK;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::equity::{equity, OpponentProfile};

/// Width of every feature vector.
pub const FEATURE_LEN: usize = 22;

pub type Features = [f64; FEATURE_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Monte Carlo trials behind the strength feature; kept small for speed
    pub equity_samples: u32,
    /// Normaliser for the pot features
    pub starting_stack: u32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            equity_samples: 20,
            starting_stack: STARTING_STACK,
        }
    }
}

/// Builds the feature vector.
///
/// Layout: hole (rank, suit) x2, five board slots (rank, suit) zero-padded,
/// pot / stack, position of the seat to act (0 on the button), raises in
/// `history`, flush draw, straight draw, board connectedness, equity,
/// pot / (pot + both stacks).
pub fn extract<R: Rng + ?Sized>(
    hole: [Card; 2],
    board: &[Card],
    pot: u32,
    position: usize,
    history: &str,
    config: &FeatureConfig,
    rng: &mut R,
) -> Features {
    let mut f = [0.0; FEATURE_LEN];
    for (i, c) in hole.iter().enumerate() {
        f[2 * i] = c.rank.value() as f64;
        f[2 * i + 1] = c.suit.index() as f64;
    }
    for (i, c) in board.iter().take(5).enumerate() {
        f[4 + 2 * i] = c.rank.value() as f64;
        f[4 + 2 * i + 1] = c.suit.index() as f64;
    }
    let stack = config.starting_stack.max(1) as f64;
    let pot = pot as f64;
    f[14] = pot / stack;
    f[15] = position as f64;
    f[16] = history.chars().filter(|&c| c == 'r').count() as f64;
    f[17] = flag(has_flush_draw(hole, board));
    f[18] = flag(has_straight_draw(hole, board));
    f[19] = board_connectedness(board);
    f[20] = equity(hole, board, config.equity_samples, OpponentProfile::Uniform, rng);
    f[21] = pot / (pot + 2.0 * stack);
    f
}

/// Features for `seat` deciding at `state`.
pub fn from_state<R: Rng + ?Sized>(
    state: &GameState,
    seat: usize,
    config: &FeatureConfig,
    rng: &mut R,
) -> Features {
    extract(
        state.hole(seat),
        state.board(),
        state.pot(),
        position(state, seat),
        state.history(),
        config,
        rng,
    )
}

/// 0 for the button, 1 for the big blind.
pub fn position(state: &GameState, seat: usize) -> usize {
    usize::from(seat != state.dealer())
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// A hole suit that already has two or more cards on the board.
pub fn has_flush_draw(hole: [Card; 2], board: &[Card]) -> bool {
    hole.iter()
        .any(|h| board.iter().filter(|b| b.suit == h.suit).count() >= 2)
}

/// Four consecutive ranks among hole and board, or A-2-3-4.
pub fn has_straight_draw(hole: [Card; 2], board: &[Card]) -> bool {
    let mut mask = 0u16;
    for c in hole.iter().chain(board) {
        mask |= 1 << c.rank.value();
    }
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    (1..=11).any(|low| (mask >> low) & 0b1111 == 0b1111)
}

/// Fraction of adjacent distinct board ranks that are one apart; 0 before
/// the flop.
pub fn board_connectedness(board: &[Card]) -> f64 {
    if board.len() < 3 {
        return 0.0;
    }
    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable();
    ranks.dedup();
    if ranks.len() < 2 {
        return 0.0;
    }
    let connected = ranks.windows(2).filter(|w| w[1] - w[0] == 1).count();
    connected as f64 / (ranks.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use hucfr_engine::cards::parse_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hole(s: &str) -> [Card; 2] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1]]
    }

    #[test]
    fn layout_and_padding() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = parse_cards("2c 3c 9d").unwrap();
        let f = extract(hole("Ah Kc"), &board, 100, 1, "rcr", &FeatureConfig::default(), &mut rng);
        assert_eq!(f[0], 14.0);
        assert_eq!(f[2], 13.0);
        assert_eq!(f[3], 0.0);
        assert_eq!(f[4], 2.0);
        assert_eq!(f[8], 9.0);
        assert_eq!(&f[10..14], &[0.0; 4]);
        assert!((f[14] - 0.1).abs() < 1e-12);
        assert_eq!(f[15], 1.0);
        assert_eq!(f[16], 2.0);
        assert_eq!(f[17], 1.0);
        assert_eq!(f[18], 0.0);
        assert!((0.0..=1.0).contains(&f[20]));
        assert!((f[21] - 100.0 / 2100.0).abs() < 1e-12);
    }

    #[test]
    fn straight_draws_including_wheel() {
        let board = parse_cards("3d 4s 9h").unwrap();
        assert!(has_straight_draw(hole("Ac 2h"), &board));
        assert!(has_straight_draw(hole("5c 6h"), &board));
        assert!(!has_straight_draw(hole("Kc Qh"), &board));
        let broadway = parse_cards("Qd Jh 2c").unwrap();
        assert!(has_straight_draw(hole("Ac Kh"), &broadway));
    }

    #[test]
    fn flush_draw_needs_two_board_cards_of_a_hole_suit() {
        let board = parse_cards("2h 7h Kc").unwrap();
        assert!(has_flush_draw(hole("Ah 3s"), &board));
        assert!(!has_flush_draw(hole("As 3s"), &board));
        assert!(!has_flush_draw(hole("Ah 3h"), &[]));
    }

    #[test]
    fn connectedness_ratio() {
        assert_eq!(board_connectedness(&parse_cards("5c 6d").unwrap()), 0.0);
        assert_eq!(board_connectedness(&parse_cards("5c 6d 7h").unwrap()), 1.0);
        assert_eq!(board_connectedness(&parse_cards("5c 6d Kh").unwrap()), 0.5);
        assert_eq!(board_connectedness(&parse_cards("5c 5d 5h").unwrap()), 0.0);
    }
}
