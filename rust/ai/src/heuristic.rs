//! Rule-based policy.
//!
//! Used to warm-start the CFR tables, to finish hands past the street being
//! trained, and as a sparring partner in evaluation. It never fails: spots it
//! has no rule for resolve to a check or call.

use hucfr_engine::action::Action;
use hucfr_engine::cards::{Card, Rank};
use hucfr_engine::game::GameState;
use hucfr_engine::history::Street;
use hucfr_engine::rules::pot_odds;
use rand::{Rng, RngCore};

use crate::equity::{equity, OpponentProfile};
use crate::features::has_flush_draw;
use crate::ranges::{in_defend_range, in_open_range};
use crate::{AIOpponent, Decision};

/// Board texture read from the first three board cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Texture {
    Dry,
    Wet,
    Neutral,
}

/// Two or more of a suit, or a rank spread of at most four, is wet.
pub fn board_texture(board: &[Card]) -> Texture {
    if board.len() < 3 {
        return Texture::Neutral;
    }
    let flop = &board[..3];
    let suited = flop
        .iter()
        .any(|c| flop.iter().filter(|o| o.suit == c.suit).count() >= 2);
    if suited {
        return Texture::Wet;
    }
    let ranks = flop.iter().map(|c| c.rank.value());
    let spread = ranks.clone().max().unwrap_or(0) - ranks.min().unwrap_or(0);
    if spread <= 4 { Texture::Wet } else { Texture::Dry }
}

/// Value-bet range as fractions of the pot, shrunk in re-raised pots.
pub fn suggest_bet_size(texture: Texture, reraised: bool) -> (f64, f64) {
    let (low, high) = match texture {
        Texture::Dry => (0.33, 0.50),
        Texture::Wet => (0.66, 0.75),
        Texture::Neutral => (0.50, 0.66),
    };
    if reraised {
        (low * 0.75, high * 0.75)
    } else {
        (low, high)
    }
}

/// A pocket pair with a matching board card.
pub fn has_set(hole: [Card; 2], board: &[Card]) -> bool {
    hole[0].rank == hole[1].rank && board.iter().any(|c| c.rank == hole[0].rank)
}

/// The ace of a suit with exactly four cards on the board.
pub fn has_nut_blocker(hole: [Card; 2], board: &[Card]) -> bool {
    hole.iter().any(|h| {
        h.rank == Rank::Ace && board.iter().filter(|b| b.suit == h.suit).count() == 4
    })
}

/// Equity trial counts for the postflop rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicConfig {
    pub postflop_samples: u32,
    pub river_samples: u32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            postflop_samples: 20,
            river_samples: 30,
        }
    }
}

/// The rule-based action for `seat`, always at convention sizing.
pub fn heuristic_action<R: Rng + ?Sized>(
    state: &GameState,
    seat: usize,
    config: &HeuristicConfig,
    rng: &mut R,
) -> Action {
    let action = match state.street() {
        Street::Preflop => preflop(state, seat),
        Street::Flop | Street::Turn => postflop(state, seat, config, rng),
        Street::River => river(state, seat, config, rng),
    };
    // folding for free is never right
    if action == Action::Fold && state.to_call(seat) == 0 {
        Action::Call
    } else {
        action
    }
}

fn preflop(state: &GameState, seat: usize) -> Action {
    let hole = state.hole(seat);
    let raised = state.history().contains('r');

    if raised {
        return if in_defend_range(hole) { Action::Call } else { Action::Fold };
    }
    // blinds count as the first action, so a limp closes the round and the
    // only unraised preflop decision is the button's
    if seat == state.dealer() && state.history().is_empty() {
        return if in_open_range(hole) { Action::RaiseMedium } else { Action::Fold };
    }
    Action::Call
}

fn postflop<R: Rng + ?Sized>(
    state: &GameState,
    seat: usize,
    config: &HeuristicConfig,
    rng: &mut R,
) -> Action {
    let hole = state.hole(seat);
    let board = state.board();
    let to_call = state.to_call(seat);

    if has_set(hole, board) {
        let reraised = state.history().matches('r').count() >= 2;
        let (low, _) = suggest_bet_size(board_texture(board), reraised);
        return if low >= 0.55 { Action::RaiseMedium } else { Action::RaiseSmall };
    }
    if to_call == 0 {
        return if has_flush_draw(hole, board) { Action::RaiseSmall } else { Action::Call };
    }
    let eq = equity(hole, board, config.postflop_samples, OpponentProfile::Uniform, rng);
    if eq >= pot_odds(to_call, state.pot()) {
        Action::Call
    } else {
        Action::Fold
    }
}

fn river<R: Rng + ?Sized>(
    state: &GameState,
    seat: usize,
    config: &HeuristicConfig,
    rng: &mut R,
) -> Action {
    let hole = state.hole(seat);
    let board = state.board();
    let to_call = state.to_call(seat);
    let eq = equity(hole, board, config.river_samples, OpponentProfile::Uniform, rng);

    if to_call > 0 {
        return if eq >= pot_odds(to_call, state.pot()) { Action::Call } else { Action::Fold };
    }
    if has_nut_blocker(hole, board) {
        Action::RaiseLarge
    } else if eq >= 0.3 {
        Action::RaiseMedium
    } else {
        Action::Call
    }
}

/// [`AIOpponent`] wrapper around [`heuristic_action`].
///
/// # Example
///
/// ```rust
/// use hucfr_ai::heuristic::HeuristicAI;
/// use hucfr_ai::AIOpponent;
///
/// let ai = HeuristicAI::new();
/// assert_eq!(ai.name(), "HeuristicAI");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicAI {
    config: HeuristicConfig,
}

impl HeuristicAI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HeuristicConfig) -> Self {
        Self { config }
    }
}

impl AIOpponent for HeuristicAI {
    fn get_action(&self, state: &GameState, seat: usize, rng: &mut dyn RngCore) -> Decision {
        Decision::new(heuristic_action(state, seat, &self.config, rng))
    }

    fn name(&self) -> &str {
        "HeuristicAI"
    }
}
