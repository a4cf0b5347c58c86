//! Play-time decisions from a trained model.

use hucfr_engine::action::Action;
use hucfr_engine::cards::Card;
use hucfr_engine::game::GameState;
use hucfr_engine::rules::{default_raise_size, pot_odds};
use rand::{Rng, RngCore};
use tracing::debug;

use crate::cfr::{sample_action, Strategy, TrainedModel, UNIFORM};
use crate::equity::{equity, OpponentProfile};
use crate::{AIOpponent, Decision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotOptions {
    /// Equity checks around the sampled strategy; off means pure strategy
    pub guard_rails: bool,
    /// Trials for the facing-a-bet equity
    pub call_samples: u32,
    /// Trials for re-checking a large opening raise
    pub raise_samples: u32,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            guard_rails: true,
            call_samples: 500,
            raise_samples: 2_000,
        }
    }
}

/// Decision for `seat` with the default options.
pub fn bot_decide<R: Rng + ?Sized>(
    state: &GameState,
    seat: usize,
    model: &TrainedModel,
    rng: &mut R,
) -> Decision {
    bot_decide_with(state, seat, model, &BotOptions::default(), rng)
}

/// Chooses an action and raise size for `seat`.
///
/// Facing a bet (with guard rails): equity against pot odds decides between
/// fold, call, a pot-sized raise and a shove, and a seat that cannot cover
/// the bet always calls all-in. Otherwise the action is sampled from the
/// model's average strategy for the seat's info set, uniform when the model
/// lacks the street or the info set. A sampled raise worth more than a tenth
/// of the stack is re-checked against equity. The result is always legal:
/// raises are clamped to what both stacks allow and fall back to a call,
/// and a fold with nothing to call becomes a check.
pub fn bot_decide_with<R: Rng + ?Sized>(
    state: &GameState,
    seat: usize,
    model: &TrainedModel,
    options: &BotOptions,
    rng: &mut R,
) -> Decision {
    let to_call = state.to_call(seat);
    let pot = state.pot();
    let stack = state.players()[seat].stack();
    let hole = state.hole(seat);
    let board = state.board();

    let raw = if options.guard_rails && to_call > 0 {
        facing_bet(hole, board, pot, stack, to_call, options, rng)
    } else {
        let action = sample_action(&strategy_for(state, seat, model, rng), rng);
        let amount = action
            .is_raise()
            .then(|| default_raise_size(action, pot, stack));
        match amount {
            Some(a) if options.guard_rails && a as f64 > stack as f64 * 0.1 => {
                recheck_raise(hole, board, pot, stack, a, options, rng)
            }
            _ => Decision { action, amount },
        }
    };
    legalize(state, seat, raw)
}

fn strategy_for<R: Rng + ?Sized>(
    state: &GameState,
    seat: usize,
    model: &TrainedModel,
    rng: &mut R,
) -> Strategy {
    let Some(sm) = model.street(state.street()) else {
        debug!(street = %state.street(), "no model for street, playing uniform");
        return UNIFORM;
    };
    match sm.classify(state, seat, rng) {
        Ok(Some(key)) => sm.average_strategy(&key).unwrap_or_else(|| {
            debug!(street = %state.street(), bucket = key.bucket, history = state.history(), "unseen info set, playing uniform");
            UNIFORM
        }),
        Ok(None) | Err(_) => {
            debug!(street = %state.street(), "state not classifiable, playing uniform");
            UNIFORM
        }
    }
}

fn facing_bet<R: Rng + ?Sized>(
    hole: [Card; 2],
    board: &[Card],
    pot: u32,
    stack: u32,
    to_call: u32,
    options: &BotOptions,
    rng: &mut R,
) -> Decision {
    if stack > 0 && stack < to_call {
        return Decision::new(Action::Call);
    }
    let eq = if board_is_paired(board) {
        0.5
    } else {
        equity(hole, board, options.call_samples, OpponentProfile::Uniform, rng)
    };
    if eq <= pot_odds(to_call, pot) {
        Decision::new(Action::Fold)
    } else if eq < 0.65 {
        Decision::new(Action::Call)
    } else if eq < 0.90 {
        Decision::sized(Action::RaiseMedium, pot.max(1).min(stack.saturating_sub(to_call)))
    } else {
        Decision::sized(Action::RaiseLarge, stack.saturating_sub(to_call))
    }
}

fn recheck_raise<R: Rng + ?Sized>(
    hole: [Card; 2],
    board: &[Card],
    pot: u32,
    stack: u32,
    raise: u32,
    options: &BotOptions,
    rng: &mut R,
) -> Decision {
    let eq = equity(hole, board, options.raise_samples, OpponentProfile::Uniform, rng);
    let odds_after = pot_odds(raise, pot);
    if eq <= odds_after {
        Decision::new(Action::Call)
    } else if eq < 0.70 {
        Decision::sized(Action::RaiseSmall, (pot / 2).max(1))
    } else if eq < 0.90 {
        Decision::sized(Action::RaiseMedium, pot.max(1))
    } else {
        Decision::sized(Action::RaiseLarge, stack)
    }
}

fn board_is_paired(board: &[Card]) -> bool {
    board
        .iter()
        .enumerate()
        .any(|(i, c)| board[..i].iter().any(|o| o.rank == c.rank))
}

/// Clamps raises to `min(stack - to_call, opponent stack)`, turning raises
/// with nothing left to add (or not allowed) into calls and free folds into
/// checks.
fn legalize(state: &GameState, seat: usize, decision: Decision) -> Decision {
    let to_call = state.to_call(seat);
    match decision.action {
        Action::Fold if to_call == 0 => Decision::new(Action::Call),
        Action::Fold | Action::Call => Decision::new(decision.action),
        raise => {
            if !state.can_raise(seat) {
                return Decision::new(Action::Call);
            }
            let stack = state.players()[seat].stack();
            let cap = stack
                .saturating_sub(to_call)
                .min(state.players()[1 - seat].stack());
            let requested = decision
                .amount
                .unwrap_or_else(|| default_raise_size(raise, state.pot(), stack));
            match requested.min(cap) {
                0 => Decision::new(Action::Call),
                amount => Decision::sized(raise, amount),
            }
        }
    }
}

/// [`AIOpponent`] that plays a trained model through [`bot_decide_with`].
#[derive(Debug, Clone)]
pub struct CfrBot {
    model: TrainedModel,
    options: BotOptions,
}

impl CfrBot {
    pub fn new(model: TrainedModel) -> Self {
        Self {
            model,
            options: BotOptions::default(),
        }
    }

    pub fn with_options(model: TrainedModel, options: BotOptions) -> Self {
        Self { model, options }
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }
}

impl AIOpponent for CfrBot {
    fn get_action(&self, state: &GameState, seat: usize, rng: &mut dyn RngCore) -> Decision {
        bot_decide_with(state, seat, &self.model, &self.options, rng)
    }

    fn name(&self) -> &str {
        "CfrBot"
    }
}
