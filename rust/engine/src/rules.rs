use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::errors::GameError;

/// Forced bets posted at the start of every hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

impl Default for Blinds {
    fn default() -> Self {
        Self { small: 10, big: 20 }
    }
}

/// Betting facts for the seat about to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    pub pot: u32,
    pub stack: u32,
    pub to_call: u32,
    /// What the opponent could still put in; caps any raise
    pub opponent_stack: u32,
    pub raise_allowed: bool,
}

/// An action resolved to concrete chip amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    /// Pays this much; less than `to_call` only when it is the whole stack
    Call(u32),
    /// Pays `call + raise`
    Raise { call: u32, raise: u32 },
}

impl ValidatedAction {
    pub fn chips(&self) -> u32 {
        match self {
            ValidatedAction::Fold => 0,
            ValidatedAction::Call(c) => *c,
            ValidatedAction::Raise { call, raise } => call + raise,
        }
    }
}

/// Raise size above the call when no explicit amount is given:
/// half pot, full pot, or the whole stack.
pub fn default_raise_size(action: Action, pot: u32, stack: u32) -> u32 {
    match action {
        Action::RaiseSmall => (pot / 2).max(1),
        Action::RaiseMedium => pot.max(1),
        Action::RaiseLarge => stack,
        Action::Fold | Action::Call => 0,
    }
}

/// Resolves an [`Action`] to chip amounts under the heads-up betting rules.
///
/// Raise sizing, in order:
/// 1. `amount` (or the convention size) is the raise on top of the call.
/// 2. A zero raise is a call.
/// 3. The raise is clamped to the stack left after calling, then to the
///    opponent's remaining stack, since nobody can be asked to call more
///    than they hold.
/// 4. A seat that cannot cover `to_call` calls all-in instead.
///
/// # Errors
///
/// [`GameError::RaiseNotAllowed`] if a raise is attempted when the street's
/// bets are matched and a raise already happened on it.
///
/// # Examples
///
/// ```
/// use hucfr_engine::action::Action;
/// use hucfr_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext { pot: 0, stack: 500, to_call: 0, opponent_stack: 50, raise_allowed: true };
/// // the shove is capped at what the opponent can call
/// let v = validate_action(&ctx, Action::RaiseLarge, Some(100)).unwrap();
/// assert_eq!(v, ValidatedAction::Raise { call: 0, raise: 50 });
/// ```
///
/// ```
/// use hucfr_engine::action::Action;
/// use hucfr_engine::errors::GameError;
/// use hucfr_engine::rules::{validate_action, BettingContext};
///
/// let ctx = BettingContext { pot: 80, stack: 960, to_call: 0, opponent_stack: 960, raise_allowed: false };
/// assert_eq!(validate_action(&ctx, Action::RaiseSmall, None), Err(GameError::RaiseNotAllowed));
/// ```
pub fn validate_action(
    ctx: &BettingContext,
    action: Action,
    amount: Option<u32>,
) -> Result<ValidatedAction, GameError> {
    match action {
        Action::Fold => Ok(ValidatedAction::Fold),
        Action::Call => Ok(ValidatedAction::Call(ctx.to_call.min(ctx.stack))),
        Action::RaiseSmall | Action::RaiseMedium | Action::RaiseLarge => {
            if !ctx.raise_allowed {
                return Err(GameError::RaiseNotAllowed);
            }
            let requested = amount.unwrap_or_else(|| default_raise_size(action, ctx.pot, ctx.stack));
            if ctx.stack <= ctx.to_call {
                return Ok(ValidatedAction::Call(ctx.stack));
            }
            let raise = requested
                .min(ctx.stack - ctx.to_call)
                .min(ctx.opponent_stack);
            if raise == 0 {
                Ok(ValidatedAction::Call(ctx.to_call))
            } else {
                Ok(ValidatedAction::Raise {
                    call: ctx.to_call,
                    raise,
                })
            }
        }
    }
}

/// `to_call / (pot + to_call)`, or 1.0 when both are zero.
pub fn pot_odds(to_call: u32, pot: u32) -> f64 {
    let denom = pot as f64 + to_call as f64;
    if denom <= 0.0 {
        1.0
    } else {
        to_call as f64 / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pot: u32, stack: u32, to_call: u32, opp: u32) -> BettingContext {
        BettingContext {
            pot,
            stack,
            to_call,
            opponent_stack: opp,
            raise_allowed: true,
        }
    }

    #[test]
    fn convention_sizes() {
        let c = ctx(100, 1000, 0, 1000);
        assert_eq!(
            validate_action(&c, Action::RaiseSmall, None),
            Ok(ValidatedAction::Raise { call: 0, raise: 50 })
        );
        assert_eq!(
            validate_action(&c, Action::RaiseMedium, None),
            Ok(ValidatedAction::Raise { call: 0, raise: 100 })
        );
        assert_eq!(
            validate_action(&c, Action::RaiseLarge, None),
            Ok(ValidatedAction::Raise { call: 0, raise: 1000 })
        );
    }

    #[test]
    fn small_raise_on_empty_pot_is_one_chip() {
        let c = ctx(0, 1000, 0, 1000);
        assert_eq!(
            validate_action(&c, Action::RaiseSmall, None),
            Ok(ValidatedAction::Raise { call: 0, raise: 1 })
        );
    }

    #[test]
    fn zero_raise_is_a_call() {
        let c = ctx(100, 1000, 20, 1000);
        assert_eq!(
            validate_action(&c, Action::RaiseMedium, Some(0)),
            Ok(ValidatedAction::Call(20))
        );
    }

    #[test]
    fn short_stack_raise_becomes_all_in_call() {
        let c = ctx(100, 15, 20, 1000);
        assert_eq!(
            validate_action(&c, Action::RaiseLarge, None),
            Ok(ValidatedAction::Call(15))
        );
        assert_eq!(validate_action(&c, Action::Call, None), Ok(ValidatedAction::Call(15)));
    }

    #[test]
    fn raise_against_all_in_opponent_is_a_call() {
        let c = ctx(100, 500, 40, 0);
        assert_eq!(
            validate_action(&c, Action::RaiseSmall, None),
            Ok(ValidatedAction::Call(40))
        );
    }

    #[test]
    fn pot_odds_edges() {
        assert_eq!(pot_odds(0, 0), 1.0);
        assert_eq!(pot_odds(0, 100), 0.0);
        assert!((pot_odds(50, 150) - 0.25).abs() < 1e-12);
    }
}
