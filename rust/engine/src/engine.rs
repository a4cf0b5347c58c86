use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::Action;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{check_seat, BlindsOutcome, GameState, HandResult};
use crate::history::Street;
use crate::player::STARTING_STACK;
use crate::rules::Blinds;

/// Seat the interactive player sits in; the bot takes the other one.
pub const HUMAN_SEAT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub starting_stack: u32,
    pub blinds: Blinds,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            blinds: Blinds::default(),
        }
    }
}

/// What one seat is allowed to see of a hand in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    pub hand_no: u64,
    pub seat: usize,
    pub hole: [Card; 2],
    pub board: Vec<Card>,
    pub pot: u32,
    pub stacks: [u32; 2],
    pub street_bets: [u32; 2],
    pub current_bet: u32,
    pub dealer: usize,
    pub street: Street,
    pub history: String,
    /// `None` once the hand is over
    pub to_act: Option<usize>,
    pub to_call: u32,
    pub can_raise: bool,
}

impl PublicView {
    pub fn from_state(state: &GameState, seat: usize, hand_no: u64) -> Self {
        Self {
            hand_no,
            seat,
            hole: state.hole(seat),
            board: state.board().to_vec(),
            pot: state.pot(),
            stacks: state.stacks(),
            street_bets: state.street_bets(),
            current_bet: state.current_bet(),
            dealer: state.dealer(),
            street: state.street(),
            history: state.full_history(),
            to_act: (!state.is_terminal()).then(|| state.to_act()),
            to_call: state.to_call(seat),
            can_raise: !state.is_terminal() && state.can_raise(seat),
        }
    }
}

/// Result of submitting an action to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandStep {
    InProgress(PublicView),
    Finished(HandResult),
}

/// A heads-up table that plays hand after hand.
///
/// Owns both stacks between hands, alternates the dealer every hand (seat 0
/// deals first) and re-buys both seats to the starting stack as soon as
/// either one busts. Every hand's shuffle is drawn from one seeded stream, so
/// a seed reproduces the whole session.
///
/// # Examples
///
/// ```
/// use hucfr_engine::action::Action;
/// use hucfr_engine::engine::{Engine, HandStep, TableConfig};
///
/// let mut engine = Engine::new(Some(12345), TableConfig::default());
/// let view = engine.start_hand().unwrap();
/// assert_eq!(view.pot, 30);
///
/// // seat 0 is on the button and folds its small blind
/// match engine.apply_player_action(Action::Fold, None).unwrap() {
///     HandStep::Finished(result) => assert_eq!(result.winner, Some(1)),
///     HandStep::InProgress(_) => unreachable!(),
/// }
/// assert_eq!(engine.stacks(), [990, 1010]);
/// ```
#[derive(Debug)]
pub struct Engine {
    rng: ChaCha20Rng,
    config: TableConfig,
    stacks: [u32; 2],
    dealer: usize,
    hands_played: u64,
    state: Option<GameState>,
}

impl Engine {
    pub fn new(seed: Option<u64>, config: TableConfig) -> Self {
        let rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::seed_from_u64(rand::random()),
        };
        Self {
            rng,
            config,
            stacks: [config.starting_stack; 2],
            dealer: 1,
            hands_played: 0,
            state: None,
        }
    }

    /// Shuffles, rotates the dealer, posts blinds and returns the view for
    /// [`HUMAN_SEAT`]. If the blinds put both seats all-in the returned view
    /// is already terminal and [`Engine::result`] holds the outcome.
    pub fn start_hand(&mut self) -> Result<PublicView, GameError> {
        if self.state.as_ref().is_some_and(|s| !s.is_terminal()) {
            return Err(GameError::HandInProgress);
        }
        if self.stacks.contains(&0) {
            info!(stacks = ?self.stacks, "seat busted, resetting stacks");
            self.stacks = [self.config.starting_stack; 2];
        }
        self.dealer = 1 - self.dealer;
        self.hands_played += 1;

        let deck = Deck::shuffled(&mut self.rng);
        let mut state = GameState::new_hand(deck, self.stacks, self.dealer, self.config.blinds)?;
        if state.post_blinds()? == BlindsOutcome::AllIn {
            self.stacks = state.stacks();
        }
        debug!(hand = self.hands_played, dealer = self.dealer, "hand started");
        self.state = Some(state);
        self.view(HUMAN_SEAT)
    }

    /// Applies an action for any seat.
    pub fn apply_action(
        &mut self,
        seat: usize,
        action: Action,
        amount: Option<u32>,
    ) -> Result<HandStep, GameError> {
        let state = self.state.as_mut().ok_or(GameError::NoHandInProgress)?;
        let terminal = state.apply_action(seat, action, amount)?;
        if terminal {
            self.stacks = state.stacks();
            let result = state.result().cloned().ok_or(GameError::NoHandInProgress)?;
            return Ok(HandStep::Finished(result));
        }
        Ok(HandStep::InProgress(self.view(HUMAN_SEAT)?))
    }

    pub fn apply_player_action(
        &mut self,
        action: Action,
        amount: Option<u32>,
    ) -> Result<HandStep, GameError> {
        self.apply_action(HUMAN_SEAT, action, amount)
    }

    pub fn view(&self, seat: usize) -> Result<PublicView, GameError> {
        check_seat(seat)?;
        let state = self.state.as_ref().ok_or(GameError::NoHandInProgress)?;
        Ok(PublicView::from_state(state, seat, self.hands_played))
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn result(&self) -> Option<&HandResult> {
        self.state.as_ref().and_then(GameState::result)
    }

    pub fn stacks(&self) -> [u32; 2] {
        self.stacks
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }
    pub fn config(&self) -> TableConfig {
        self.config
    }

    /// Draws a fresh seed from the table stream, for callers that need
    /// their own reproducible randomness (e.g. a bot).
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Starts a single hand on a fresh table.
pub fn start_hand(seed: Option<u64>) -> Result<(Engine, PublicView), GameError> {
    let mut engine = Engine::new(seed, TableConfig::default());
    let view = engine.start_hand()?;
    Ok((engine, view))
}
