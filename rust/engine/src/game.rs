use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::Action;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{evaluate_hand, HandStrength};
use crate::history::{ActionRecord, HistoryKey, Street, STREET_SEPARATOR};
use crate::player::{Player, Position};
use crate::pot::PotManager;
use crate::rules::{validate_action, BettingContext, Blinds, ValidatedAction};

/// Where the hand is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Betting,
    /// `pot` is the pot the folder conceded
    Folded { folder: usize, pot: u32 },
    Showdown,
}

/// What `post_blinds` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlindsOutcome {
    Posted,
    /// A seat could not cover its blind; both seats went all-in and the hand
    /// ran out to showdown.
    AllIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub holes: [[Card; 2]; 2],
    pub hands: [HandStrength; 2],
    pub descriptions: [String; 2],
}

/// Settlement of a finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// `None` on a split pot
    pub winner: Option<usize>,
    pub folded: Option<usize>,
    /// Chips paid out of the pot to each seat
    pub payouts: [u32; 2],
    pub main_pot: u32,
    pub side_pot: u32,
    pub stacks: [u32; 2],
    pub board: Vec<Card>,
    pub showdown: Option<ShowdownInfo>,
}

/// Heads-up betting, pot and showdown state for a single hand.
///
/// Mutated only through [`GameState::post_blinds`], [`GameState::apply_action`]
/// and [`GameState::advance_street`]. Rejected actions leave the state
/// untouched. Seat indices are 0 and 1: [`GameState::apply_action`] rejects any
/// other seat with [`GameError::InvalidSeat`], while the seat-indexed
/// accessors (`hole`, `to_call`, `net_result`, `betting_context`, ...) panic
/// on one, as slice indexing does.
///
/// ```
/// use hucfr_engine::action::Action;
/// use hucfr_engine::deck::Deck;
/// use hucfr_engine::game::GameState;
/// use hucfr_engine::history::Street;
/// use hucfr_engine::rules::Blinds;
///
/// let mut gs = GameState::new_hand(Deck::new_with_seed(1), [1000, 1000], 0, Blinds::default()).unwrap();
/// gs.post_blinds().unwrap();
/// assert_eq!(gs.pot(), 30);
/// // the button completes and the hand moves to the flop
/// gs.apply_action(0, Action::Call, None).unwrap();
/// assert_eq!(gs.street(), Street::Flop);
/// assert_eq!(gs.board().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    players: [Player; 2],
    board: Vec<Card>,
    deck: Deck,
    pot: u32,
    current_bet: u32,
    street: Street,
    /// Current street only
    history: String,
    past_streets: Vec<String>,
    actions: Vec<ActionRecord>,
    dealer: usize,
    to_act: usize,
    acted: [bool; 2],
    blinds: Blinds,
    blinds_posted: bool,
    initial_stacks: [u32; 2],
    phase: Phase,
    result: Option<HandResult>,
}

impl GameState {
    /// Deals hole cards from `deck` for a fresh hand. Blinds are not yet
    /// posted; call [`GameState::post_blinds`] next.
    pub fn new_hand(
        mut deck: Deck,
        stacks: [u32; 2],
        dealer: usize,
        blinds: Blinds,
    ) -> Result<Self, GameError> {
        check_dealer(dealer)?;
        let holes = deal_holes(&mut deck, dealer)?;
        let mut gs = Self::build(Street::Preflop, holes, Vec::new(), deck, stacks, [0, 0], dealer);
        gs.blinds = blinds;
        gs.blinds_posted = false;
        Ok(gs)
    }

    /// Builds a state at the start of `street` with known cards.
    ///
    /// `stacks` are what each seat has left behind; `contrib` is what each has
    /// already put in the pot on earlier streets. Blinds count as posted.
    /// A seat with no chips left means the hand is already all-in and runs out
    /// to showdown immediately.
    pub fn at_street(
        street: Street,
        holes: [[Card; 2]; 2],
        board: Vec<Card>,
        deck: Deck,
        stacks: [u32; 2],
        contrib: [u32; 2],
        dealer: usize,
    ) -> Result<Self, GameError> {
        check_dealer(dealer)?;
        if board.len() != street.board_len() {
            return Err(GameError::InvalidSetup(format!(
                "{street} needs {} board cards, got {}",
                street.board_len(),
                board.len()
            )));
        }
        let mut known: Vec<Card> = holes.iter().flatten().copied().collect();
        known.extend(board.iter().copied());
        for (i, c) in known.iter().enumerate() {
            if known[..i].contains(c) || deck.remaining_cards().contains(c) {
                return Err(GameError::InvalidSetup(format!("card {c} dealt twice")));
            }
        }
        let mut gs = Self::build(street, holes, board, deck, stacks, contrib, dealer);
        if gs.players.iter().any(Player::is_all_in) {
            gs.run_out()?;
        }
        Ok(gs)
    }

    /// Deals hole cards and the board up to `street` from `deck`, then
    /// builds the state as [`GameState::at_street`] does.
    pub fn deal_at_street(
        mut deck: Deck,
        street: Street,
        stacks: [u32; 2],
        contrib: [u32; 2],
        dealer: usize,
    ) -> Result<Self, GameError> {
        check_dealer(dealer)?;
        let holes = deal_holes(&mut deck, dealer)?;
        let mut board = Vec::with_capacity(5);
        deal_board_to(&mut deck, &mut board, street.board_len())?;
        Self::at_street(street, holes, board, deck, stacks, contrib, dealer)
    }

    fn build(
        street: Street,
        holes: [[Card; 2]; 2],
        board: Vec<Card>,
        deck: Deck,
        stacks: [u32; 2],
        contrib: [u32; 2],
        dealer: usize,
    ) -> Self {
        let position = |seat: usize| {
            if seat == dealer {
                Position::Button
            } else {
                Position::BigBlind
            }
        };
        let players = [
            Player::new(stacks[0], position(0), holes[0]).with_contrib(contrib[0]),
            Player::new(stacks[1], position(1), holes[1]).with_contrib(contrib[1]),
        ];
        Self {
            players,
            board,
            deck,
            pot: contrib[0] + contrib[1],
            current_bet: 0,
            street,
            history: String::new(),
            past_streets: Vec::new(),
            actions: Vec::new(),
            dealer,
            to_act: first_to_act(street, dealer),
            acted: [false, false],
            blinds: Blinds::default(),
            blinds_posted: true,
            initial_stacks: [stacks[0] + contrib[0], stacks[1] + contrib[1]],
            phase: Phase::Betting,
            result: None,
        }
    }

    /// Posts the small blind for the dealer and the big blind for the other
    /// seat. Blinds count as each seat's first action, so a preflop call by
    /// the button closes the round.
    ///
    /// If either seat cannot cover its blind, both seats are put all-in for
    /// their whole stacks and the hand runs out to showdown.
    pub fn post_blinds(&mut self) -> Result<BlindsOutcome, GameError> {
        self.ensure_betting()?;
        if self.blinds_posted {
            return Err(GameError::BlindsAlreadyPosted);
        }
        self.blinds_posted = true;
        self.acted = [true, true];
        let sb = self.dealer;
        let bb = 1 - self.dealer;

        if self.players[sb].stack() < self.blinds.small || self.players[bb].stack() < self.blinds.big {
            for p in &mut self.players {
                let all = p.stack();
                self.pot += p.pay(all);
            }
            self.sync_current_bet();
            debug!(stacks = ?self.contributions(), "short blind, both seats all-in");
            self.run_out()?;
            return Ok(BlindsOutcome::AllIn);
        }

        self.pot += self.players[sb].pay(self.blinds.small);
        self.pot += self.players[bb].pay(self.blinds.big);
        self.sync_current_bet();
        self.to_act = sb;
        if self.all_in_resolved() {
            self.run_out()?;
        }
        Ok(BlindsOutcome::Posted)
    }

    /// Applies `action` for `seat` and returns whether the hand is over.
    ///
    /// When the betting round closes the street advances on its own; when the
    /// remaining action is settled by an all-in the board runs out and the
    /// pot is paid at showdown.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the state unchanged if the hand is over,
    /// blinds are missing, it is not `seat`'s turn, or a raise is not allowed.
    pub fn apply_action(
        &mut self,
        seat: usize,
        action: Action,
        amount: Option<u32>,
    ) -> Result<bool, GameError> {
        self.ensure_betting()?;
        check_seat(seat)?;
        if !self.blinds_posted {
            return Err(GameError::BlindsNotPosted);
        }
        if seat != self.to_act {
            return Err(GameError::NotPlayersTurn {
                expected: self.to_act,
                actual: seat,
            });
        }
        let ctx = self.betting_context(seat);
        let validated = validate_action(&ctx, action, amount).inspect_err(|e| {
            debug!(seat, %action, street = %self.street, history = %self.history, error = %e, "action rejected");
        })?;

        let effective = match validated {
            ValidatedAction::Fold => {
                self.record(seat, Action::Fold, 0);
                self.fold(seat);
                return Ok(true);
            }
            ValidatedAction::Call(_) => Action::Call,
            ValidatedAction::Raise { .. } => action,
        };
        let paid = self.players[seat].pay(validated.chips());
        self.pot += paid;
        self.sync_current_bet();
        self.record(seat, effective, paid);
        self.acted[seat] = true;

        if self.all_in_resolved() {
            self.run_out()?;
            return Ok(true);
        }
        if self.round_closed() {
            self.advance_street()?;
            return Ok(self.is_terminal());
        }
        self.to_act = 1 - seat;
        Ok(false)
    }

    /// Closes the current betting round: on the river this settles the hand
    /// at showdown, otherwise it resets street bets and history and deals the
    /// next street. Returns the street now being played.
    ///
    /// # Errors
    ///
    /// [`GameError::RoundNotClosed`] unless both seats have acted and matched
    /// bets on this street.
    pub fn advance_street(&mut self) -> Result<Street, GameError> {
        self.ensure_betting()?;
        if !self.round_closed() {
            return Err(GameError::RoundNotClosed(self.street));
        }
        match self.street.next() {
            Some(next) => {
                deal_board_to(&mut self.deck, &mut self.board, next.board_len())?;
                for p in &mut self.players {
                    p.reset_street();
                }
                self.current_bet = 0;
                self.past_streets.push(std::mem::take(&mut self.history));
                self.acted = [false, false];
                self.street = next;
                self.to_act = first_to_act(next, self.dealer);
            }
            None => self.showdown()?,
        }
        Ok(self.street)
    }

    /// Signed result for `seat`: `+pot`/`-pot` for the winner/folder of a
    /// folded hand, `+main_pot`/`-main_pot` at showdown, 0 on a split or while
    /// the hand is still being played.
    pub fn payoff(&self, seat: usize) -> i64 {
        match self.phase {
            Phase::Betting => 0,
            Phase::Folded { folder, pot } => {
                if seat == folder {
                    -(pot as i64)
                } else {
                    pot as i64
                }
            }
            Phase::Showdown => {
                let main = self.main_pot() as i64;
                match self.result.as_ref().and_then(|r| r.winner) {
                    Some(w) if w == seat => main,
                    Some(_) => -main,
                    None => 0,
                }
            }
        }
    }

    /// Chips won or lost by `seat` relative to its stack when the state was
    /// built. Only final once the hand is over.
    pub fn net_result(&self, seat: usize) -> i64 {
        self.players[seat].stack() as i64 - self.initial_stacks[seat] as i64
    }

    fn fold(&mut self, seat: usize) {
        let winner = 1 - seat;
        let pot = self.pot;
        self.players[winner].add_chips(pot);
        self.pot = 0;
        self.phase = Phase::Folded { folder: seat, pot };
        let pm = PotManager::from_contributions(self.contributions());
        let mut payouts = [0, 0];
        payouts[winner] = pot;
        self.result = Some(HandResult {
            winner: Some(winner),
            folded: Some(seat),
            payouts,
            main_pot: pm.main_pot(),
            side_pot: pm.side_pot(),
            stacks: self.stacks(),
            board: self.board.clone(),
            showdown: None,
        });
    }

    fn run_out(&mut self) -> Result<(), GameError> {
        deal_board_to(&mut self.deck, &mut self.board, 5)?;
        self.showdown()
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        let hands = [self.hand_strength(0), self.hand_strength(1)];
        let winner = match hands[0].cmp(&hands[1]) {
            Ordering::Greater => Some(0),
            Ordering::Less => Some(1),
            Ordering::Equal => None,
        };
        let pm = PotManager::from_contributions(self.contributions());
        // odd chip goes to the out-of-position seat
        let payouts = pm.distribute(winner, 1 - self.dealer);
        for (p, &won) in self.players.iter_mut().zip(&payouts) {
            p.add_chips(won);
        }
        self.pot = 0;
        self.phase = Phase::Showdown;
        self.result = Some(HandResult {
            winner,
            folded: None,
            payouts,
            main_pot: pm.main_pot(),
            side_pot: pm.side_pot(),
            stacks: self.stacks(),
            board: self.board.clone(),
            showdown: Some(ShowdownInfo {
                holes: [self.hole(0), self.hole(1)],
                hands,
                descriptions: [hands[0].to_string(), hands[1].to_string()],
            }),
        });
        Ok(())
    }

    fn hand_strength(&self, seat: usize) -> HandStrength {
        let mut cards = self.board.clone();
        cards.extend_from_slice(&self.hole(seat));
        evaluate_hand(&cards)
    }

    fn record(&mut self, seat: usize, action: Action, chips: u32) {
        self.history.push(action.symbol());
        self.actions.push(ActionRecord {
            seat,
            street: self.street,
            action,
            chips,
        });
    }

    fn sync_current_bet(&mut self) {
        let [a, b] = self.street_bets();
        self.current_bet = a.max(b);
    }

    /// An all-in seat that has matched or been matched leaves nothing to bet.
    fn all_in_resolved(&self) -> bool {
        (0..2).any(|s| {
            self.players[s].is_all_in()
                && self.players[s].street_bet() <= self.players[1 - s].street_bet()
        })
    }

    fn round_closed(&self) -> bool {
        let [a, b] = self.street_bets();
        a == b && self.acted.iter().all(|&x| x)
    }

    fn ensure_betting(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Betting => Ok(()),
            _ => Err(GameError::HandAlreadyComplete),
        }
    }

    pub fn betting_context(&self, seat: usize) -> BettingContext {
        BettingContext {
            pot: self.pot,
            stack: self.players[seat].stack(),
            to_call: self.to_call(seat),
            opponent_stack: self.players[1 - seat].stack(),
            raise_allowed: self.raise_allowed(),
        }
    }

    /// False once the street's bets are matched after a raise.
    pub fn raise_allowed(&self) -> bool {
        let [a, b] = self.street_bets();
        !(a == b && self.history.contains('r'))
    }

    /// True when `seat` could make a raise that is more than a call.
    pub fn can_raise(&self, seat: usize) -> bool {
        let ctx = self.betting_context(seat);
        ctx.raise_allowed && ctx.stack > ctx.to_call && ctx.opponent_stack > 0
    }

    pub fn legal_actions(&self, seat: usize) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        if self.can_raise(seat) {
            Action::ALL.to_vec()
        } else {
            vec![Action::Fold, Action::Call]
        }
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        self.current_bet.saturating_sub(self.players[seat].street_bet())
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != Phase::Betting
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn to_act(&self) -> usize {
        self.to_act
    }
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }
    pub fn hole(&self, seat: usize) -> [Card; 2] {
        self.players[seat].hole_cards()
    }
    pub fn stacks(&self) -> [u32; 2] {
        [self.players[0].stack(), self.players[1].stack()]
    }
    pub fn street_bets(&self) -> [u32; 2] {
        [self.players[0].street_bet(), self.players[1].street_bet()]
    }
    pub fn contributions(&self) -> [u32; 2] {
        [self.players[0].contrib(), self.players[1].contrib()]
    }
    pub fn initial_stacks(&self) -> [u32; 2] {
        self.initial_stacks
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Current street's history, e.g. `"rc"`.
    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn history_key(&self) -> Result<HistoryKey, GameError> {
        HistoryKey::from_history(&self.history)
    }

    /// Whole-hand history with streets separated by `/`, e.g. `"rc/cr"`.
    pub fn full_history(&self) -> String {
        let mut parts = self.past_streets.clone();
        parts.push(self.history.clone());
        parts.join(&STREET_SEPARATOR.to_string())
    }

    pub fn main_pot(&self) -> u32 {
        PotManager::from_contributions(self.contributions()).main_pot()
    }

    pub fn side_pot(&self) -> u32 {
        PotManager::from_contributions(self.contributions()).side_pot()
    }

    /// Stacks plus pot; constant for the whole hand.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(Player::stack).sum::<u32>() + self.pot
    }
}

fn check_dealer(dealer: usize) -> Result<(), GameError> {
    if dealer > 1 {
        return Err(GameError::InvalidSetup(format!("dealer seat {dealer}")));
    }
    Ok(())
}

pub(crate) fn check_seat(seat: usize) -> Result<(), GameError> {
    if seat < 2 {
        Ok(())
    } else {
        Err(GameError::InvalidSeat(seat))
    }
}

fn first_to_act(street: Street, dealer: usize) -> usize {
    match street {
        Street::Preflop => dealer,
        _ => 1 - dealer,
    }
}

fn deal_holes(deck: &mut Deck, dealer: usize) -> Result<[[Card; 2]; 2], GameError> {
    let mut dealt = [[None; 2]; 2];
    for round in 0..2 {
        for seat in [1 - dealer, dealer] {
            dealt[seat][round] = Some(deck.deal()?);
        }
    }
    let hole = |seat: usize| -> Result<[Card; 2], GameError> {
        match dealt[seat] {
            [Some(a), Some(b)] => Ok([a, b]),
            _ => Err(GameError::DeckExhausted),
        }
    };
    Ok([hole(0)?, hole(1)?])
}

/// Burns and deals street by street until the board has `target` cards.
fn deal_board_to(deck: &mut Deck, board: &mut Vec<Card>, target: usize) -> Result<(), GameError> {
    while board.len() < target {
        deck.burn_card();
        let n = if board.is_empty() { 3 } else { 1 };
        for _ in 0..n {
            board.push(deck.deal()?);
        }
    }
    Ok(())
}
