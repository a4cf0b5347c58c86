use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Table position in heads-up play. The button posts the small blind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Position {
    /// Dealer, small blind, first to act preflop
    Button,
    /// Big blind, first to act postflop
    BigBlind,
}

/// Default starting stack for each seat in chips
pub const STARTING_STACK: u32 = 1_000;

/// One seat's chips and cards for the current hand.
#[derive(Debug, Clone)]
pub struct Player {
    stack: u32,
    /// Chips put in on the current street
    street_bet: u32,
    /// Chips put in over the whole hand
    contrib: u32,
    position: Position,
    hole: [Card; 2],
}

impl Player {
    pub fn new(stack: u32, position: Position, hole: [Card; 2]) -> Self {
        Self {
            stack,
            street_bet: 0,
            contrib: 0,
            position,
            hole,
        }
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn street_bet(&self) -> u32 {
        self.street_bet
    }
    pub fn contrib(&self) -> u32 {
        self.contrib
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn hole_cards(&self) -> [Card; 2] {
        self.hole
    }

    pub fn is_all_in(&self) -> bool {
        self.stack == 0
    }

    /// Moves up to `amount` from the stack into the pot and returns what was
    /// actually paid. Paying more than the stack is an all-in for the stack.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.street_bet += paid;
        self.contrib += paid;
        paid
    }

    /// Seeds chips already committed before this state was built.
    pub(crate) fn with_contrib(mut self, contrib: u32) -> Self {
        self.contrib = contrib;
        self
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub(crate) fn reset_street(&mut self) {
        self.street_bet = 0;
    }
}
