use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A pre-shuffled deck. Dealing walks a cursor through the card order, so a
/// hand's runout is fixed as soon as the deck is shuffled.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards, position: 0 }
    }

    /// Deck dealing `cards` in the given order. Used to stack a deck in tests
    /// and to rebuild a deck from known cards.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        self.deal_card().ok_or(GameError::DeckExhausted)
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.position.min(self.cards.len())..]
    }
}

/// Every card of a full deck not present in `dead`.
pub fn live_cards(dead: &[Card]) -> Vec<Card> {
    full_deck()
        .into_iter()
        .filter(|c| !dead.contains(c))
        .collect()
}
