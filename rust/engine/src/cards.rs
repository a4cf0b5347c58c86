use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// One of the four suits in a standard 52-card deck.
/// Suit indices 0..=3 follow the declaration order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Suit> {
        all_suits().get(i).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_symbol(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// The rank (face value) of a playing card from Two through Ace.
/// Discriminants are the numeric values 2..=14 used by the evaluator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_u8(v: u8) -> Option<Rank> {
        match v {
            2..=14 => Some(all_ranks()[(v - 2) as usize]),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => char::from(b'0' + r.value()),
        }
    }

    pub fn from_symbol(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            d @ '2'..='9' => Rank::from_u8(d as u8 - b'0'),
            _ => None,
        }
    }

    /// Human-readable name, used in hand descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Rank::Six => "Sixes",
            Rank::Two => "Twos",
            Rank::Three => "Threes",
            Rank::Four => "Fours",
            Rank::Five => "Fives",
            Rank::Seven => "Sevens",
            Rank::Eight => "Eights",
            Rank::Nine => "Nines",
            Rank::Ten => "Tens",
            Rank::Jack => "Jacks",
            Rank::Queen => "Queens",
            Rank::King => "Kings",
            Rank::Ace => "Aces",
        }
    }
}

/// A single playing card. Immutable value type.
///
/// Serialized as two-character notation (`"As"`, `"Td"`, `"9c"`).
///
/// ```
/// use hucfr_engine::cards::{Card, Rank, Suit};
///
/// let c: Card = "As".parse().unwrap();
/// assert_eq!(c, Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(c.to_string(), "As");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Dense index in 0..52, rank-major.
    pub fn index(self) -> usize {
        (self.rank.value() as usize - 2) * 4 + self.suit.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(GameError::InvalidCard(s.to_string()));
        };
        match (Rank::from_symbol(r), Suit::from_symbol(su)) {
            (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
            _ => Err(GameError::InvalidCard(s.to_string())),
        }
    }
}

impl From<Card> for String {
    fn from(c: Card) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parses whitespace or comma separated card notation, e.g. `"As Kd"`.
/// Duplicate cards are rejected.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    let mut out: Vec<Card> = Vec::new();
    for tok in s.split(|ch: char| ch.is_whitespace() || ch == ',') {
        if tok.is_empty() {
            continue;
        }
        let c: Card = tok.parse()?;
        if out.contains(&c) {
            return Err(GameError::InvalidCard(format!("duplicate card {c}")));
        }
        out.push(c);
    }
    Ok(out)
}

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(r, s));
        }
    }
    v
}

/// Range-table notation for a hole pair: `"AKs"`, `"T9o"`, `"77"`.
pub fn hole_notation(hole: &[Card; 2]) -> String {
    let (hi, lo) = if hole[0].rank >= hole[1].rank {
        (hole[0], hole[1])
    } else {
        (hole[1], hole[0])
    };
    if hi.rank == lo.rank {
        format!("{}{}", hi.rank.symbol(), lo.rank.symbol())
    } else {
        let kind = if hi.suit == lo.suit { 's' } else { 'o' };
        format!("{}{}{}", hi.rank.symbol(), lo.rank.symbol(), kind)
    }
}
