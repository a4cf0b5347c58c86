use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Hand category. Discriminants follow the conventional 1..=9 ranking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Comparable hand value. The derived ordering compares the category first
/// and then the tiebreak ranks element-wise, so `a > b` means `a` wins.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // ordered high -> low, zero padded
    pub kickers: [u8; 5],
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = |i: usize| Rank::from_u8(self.kickers[i]).unwrap_or(Rank::Two);
        match self.category {
            Category::HighCard => write!(f, "High Card, {}", r(0).name()),
            Category::OnePair => write!(f, "Pair of {}", r(0).plural()),
            Category::TwoPair => write!(f, "Two Pair, {} and {}", r(0).plural(), r(1).plural()),
            Category::ThreeOfAKind => write!(f, "Three of a Kind, {}", r(0).plural()),
            Category::Straight => write!(f, "Straight, {} high", r(0).name()),
            Category::Flush => write!(f, "Flush, {} high", r(0).name()),
            Category::FullHouse => {
                write!(f, "Full House, {} over {}", r(0).plural(), r(1).plural())
            }
            Category::FourOfAKind => write!(f, "Four of a Kind, {}", r(0).plural()),
            Category::StraightFlush if self.kickers[0] == 14 => write!(f, "Royal Flush"),
            Category::StraightFlush => write!(f, "Straight Flush, {} high", r(0).name()),
        }
    }
}

/// Ranks the best five-card hand contained in `cards` (5 to 7 cards).
///
/// Works directly from rank counts and suit masks instead of enumerating
/// subsets; the result always equals [`evaluate_subsets`].
///
/// ```
/// use hucfr_engine::cards::parse_cards;
/// use hucfr_engine::hand::{evaluate_hand, Category};
///
/// let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
/// assert_eq!(evaluate_hand(&cards).category, Category::StraightFlush);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15];
    let mut suit_masks = [0u16; 4];
    let mut rank_mask = 0u16;
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        suit_masks[c.suit.index()] |= 1 << r;
        rank_mask |= 1 << r;
    }

    let flush_mask = suit_masks.iter().copied().find(|m| m.count_ones() >= 5);
    if let Some(high) = flush_mask.and_then(straight_high_from_mask) {
        return strength(Category::StraightFlush, &[high]);
    }

    let mut quads = Vec::new();
    let mut trips = Vec::new();
    let mut pairs = Vec::new();
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            4 => quads.push(r),
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }

    if let Some(&q) = quads.first() {
        let k = top_ranks(rank_mask, &[q], 1);
        return strength(Category::FourOfAKind, &[q, k[0]]);
    }

    if let Some(&t) = trips.first() {
        // a second set of trips plays as the pair
        let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max();
        if let Some(p) = pair {
            return strength(Category::FullHouse, &[t, p]);
        }
    }

    if let Some(m) = flush_mask {
        return strength(Category::Flush, &top_ranks(m, &[], 5));
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return strength(Category::Straight, &[high]);
    }

    if let Some(&t) = trips.first() {
        let mut ranks = vec![t];
        ranks.extend(top_ranks(rank_mask, &[t], 2));
        return strength(Category::ThreeOfAKind, &ranks);
    }

    if pairs.len() >= 2 {
        let (hi, lo) = (pairs[0], pairs[1]);
        // kicker may come from a third pair
        let k = top_ranks(rank_mask, &[hi, lo], 1);
        return strength(Category::TwoPair, &[hi, lo, k[0]]);
    }

    if let Some(&p) = pairs.first() {
        let mut ranks = vec![p];
        ranks.extend(top_ranks(rank_mask, &[p], 3));
        return strength(Category::OnePair, &ranks);
    }

    strength(Category::HighCard, &top_ranks(rank_mask, &[], 5))
}

/// Reference evaluator: ranks every five-card subset of `cards` and keeps the
/// maximum. Slower than [`evaluate_hand`]; fewer than five cards are ranked as-is.
pub fn evaluate_subsets(cards: &[Card]) -> HandStrength {
    let n = cards.len();
    if n <= 5 {
        return evaluate_hand(cards);
    }
    let mut best: Option<HandStrength> = None;
    let mut idx = [0usize, 1, 2, 3, 4];
    loop {
        let five: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
        let hs = evaluate_hand(&five);
        if best.map_or(true, |b| hs > b) {
            best = Some(hs);
        }
        // next combination in lexicographic order
        let mut i = 5;
        loop {
            if i == 0 {
                return best.unwrap_or_else(|| evaluate_hand(cards));
            }
            i -= 1;
            if idx[i] < n - 5 + i {
                break;
            }
        }
        idx[i] += 1;
        for j in i + 1..5 {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (slot, &r) in kickers.iter_mut().zip(ranks) {
        *slot = r;
    }
    HandStrength { category, kickers }
}

/// Highest `n` ranks present in `mask`, skipping `exclude`, high -> low.
fn top_ranks(mask: u16, exclude: &[u8], n: usize) -> Vec<u8> {
    let mut out: Vec<u8> = (2..=14u8)
        .rev()
        .filter(|r| mask & (1 << r) != 0 && !exclude.contains(r))
        .take(n)
        .collect();
    out.resize(n, 0);
    out
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // ace also plays low
    if m & (1 << 14) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b11111u16 << (high - 4);
        m & window == window
    })
}
