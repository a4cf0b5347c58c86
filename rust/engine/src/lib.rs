//! # hucfr-engine: heads-up hold'em game core
//!
//! Deterministic two-seat no-limit Texas Hold'em mechanics: cards and
//! seeded decks, a 5-to-7 card hand evaluator, the betting/pot/showdown state
//! machine with exact chip accounting, and a multi-hand table.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation and two-character notation
//! - [`deck`] - Pre-shuffled decks driven by an explicit RNG
//! - [`hand`] - Hand evaluation and strength comparison
//! - [`action`] - The five abstract actions
//! - [`history`] - Streets, action records and compact history keys
//! - [`rules`] - Blinds, raise sizing and pot odds
//! - [`pot`] - Main/side pot arithmetic
//! - [`player`] - Per-seat chips and cards
//! - [`game`] - The single-hand state machine
//! - [`engine`] - Hand-after-hand table with public views
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use hucfr_engine::cards::parse_cards;
//! use hucfr_engine::hand::evaluate_hand;
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate_hand(&cards);
//! println!("Hand strength: {strength}");
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use hucfr_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! assert_eq!(a.deal_card(), b.deal_card());
//! ```

pub mod action;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod history;
pub mod player;
pub mod pot;
pub mod rules;
