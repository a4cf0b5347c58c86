//! `deal`: shuffle one deck and show both holes, the full board and what
//! each seat ends up with.

use crate::error::CliError;
use hucfr_engine::cards::{format_cards, Card};
use hucfr_engine::deck::Deck;
use hucfr_engine::hand::evaluate_hand;
use std::io::Write;

pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);

    // one card at a time, alternating seats
    let dealt = (0..4).map(|_| deck.deal()).collect::<Result<Vec<Card>, _>>()?;
    let holes = [[dealt[0], dealt[2]], [dealt[1], dealt[3]]];
    let board = (0..5).map(|_| deck.deal()).collect::<Result<Vec<Card>, _>>()?;

    writeln!(out, "Seed: {}", seed)?;
    for (seat, hole) in holes.iter().enumerate() {
        let mut seven = hole.to_vec();
        seven.extend_from_slice(&board);
        writeln!(
            out,
            "Hole P{}: {}  ({})",
            seat + 1,
            format_cards(hole),
            evaluate_hand(&seven)
        )?;
    }
    writeln!(out, "Board: {}", format_cards(&board))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_command_output_format() {
        let mut out = Vec::new();
        handle_deal_command(Some(999), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Seed: 999");
        assert!(lines[1].starts_with("Hole P1:"));
        assert!(lines[2].starts_with("Hole P2:"));
        assert!(lines[3].starts_with("Board:"));
        assert_eq!(lines[3].split_whitespace().count(), 6);
    }

    #[test]
    fn test_deal_command_deterministic() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();
        handle_deal_command(Some(12345), &mut out1).unwrap();
        handle_deal_command(Some(12345), &mut out2).unwrap();
        assert_eq!(out1, out2);
    }

    #[test]
    fn dealt_cards_are_distinct() {
        let mut out = Vec::new();
        handle_deal_command(Some(7), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let mut cards: Vec<&str> = output
            .lines()
            .skip(1)
            .flat_map(|l| l.split("  (").next().unwrap_or("").split(':').nth(1).unwrap_or("").split_whitespace())
            .collect();
        assert_eq!(cards.len(), 9);
        cards.sort_unstable();
        cards.dedup();
        assert_eq!(cards.len(), 9);
    }
}
