//! `equity`: Monte Carlo showdown equity of a hole pair against a profile.

use crate::error::CliError;
use hucfr_ai::equity::{equity, OpponentProfile};
use hucfr_engine::cards::{format_cards, parse_cards, Card};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;

pub fn handle_equity_command(
    hole: &str,
    board: Option<&str>,
    sims: u32,
    profile: OpponentProfile,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (hole, board) = parse_spot(hole, board.unwrap_or(""))?;
    if sims == 0 {
        return Err(CliError::InvalidInput("sims must be >= 1".into()));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let eq = equity(hole, &board, sims, profile, &mut rng);

    let board_str = if board.is_empty() {
        "-".to_string()
    } else {
        format_cards(&board)
    };
    writeln!(
        out,
        "Hole: {}  Board: {}  vs {}  ({} sims, seed {})",
        format_cards(&hole),
        board_str,
        profile,
        sims,
        seed
    )?;
    writeln!(out, "Equity: {:.4}", eq)?;
    Ok(())
}

/// Two distinct hole cards and a 0, 3, 4 or 5 card board sharing none of them.
fn parse_spot(hole: &str, board: &str) -> Result<([Card; 2], Vec<Card>), CliError> {
    let bad = |msg: String| CliError::InvalidInput(msg);
    let hole_cards = parse_cards(hole).map_err(|e| bad(format!("hole: {}", e)))?;
    let [a, b] = hole_cards[..] else {
        return Err(bad(format!("hole needs exactly two cards, got {}", hole_cards.len())));
    };
    let board = parse_cards(board).map_err(|e| bad(format!("board: {}", e)))?;
    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        return Err(bad(format!("board needs 0, 3, 4 or 5 cards, got {}", board.len())));
    }
    let mut all = vec![a, b];
    all.extend_from_slice(&board);
    for (i, c) in all.iter().enumerate() {
        if all[..i].contains(c) {
            return Err(bad(format!("card {} appears twice", c)));
        }
    }
    Ok(([a, b], board))
}
