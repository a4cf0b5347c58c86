//! Terminal rendering shared by the commands.

use std::io::Write;

use hucfr_ai::cfr::ModelSummary;
use hucfr_engine::cards::format_cards;
use hucfr_engine::engine::PublicView;
use hucfr_engine::game::HandResult;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Table state as seen from `view.seat`.
pub fn write_view(out: &mut dyn Write, view: &PublicView) -> std::io::Result<()> {
    let board = if view.board.is_empty() {
        "-".to_string()
    } else {
        format_cards(&view.board)
    };
    writeln!(
        out,
        "[{}] Board: {}  Pot: {}  Stacks: {}/{}  Hole: {}",
        view.street,
        board,
        view.pot,
        view.stacks[0],
        view.stacks[1],
        format_cards(&view.hole)
    )
}

pub fn write_result(out: &mut dyn Write, result: &HandResult) -> std::io::Result<()> {
    if let Some(sd) = &result.showdown {
        for seat in 0..2 {
            writeln!(
                out,
                "Seat {} shows {} ({})",
                seat,
                format_cards(&sd.holes[seat]),
                sd.descriptions[seat]
            )?;
        }
    }
    match (result.winner, result.folded) {
        (Some(w), Some(f)) => writeln!(out, "Seat {} folds; seat {} wins {}", f, w, result.payouts[w])?,
        (Some(w), None) => writeln!(out, "Seat {} wins {}", w, result.payouts[w])?,
        (None, _) => writeln!(
            out,
            "Split pot: {} / {}",
            result.payouts[0], result.payouts[1]
        )?,
    }
    writeln!(out, "Stacks: {}/{}", result.stacks[0], result.stacks[1])
}

/// One line per street: `flop: 9 buckets, 412 nodes`.
pub fn write_model_summary(out: &mut dyn Write, summary: &ModelSummary) -> std::io::Result<()> {
    for s in &summary.streets {
        writeln!(out, "  {}: {} buckets, {} nodes", s.street, s.buckets, s.nodes)?;
    }
    writeln!(out, "  total nodes: {}", summary.total_nodes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hucfr_engine::action::Action;
    use hucfr_engine::engine::{Engine, HandStep, TableConfig};

    #[test]
    fn view_line_shows_street_and_hole() {
        let mut engine = Engine::new(Some(3), TableConfig::default());
        let view = engine.start_hand().unwrap();
        let mut out = Vec::new();
        write_view(&mut out, &view).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("[preflop] Board: -  Pot: 30"));
        assert!(line.contains(&format_cards(&view.hole)));
    }

    #[test]
    fn fold_result_names_both_seats() {
        let mut engine = Engine::new(Some(3), TableConfig::default());
        engine.start_hand().unwrap();
        let HandStep::Finished(result) = engine.apply_player_action(Action::Fold, None).unwrap()
        else {
            panic!("fold ends the hand");
        };
        let mut out = Vec::new();
        write_result(&mut out, &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Seat 0 folds; seat 1 wins 30"));
        assert!(text.contains("Stacks: 990/1010"));
    }
}
