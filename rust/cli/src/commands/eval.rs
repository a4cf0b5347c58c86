//! Self-play evaluation: a trained model against the heuristic bot.
//!
//! Every hand is a fresh table seeded from the base seed, so hands are
//! independent and reproducible. The model's seat alternates, which also
//! alternates who holds the button.

use crate::config;
use crate::error::CliError;
use crate::io_utils::read_model;
use crate::ui;
use hucfr_ai::bot::{BotOptions, CfrBot};
use hucfr_ai::heuristic::HeuristicAI;
use hucfr_ai::AIOpponent;
use hucfr_engine::action::Action;
use hucfr_engine::engine::{Engine, HandStep, TableConfig};
use hucfr_engine::errors::GameError;
use hucfr_engine::game::GameState;
use hucfr_engine::history::ActionRecord;
use rand::SeedableRng;
use rand::RngCore;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Statistics tracked for one side of the match
#[derive(Debug, Clone, Default, PartialEq)]
struct EvalStats {
    hands_played: u32,
    wins: u32,
    losses: u32,
    ties: u32,
    total_chips_won: i64,
    folds: u32,
    calls: u32,
    raises: u32,
}

impl EvalStats {
    fn update_from_actions(&mut self, actions: &[ActionRecord], seat: usize) {
        for record in actions.iter().filter(|r| r.seat == seat) {
            match record.action {
                Action::Fold => self.folds += 1,
                Action::Call => self.calls += 1,
                _ => self.raises += 1,
            }
        }
    }

    fn update_result(&mut self, chip_delta: i64) {
        self.hands_played += 1;
        match chip_delta {
            d if d > 0 => self.wins += 1,
            d if d < 0 => self.losses += 1,
            _ => self.ties += 1,
        }
        self.total_chips_won += chip_delta;
    }

    fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            (self.wins as f64 / self.hands_played as f64) * 100.0
        }
    }

    fn avg_chip_delta(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.total_chips_won as f64 / self.hands_played as f64
        }
    }

    /// Big blinds won per 100 hands.
    fn bb_per_100(&self, big_blind: u32) -> f64 {
        self.avg_chip_delta() * 100.0 / big_blind.max(1) as f64
    }

    fn action_percentage(&self, count: u32) -> f64 {
        let total = self.folds + self.calls + self.raises;
        if total == 0 {
            0.0
        } else {
            (count as f64 / total as f64) * 100.0
        }
    }
}

/// Plays one hand to the end with `bots[seat]` deciding for each seat.
fn play_hand(
    engine: &mut Engine,
    bots: [&dyn AIOpponent; 2],
    rng: &mut dyn RngCore,
) -> Result<GameState, CliError> {
    engine.start_hand()?;
    while engine.result().is_none() {
        let state = engine.state().ok_or(GameError::NoHandInProgress)?;
        let seat = state.to_act();
        let decision = bots[seat].get_action(state, seat, rng);
        if let HandStep::Finished(_) = engine.apply_action(seat, decision.action, decision.amount)? {
            break;
        }
    }
    engine
        .state()
        .cloned()
        .ok_or_else(|| GameError::NoHandInProgress.into())
}

/// Evaluates the model at `model` (or the configured model) over `hands`
/// hands and prints win rate, chip delta and action mix for both bots.
pub fn handle_eval_command(
    model: Option<&str>,
    hands: u32,
    seed: Option<u64>,
    guard_rails: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load()?;
    let path = model
        .map(str::to_string)
        .or(cfg.model.clone())
        .ok_or_else(|| CliError::InvalidInput("eval needs --model or HUCFR_MODEL".to_string()))?;
    let trained = read_model(Path::new(&path))?;
    let summary = trained.summary();

    let options = BotOptions {
        guard_rails,
        ..BotOptions::default()
    };
    let cfr = CfrBot::with_options(trained, options);
    let heuristic = HeuristicAI::new();
    let table: TableConfig = cfg.table();
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    writeln!(
        out,
        "eval: {} vs {} hands={} seed={} guard_rails={}",
        cfr.name(),
        heuristic.name(),
        hands,
        base_seed,
        guard_rails
    )?;
    writeln!(out, "model {}:", path)?;
    ui::write_model_summary(out, &summary)?;

    let mut stats_cfr = EvalStats::default();
    let mut stats_heur = EvalStats::default();
    for hand_num in 0..hands {
        let mut engine = Engine::new(Some(base_seed.wrapping_add(hand_num as u64)), table);
        let mut rng = ChaCha20Rng::seed_from_u64(engine.next_seed());
        let cfr_seat = (hand_num % 2) as usize;
        let bots: [&dyn AIOpponent; 2] = if cfr_seat == 0 {
            [&cfr, &heuristic]
        } else {
            [&heuristic, &cfr]
        };

        let state = play_hand(&mut engine, bots, &mut rng)?;
        stats_cfr.update_from_actions(state.actions(), cfr_seat);
        stats_heur.update_from_actions(state.actions(), 1 - cfr_seat);
        stats_cfr.update_result(state.net_result(cfr_seat));
        stats_heur.update_result(state.net_result(1 - cfr_seat));

        if (hand_num + 1) % 1_000 == 0 {
            info!(hands = hand_num + 1, chips = stats_cfr.total_chips_won, "eval progress");
        }
    }

    for (name, stats) in [(cfr.name(), &stats_cfr), (heuristic.name(), &stats_heur)] {
        writeln!(out, "{}:", name)?;
        writeln!(
            out,
            "  hands {}  wins {}  losses {}  ties {}  win rate {:.1}%",
            stats.hands_played,
            stats.wins,
            stats.losses,
            stats.ties,
            stats.win_rate()
        )?;
        writeln!(
            out,
            "  chip delta {:+}  avg {:+.2}/hand  {:+.1} bb/100",
            stats.total_chips_won,
            stats.avg_chip_delta(),
            stats.bb_per_100(table.blinds.big)
        )?;
        writeln!(
            out,
            "  actions: fold {:.1}%  call {:.1}%  raise {:.1}%",
            stats.action_percentage(stats.folds),
            stats.action_percentage(stats.calls),
            stats.action_percentage(stats.raises)
        )?;
    }
    Ok(())
}
