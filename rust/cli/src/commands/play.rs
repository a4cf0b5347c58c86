//! # Play Command
//!
//! Human vs bot on stdin. The human sits in seat 0; the dealer button
//! alternates every hand and both stacks are reset when either busts.
//!
//! Input per decision: `fold`, `call`/`check`, `raise [amount]` (also the
//! sized forms `small`, `medium`, `large`/`allin`), or `q` to stop. A raise
//! amount is the chips added on top of the call. Rejected input re-prompts
//! without touching the hand.

use crate::cli::Opponent;
use crate::config;
use crate::error::CliError;
use crate::io_utils::{read_model, read_stdin_line};
use crate::ui;
use hucfr_ai::create_ai;
use hucfr_engine::action::Action;
use hucfr_engine::engine::{Engine, HandStep, HUMAN_SEAT};
use hucfr_engine::errors::GameError;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayerInput {
    Act(Action, Option<u32>),
    Quit,
    Invalid(String),
}

fn parse_player_input(line: &str) -> PlayerInput {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return PlayerInput::Invalid("enter an action".into());
    };
    if matches!(word.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
        return PlayerInput::Quit;
    }
    let Ok(action) = word.parse::<Action>() else {
        return PlayerInput::Invalid(format!("unknown action '{}'", word));
    };
    let amount = match parts.next() {
        None => None,
        Some(_) if !action.is_raise() => {
            return PlayerInput::Invalid(format!("{} takes no amount", action));
        }
        Some(raw) => match raw.parse::<u32>() {
            Ok(0) | Err(_) => {
                return PlayerInput::Invalid(format!("raise amount must be a positive number, got '{}'", raw));
            }
            Ok(n) => Some(n),
        },
    };
    if parts.next().is_some() {
        return PlayerInput::Invalid("too many words".into());
    }
    PlayerInput::Act(action, amount)
}

/// Handle the play command.
///
/// # Arguments
///
/// * `model` - Model file; falls back to the configured model. Required for
///   the CFR opponent
/// * `vs` - Which bot sits in seat 1
/// * `hands` - Number of hands to play (must be >= 1, default: 1)
/// * `seed` - Session seed; falls back to the configured seed, then random
/// * `stdin` - Source of the human's actions
///
/// EOF on `stdin` ends the session like `q`.
pub fn handle_play_command(
    model: Option<&str>,
    vs: Opponent,
    hands: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(1);
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let trained = match (vs, model.map(str::to_string).or(cfg.model.clone())) {
        (Opponent::Cfr, None) => {
            return Err(CliError::InvalidInput(
                "the cfr opponent needs --model or HUCFR_MODEL".to_string(),
            ));
        }
        (Opponent::Cfr, Some(path)) => Some(read_model(Path::new(&path))?),
        (Opponent::Heuristic, _) => None,
    };
    if let Some(m) = &trained
        && !m.is_complete()
    {
        ui::display_warning(err, "model does not cover every street; missing streets play uniformly")?;
    }
    let bot = create_ai(vs.as_str(), trained)?;

    writeln!(out, "play: vs={} hands={} seed={}", vs.as_str(), hands, seed)?;
    let mut engine = Engine::new(Some(seed), cfg.table());
    let mut rng = ChaCha20Rng::seed_from_u64(engine.next_seed());

    let mut played = 0u32;
    let mut net = 0i64;
    'session: for i in 1..=hands {
        let view = engine.start_hand()?;
        let role = if view.dealer == HUMAN_SEAT { "button" } else { "big blind" };
        writeln!(out, "Hand {} (you are the {})", i, role)?;

        let mut finished = engine.result().cloned();
        while finished.is_none() {
            let state = engine.state().ok_or(GameError::NoHandInProgress)?;
            let seat = state.to_act();

            let step = if seat == HUMAN_SEAT {
                ui::write_view(out, &engine.view(HUMAN_SEAT)?)?;
                let to_call = state.to_call(HUMAN_SEAT);
                if to_call > 0 {
                    write!(out, "To call {}. Action (fold/call/raise [amount]/q): ", to_call)?;
                } else {
                    write!(out, "Action (check/raise [amount]/q): ")?;
                }
                out.flush()?;

                let Some(line) = read_stdin_line(stdin) else {
                    writeln!(out)?;
                    break 'session;
                };
                match parse_player_input(&line) {
                    PlayerInput::Quit => break 'session,
                    PlayerInput::Invalid(msg) => {
                        ui::write_error(err, &msg)?;
                        continue;
                    }
                    PlayerInput::Act(action, amount) => {
                        match engine.apply_player_action(action, amount) {
                            Ok(step) => step,
                            Err(e) => {
                                ui::write_error(err, &format!("Invalid action: {}", e))?;
                                continue;
                            }
                        }
                    }
                }
            } else {
                let decision = bot.get_action(state, seat, &mut rng);
                debug!(bot = bot.name(), %decision, "bot decided");
                writeln!(out, "{}: {}", bot.name(), decision)?;
                engine.apply_action(seat, decision.action, decision.amount)?
            };

            if let HandStep::Finished(result) = step {
                finished = Some(result);
            }
        }

        if let Some(result) = finished {
            ui::write_result(out, &result)?;
            if let Some(state) = engine.state() {
                net += state.net_result(HUMAN_SEAT);
            }
            played += 1;
        }
    }

    writeln!(out, "Hands played: {}", played)?;
    writeln!(out, "Net: {:+}", net)?;
    Ok(())
}
