//! # hucfr CLI Library
//!
//! Command-line front end for the heads-up CFR solver: train a model, play
//! against it, evaluate it against the heuristic bot, and inspect equities
//! and deals.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand, writing to the
//! streams it is given.
//!
//! ```
//! use std::io;
//! let args = vec!["hucfr", "deal", "--seed", "42"];
//! let code = hucfr_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `train`: Train all four streets and save the model
//! - `play`: Play against the CFR or heuristic bot on stdin
//! - `eval`: CFR bot vs heuristic bot self-play
//! - `equity`: Monte Carlo equity of a hand
//! - `deal`: Deal a single hand for inspection
//! - `cfg`: Display resolved configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, HucfrCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_equity_command, handle_eval_command,
    handle_play_command, handle_train_command, TrainArgs,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["train", "play", "eval", "equity", "deal", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HucfrCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Train {
            out: model_out,
            seed,
            iterations,
            samples,
            report,
        } => handle_train_command(
            TrainArgs {
                out: model_out,
                seed,
                iterations,
                samples,
                report,
            },
            out,
        ),
        Commands::Play {
            model,
            vs,
            hands,
            seed,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(
                model.as_deref(),
                vs,
                hands,
                seed,
                out,
                err,
                &mut stdin_lock,
            )
        }
        Commands::Eval {
            model,
            hands,
            seed,
            no_guard_rails,
        } => handle_eval_command(model.as_deref(), hands, seed, !no_guard_rails, out),
        Commands::Equity {
            hole,
            board,
            sims,
            profile,
            seed,
        } => handle_equity_command(&hole, board.as_deref(), sims, profile, seed, out),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::for_error(&e)
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: hucfr <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: hucfr --help");
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_goes_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(run(["hucfr", "--help"], &mut out, &mut err), 0);
        let text = String::from_utf8(out).unwrap();
        for c in COMMANDS {
            assert!(text.contains(c), "{c} missing from help");
        }
    }

    #[test]
    fn unknown_command_prints_usage() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(run(["hucfr", "sim"], &mut out, &mut err), 2);
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Usage: hucfr"));
        assert!(out.is_empty());
    }

    #[test]
    fn command_errors_are_reported_on_stderr() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            ["hucfr", "equity", "--hole", "As", "--sims", "10"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 2);
        assert!(String::from_utf8(err).unwrap().starts_with("Error: Invalid input"));
    }
}
