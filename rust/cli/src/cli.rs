//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use hucfr_ai::equity::OpponentProfile;

#[derive(Parser, Debug)]
#[command(
    name = "hucfr",
    author,
    version,
    about = "Heads-up no-limit hold'em CFR solver"
)]
pub struct HucfrCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a model street by street and save it
    Train {
        /// Output path; `.zst` compresses
        #[arg(long)]
        out: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// MCCFR iterations for every street
        #[arg(long)]
        iterations: Option<u64>,
        /// Clustering samples (and warm-start hands) for every street
        #[arg(long)]
        samples: Option<usize>,
        /// Also write the training report as JSON
        #[arg(long)]
        report: Option<String>,
    },
    /// Play against a bot on stdin
    Play {
        #[arg(long)]
        model: Option<String>,
        #[arg(long, value_enum, default_value_t = Opponent::Cfr)]
        vs: Opponent,
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Self-play: trained model against the heuristic bot
    Eval {
        #[arg(long)]
        model: Option<String>,
        #[arg(long, default_value_t = 1_000)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Sample the average strategy without equity checks
        #[arg(long)]
        no_guard_rails: bool,
    },
    /// Monte Carlo equity of a hand
    Equity {
        /// Two cards, e.g. "As Kd"
        #[arg(long)]
        hole: String,
        #[arg(long)]
        board: Option<String>,
        #[arg(long, default_value_t = 10_000)]
        sims: u32,
        #[arg(long, default_value_t = OpponentProfile::Uniform)]
        profile: OpponentProfile,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Deal a single hand for inspection
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

/// Bot seated against the human in `play`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    /// Trained CFR bot (needs a model)
    Cfr,
    /// Rule-based bot
    Heuristic,
}

impl Opponent {
    /// Returns the AI type understood by [`hucfr_ai::create_ai`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use hucfr_cli::cli::Opponent;
    /// assert_eq!(Opponent::Heuristic.as_str(), "heuristic");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Opponent::Cfr => "cfr",
            Opponent::Heuristic => "heuristic",
        }
    }
}
