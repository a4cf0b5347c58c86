//! `train`: run the MCCFR trainer over all four streets and save the model.

use crate::config;
use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, write_model};
use crate::ui;
use hucfr_ai::trainer::PerStreet;
use hucfr_ai::{Trainer, TrainingReport};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Where the model goes when neither `--out` nor a configured model is given.
pub const DEFAULT_MODEL_PATH: &str = "hucfr-model.json.zst";

#[derive(Debug, Clone, Default)]
pub struct TrainArgs {
    pub out: Option<String>,
    pub seed: Option<u64>,
    pub iterations: Option<u64>,
    pub samples: Option<usize>,
    pub report: Option<String>,
}

pub fn handle_train_command(args: TrainArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load()?;
    let mut tc = cfg.trainer_config();
    if let Some(n) = args.iterations {
        tc.iterations = PerStreet::splat(n);
    }
    if let Some(n) = args.samples {
        if n == 0 {
            return Err(CliError::InvalidInput("samples must be >= 1".to_string()));
        }
        tc.samples = PerStreet::splat(n);
        tc.warm_start_hands = PerStreet::splat(n);
    }
    let trainer = Trainer::new(tc)?;

    let path = args
        .out
        .or(cfg.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    writeln!(out, "train: seed={} out={}", seed, path)?;
    info!(seed, out = %path, "training started");

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let (model, report) = trainer.train(&mut rng)?;
    write_model(Path::new(&path), &model)?;

    write_report(out, &report)?;
    writeln!(out, "model saved to {}:", path)?;
    ui::write_model_summary(out, &model.summary())?;

    if let Some(report_path) = args.report {
        let p = Path::new(&report_path);
        ensure_parent_dir(p)?;
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        std::fs::write(p, json)?;
        writeln!(out, "report saved to {}", report_path)?;
    }
    Ok(())
}

fn write_report(out: &mut dyn Write, report: &TrainingReport) -> std::io::Result<()> {
    for s in &report.streets {
        let (mean, std) = s.series.last().map_or((0.0, 0.0), |p| (p.mean, p.std));
        writeln!(
            out,
            "{}: {} buckets, {} nodes, {} iterations ({} skipped), warm-start {} hands ({} aborted)",
            s.street, s.buckets, s.nodes, s.iterations, s.skipped_iterations, s.warm_start_hands, s.aborted_hands
        )?;
        writeln!(
            out,
            "  last block mean {:+.4} std {:.4}  avg positive regret {:.4}  fold equity small {:.3} medium {:.3}",
            mean,
            std,
            s.avg_positive_regret,
            s.fold_equity.raise_small.ratio(),
            s.fold_equity.raise_medium.ratio()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_samples_is_invalid() {
        let args = TrainArgs {
            samples: Some(0),
            ..TrainArgs::default()
        };
        let res = handle_train_command(args, &mut Vec::new());
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }
}
