//! End-to-end runs of every subcommand through `hucfr_cli::run`.
//!
//! All tests are serialized: every command resolves configuration from the
//! process environment.

use hucfr_cli::config::{BIG_BLIND_ENV, CONFIG_ENV, MODEL_ENV, SEED_ENV, SMALL_BLIND_ENV, STACK_ENV};
use hucfr_cli::logging::TestLogSubscriber;
use serde_json::Value;
use serial_test::serial;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

struct Output {
    code: i32,
    stdout: String,
    stderr: String,
}

fn run(args: &[&str]) -> Output {
    let mut argv = vec!["hucfr"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = hucfr_cli::run(argv, &mut out, &mut err);
    Output {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

fn clear_env() {
    for key in [CONFIG_ENV, SEED_ENV, STACK_ENV, SMALL_BLIND_ENV, BIG_BLIND_ENV, MODEL_ENV] {
        // SAFETY: every test in this file is #[serial]
        unsafe { std::env::remove_var(key) };
    }
}

fn train_tiny(path: &Path) -> Output {
    run(&[
        "train",
        "--out",
        path.to_str().unwrap(),
        "--seed",
        "7",
        "--iterations",
        "40",
        "--samples",
        "30",
    ])
}

#[test]
#[serial]
fn deal_is_reproducible() {
    clear_env();
    let a = run(&["deal", "--seed", "42"]);
    let b = run(&["deal", "--seed", "42"]);
    assert_eq!(a.code, 0);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("Board:"));
}

#[test]
#[serial]
fn equity_reports_a_probability() {
    clear_env();
    let res = run(&["equity", "--hole", "As Ad", "--sims", "300", "--seed", "3"]);
    assert_eq!(res.code, 0, "{}", res.stderr);
    let line = res.stdout.lines().find(|l| l.starts_with("Equity:")).unwrap();
    let eq: f64 = line.trim_start_matches("Equity:").trim().parse().unwrap();
    assert!(eq > 0.7 && eq < 0.95, "aces preflop: {eq}");
}

#[test]
#[serial]
fn equity_rejects_duplicate_cards() {
    clear_env();
    let res = run(&["equity", "--hole", "As Kd", "--board", "As 2c 3d"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Error:"));
}

#[test]
#[serial]
fn cfg_reports_defaults() {
    clear_env();
    let res = run(&["cfg"]);
    assert_eq!(res.code, 0, "{}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["starting_stack"]["value"].as_u64(), Some(1000));
    assert_eq!(json["starting_stack"]["source"].as_str(), Some("default"));
    assert_eq!(json["big_blind"]["value"].as_u64(), Some(20));
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["trainer"]["value"]["iterations"]["flop"].as_u64(), Some(50_000));
}

#[test]
#[serial]
fn cfg_env_overrides_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("hucfr.toml");
    std::fs::write(
        &file,
        "seed = 456\nstarting_stack = 2000\nmodel = \"file.json\"\n[trainer]\nlog_every = 50\n",
    )
    .unwrap();
    // SAFETY: serialized
    unsafe {
        std::env::set_var(CONFIG_ENV, &file);
        std::env::set_var(SEED_ENV, "99");
    }

    let res = run(&["cfg"]);
    clear_env();
    assert_eq!(res.code, 0, "{}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(99));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["starting_stack"]["value"].as_u64(), Some(2000));
    assert_eq!(json["starting_stack"]["source"].as_str(), Some("file"));
    assert_eq!(json["model"]["value"].as_str(), Some("file.json"));
    assert_eq!(json["trainer"]["source"].as_str(), Some("file"));
    assert_eq!(json["trainer"]["value"]["log_every"].as_u64(), Some(50));
    // the trainer follows the table stack
    assert_eq!(json["trainer"]["value"]["starting_stack"].as_u64(), Some(2000));
}

#[test]
#[serial]
fn invalid_env_is_a_config_error() {
    clear_env();
    // SAFETY: serialized
    unsafe {
        std::env::set_var(SMALL_BLIND_ENV, "30");
    }
    let res = run(&["cfg"]);
    clear_env();
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Configuration error"));
}

#[test]
#[serial]
fn train_then_eval() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("models").join("tiny.json.zst");
    let report = dir.path().join("report.json");

    let argv = vec![
        "train",
        "--out",
        model.to_str().unwrap(),
        "--seed",
        "7",
        "--iterations",
        "40",
        "--samples",
        "30",
        "--report",
        report.to_str().unwrap(),
    ];
    let res = run(&argv);
    assert_eq!(res.code, 0, "{}", res.stderr);
    assert!(model.exists());
    for street in ["preflop", "flop", "turn", "river"] {
        assert!(res.stdout.contains(&format!("{street}: ")), "{}", res.stdout);
    }
    let json: Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["streets"].as_array().unwrap().len(), 4);

    let res = run(&["eval", "--model", model.to_str().unwrap(), "--hands", "20", "--seed", "1"]);
    assert_eq!(res.code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("CfrBot:"));
    assert!(res.stdout.contains("HeuristicAI:"));
    assert!(res.stdout.contains("hands 20"));

    // SAFETY: serialized
    unsafe { std::env::set_var(MODEL_ENV, &model) };
    let res = run(&["eval", "--hands", "2", "--seed", "2", "--no-guard-rails"]);
    clear_env();
    assert_eq!(res.code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("guard_rails=false"));
}

#[test]
#[serial]
fn training_emits_progress_logs() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("tiny.json");

    let subscriber = TestLogSubscriber::new();
    let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());
    let res = tracing::subscriber::with_default(registry, || train_tiny(&model));
    assert_eq!(res.code, 0, "{}", res.stderr);

    let entries = subscriber.entries();
    let trained: Vec<_> = entries
        .iter()
        .filter(|e| e.message.contains("street trained"))
        .collect();
    assert_eq!(trained.len(), 4);
    assert!(trained.iter().all(|e| e.field("avg_positive_regret").is_some()));
    assert!(entries.iter().any(|e| e.message.contains("training started")));
}

#[test]
#[serial]
fn eval_without_model_fails() {
    clear_env();
    let res = run(&["eval", "--hands", "5"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("--model"));
}

#[test]
#[serial]
fn eval_with_corrupt_model_fails() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("broken.json.zst");
    std::fs::write(&model, b"definitely not zstd").unwrap();
    let res = run(&["eval", "--model", model.to_str().unwrap(), "--hands", "5"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Model error"));
}
