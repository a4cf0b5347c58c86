use hucfr_ai::cfr::TrainedModel;
use hucfr_ai::features;
use hucfr_ai::trainer::{PerStreet, Trainer, TrainerConfig};
use hucfr_engine::deck::Deck;
use hucfr_engine::game::GameState;
use hucfr_engine::history::Street;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn tiny_config() -> TrainerConfig {
    TrainerConfig {
        iterations: PerStreet::splat(60),
        samples: PerStreet::splat(40),
        warm_start_hands: PerStreet::splat(20),
        feature_equity_samples: 8,
        log_every: 20,
        ..TrainerConfig::default()
    }
}

fn train(seed: u64) -> TrainedModel {
    let trainer = Trainer::new(tiny_config()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    trainer.train(&mut rng).unwrap().0
}

/// A decision point at the start of `street`, as the trainer deals them.
fn spot(street: Street, rng: &mut ChaCha8Rng) -> GameState {
    let deck = Deck::shuffled(rng);
    match street {
        Street::Preflop => {
            let mut s = GameState::new_hand(deck, [1000, 1000], 0, Default::default()).unwrap();
            s.post_blinds().unwrap();
            s
        }
        _ => GameState::deal_at_street(deck, street, [990, 990], [10, 10], 0).unwrap(),
    }
}

#[test]
fn persist_restore_keeps_buckets_and_strategies() {
    let model = train(1);
    let bytes = model.persist().unwrap();
    let restored = TrainedModel::restore(&bytes).unwrap();
    assert_eq!(restored, model);

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for street in Street::ALL {
        let a = model.require(street).unwrap();
        let b = restored.require(street).unwrap();
        for _ in 0..50 {
            let state = spot(street, &mut rng);
            let f = features::from_state(&state, state.to_act(), &a.features, &mut rng);
            assert_eq!(a.bucketer.predict(&f), b.bucketer.predict(&f));
        }
        for (key, node) in &a.nodes {
            assert_eq!(b.average_strategy(key), Some(node.average_strategy()));
        }
    }
}

#[test]
fn restore_rejects_garbage() {
    assert!(TrainedModel::restore(b"{\"streets\": 3}").is_err());
    assert!(TrainedModel::restore(b"").is_err());
}

#[test]
fn average_strategies_are_distributions() {
    let model = train(2);
    assert!(model.is_complete());
    for street in Street::ALL {
        let sm = model.require(street).unwrap();
        assert!(!sm.nodes.is_empty(), "{street} has no nodes");
        for node in sm.nodes.values() {
            let s = node.average_strategy();
            assert!(s.iter().all(|&p| (0.0..=1.0).contains(&p)));
            assert!((s.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn same_seed_same_model() {
    assert_eq!(train(5), train(5));
}

#[test]
fn report_tracks_every_street() {
    let trainer = Trainer::new(tiny_config()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let (model, report) = trainer.train(&mut rng).unwrap();

    assert_eq!(report.streets.len(), 4);
    let summary = model.summary();
    for (s, street) in report.streets.iter().zip(Street::ALL) {
        assert_eq!(s.street, street);
        assert_eq!(s.iterations, 60);
        let points: Vec<u64> = s.series.iter().map(|p| p.iteration).collect();
        assert_eq!(points, vec![20, 40, 60]);
        assert!(s.series.iter().all(|p| p.std >= 0.0 && p.avg_regret >= 0.0));
        assert!(s.fold_equity.raise_small.attempts >= 1);
        assert!(s.skipped_iterations <= s.iterations);

        let ss = summary.streets.iter().find(|x| x.street == street).unwrap();
        assert_eq!(ss.nodes, s.nodes);
        assert_eq!(ss.buckets, s.buckets);
        assert!(s.buckets >= 2);
    }
}

#[test]
fn retraining_a_street_replaces_it() {
    let trainer = Trainer::new(tiny_config()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut model = TrainedModel::new();
    trainer.train_street(Street::River, &mut model, &mut rng).unwrap();
    assert!(model.street(Street::River).is_some());
    assert!(model.street(Street::Flop).is_none());
    assert!(!model.is_complete());

    trainer.train_street(Street::River, &mut model, &mut rng).unwrap();
    assert_eq!(model.summary().streets.len(), 1);
}

#[test]
fn invalid_configs_are_rejected() {
    let mut cfg = tiny_config();
    cfg.blinds.small = cfg.blinds.big;
    assert!(Trainer::new(cfg).is_err());

    let mut cfg = tiny_config();
    cfg.epsilon.flop = 1.5;
    assert!(Trainer::new(cfg).is_err());

    let mut cfg = tiny_config();
    cfg.samples.turn = 0;
    assert!(Trainer::new(cfg).is_err());
}
