//! Outcome-sampling Monte Carlo CFR, one street at a time.
//!
//! Each street is trained in three phases: fit the bucketer on random deals,
//! seed regrets from heuristic play, then run sampled trajectories. A
//! trajectory is a whole hand; decisions on the street being trained come
//! from (and update) its node table, decisions on later streets come from
//! the heuristic.

use std::collections::HashMap;

use hucfr_engine::action::{Action, NUM_ACTIONS};
use hucfr_engine::deck::Deck;
use hucfr_engine::errors::GameError;
use hucfr_engine::game::GameState;
use hucfr_engine::history::{ActionRecord, Street};
use hucfr_engine::player::STARTING_STACK;
use hucfr_engine::rules::Blinds;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bucket::{cluster_count_for, Bucketer};
use crate::cfr::{sample_action, InfoKey, Node, Strategy, StreetModel, TrainedModel, UNIFORM};
use crate::equity::{equity, OpponentProfile};
use crate::errors::AiError;
use crate::features::{self, FeatureConfig};
use crate::heuristic::{heuristic_action, HeuristicConfig};

/// Below this equity a heuristic shove is replaced by a call while seeding.
pub const WARM_START_SHOVE_EQUITY: f64 = 0.85;

/// Guards the importance weight against a zero sampling probability.
const PROB_FLOOR: f64 = 1e-12;

/// One value per street.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerStreet<T> {
    pub preflop: T,
    pub flop: T,
    pub turn: T,
    pub river: T,
}

impl<T: Copy> PerStreet<T> {
    pub fn splat(value: T) -> Self {
        Self {
            preflop: value,
            flop: value,
            turn: value,
            river: value,
        }
    }

    pub fn get(&self, street: Street) -> T {
        match street {
            Street::Preflop => self.preflop,
            Street::Flop => self.flop,
            Street::Turn => self.turn,
            Street::River => self.river,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// MCCFR trajectories per street
    pub iterations: PerStreet<u64>,
    /// Random deals the bucketer is fitted on
    pub samples: PerStreet<usize>,
    /// Heuristic hands simulated to seed regrets
    pub warm_start_hands: PerStreet<usize>,
    /// Exploration weight at the first iteration; decays linearly to zero
    pub epsilon: PerStreet<f64>,
    pub feature_equity_samples: u32,
    /// Diagnostics interval, in iterations
    pub log_every: u64,
    pub kmeans_max_iter: usize,
    pub starting_stack: u32,
    pub blinds: Blinds,
    /// Chips each seat already has in when a postflop subgame starts
    pub postflop_contribution: u32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        let samples = PerStreet {
            preflop: 20_000,
            flop: 10_000,
            turn: 20_000,
            river: 10_000,
        };
        Self {
            iterations: PerStreet {
                preflop: 30_000,
                flop: 50_000,
                turn: 30_000,
                river: 10_000,
            },
            samples,
            warm_start_hands: samples,
            epsilon: PerStreet {
                preflop: 0.10,
                flop: 0.05,
                turn: 0.10,
                river: 0.02,
            },
            feature_equity_samples: 20,
            log_every: 500,
            kmeans_max_iter: 25,
            starting_stack: STARTING_STACK,
            blinds: Blinds::default(),
            postflop_contribution: 10,
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<(), AiError> {
        let bad = |msg: &str| -> Result<(), AiError> { Err(AiError::InvalidConfig(msg.to_string())) };
        if self.starting_stack == 0 {
            return bad("starting stack must be positive");
        }
        if self.blinds.small == 0 || self.blinds.small >= self.blinds.big {
            return bad("blinds must satisfy 0 < small < big");
        }
        if self.blinds.big > self.starting_stack {
            return bad("big blind exceeds the starting stack");
        }
        if self.postflop_contribution >= self.starting_stack {
            return bad("postflop contribution must leave chips behind");
        }
        if self.log_every == 0 {
            return bad("log interval must be positive");
        }
        for street in Street::ALL {
            if self.samples.get(street) == 0 {
                return bad("every street needs clustering samples");
            }
            let eps = self.epsilon.get(street);
            if !(0.0..=1.0).contains(&eps) {
                return bad("epsilon must lie in [0, 1]");
            }
        }
        Ok(())
    }

    pub fn features(&self) -> FeatureConfig {
        FeatureConfig {
            equity_samples: self.feature_equity_samples,
            starting_stack: self.starting_stack,
        }
    }
}

/// Raise attempts and the folds they induced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldCount {
    pub attempts: u64,
    pub folds: u64,
}

impl FoldCount {
    pub fn ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.folds as f64 / self.attempts as f64
        }
    }
}

/// Empirical fold equity of the small and medium raises on one street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldStats {
    pub raise_small: FoldCount,
    pub raise_medium: FoldCount,
}

impl Default for FoldStats {
    /// Starts from one attempt and one fold each.
    fn default() -> Self {
        let prior = FoldCount {
            attempts: 1,
            folds: 1,
        };
        Self {
            raise_small: prior,
            raise_medium: prior,
        }
    }
}

impl FoldStats {
    /// Counts every small/medium raise on `street` in a finished hand, and
    /// whether the reply was a fold.
    pub fn record(&mut self, street: Street, actions: &[ActionRecord]) {
        for (i, rec) in actions.iter().enumerate() {
            if rec.street != street {
                continue;
            }
            let slot = match rec.action {
                Action::RaiseSmall => &mut self.raise_small,
                Action::RaiseMedium => &mut self.raise_medium,
                _ => continue,
            };
            slot.attempts += 1;
            if actions.get(i + 1).is_some_and(|next| next.action == Action::Fold) {
                slot.folds += 1;
            }
        }
    }
}

/// Diagnostics for one logging block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergencePoint {
    pub iteration: u64,
    /// Mean normalised payoff of seat 0 over the block
    pub mean: f64,
    pub std: f64,
    /// Total positive regret over iterations so far
    pub avg_regret: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetReport {
    pub street: Street,
    pub buckets: usize,
    pub warm_start_hands: usize,
    pub aborted_hands: usize,
    pub iterations: u64,
    pub skipped_iterations: u64,
    pub nodes: usize,
    pub series: Vec<ConvergencePoint>,
    pub avg_positive_regret: f64,
    pub fold_equity: FoldStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub streets: Vec<StreetReport>,
}

#[derive(Debug, Default)]
struct Tally {
    counts: [u64; NUM_ACTIONS],
    utils: [f64; NUM_ACTIONS],
}

struct Visit {
    key: Option<InfoKey>,
    action: Action,
    prob: f64,
    seat: usize,
}

/// Trains a [`TrainedModel`] street by street.
///
/// # Example
///
/// ```rust
/// use hucfr_ai::trainer::{PerStreet, Trainer, TrainerConfig};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let config = TrainerConfig {
///     iterations: PerStreet::splat(40),
///     samples: PerStreet::splat(30),
///     warm_start_hands: PerStreet::splat(10),
///     log_every: 20,
///     ..TrainerConfig::default()
/// };
/// let trainer = Trainer::new(config).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let (model, report) = trainer.train(&mut rng).unwrap();
/// assert!(model.is_complete());
/// assert_eq!(report.streets.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainerConfig,
    heuristic: HeuristicConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Result<Self, AiError> {
        config.validate()?;
        Ok(Self {
            config,
            heuristic: HeuristicConfig::default(),
        })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Trains preflop through river into a fresh model.
    pub fn train<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(TrainedModel, TrainingReport), AiError> {
        let mut model = TrainedModel::new();
        let mut report = TrainingReport::default();
        for street in Street::ALL {
            report.streets.push(self.train_street(street, &mut model, rng)?);
        }
        Ok((model, report))
    }

    /// Fits, seeds and trains `street`, replacing its entry in `model`.
    pub fn train_street<R: Rng + ?Sized>(
        &self,
        street: Street,
        model: &mut TrainedModel,
        rng: &mut R,
    ) -> Result<StreetReport, AiError> {
        let iterations = self.config.iterations.get(street);
        let eps0 = self.config.epsilon.get(street);
        info!(%street, iterations, "training street");

        let bucketer = self.fit_bucketer(street, rng)?;
        let buckets = bucketer.clusters();
        let mut sm = StreetModel::new(street, bucketer, self.config.features());
        let mut fold = FoldStats::default();

        let warm_start_hands = self.config.warm_start_hands.get(street);
        let aborted_hands = self.warm_start(&mut sm, warm_start_hands, eps0, &mut fold, rng)?;
        info!(%street, nodes = sm.nodes.len(), aborted_hands, "warm start complete");

        let mut series = Vec::new();
        let mut block = Vec::new();
        let mut skipped = 0u64;
        for i in 1..=iterations {
            let eps = eps0 * (1.0 - i as f64 / iterations as f64);
            match self.sample_trajectory(&mut sm, eps, &mut fold, rng)? {
                Some(util) => block.push(util),
                None => skipped += 1,
            }
            if i % self.config.log_every == 0 {
                let (mean, std) = mean_std(&block);
                let avg_regret = sm.total_positive_regret() / i as f64;
                info!(%street, iteration = i, mean, std, avg_regret, "mccfr progress");
                series.push(ConvergencePoint {
                    iteration: i,
                    mean,
                    std,
                    avg_regret,
                });
                block.clear();
            }
        }

        let avg_positive_regret = if iterations == 0 {
            0.0
        } else {
            sm.total_positive_regret() / iterations as f64
        };
        info!(
            %street,
            fold_equity_small = fold.raise_small.ratio(),
            fold_equity_medium = fold.raise_medium.ratio(),
            avg_positive_regret,
            "street trained"
        );
        let report = StreetReport {
            street,
            buckets,
            warm_start_hands,
            aborted_hands,
            iterations,
            skipped_iterations: skipped,
            nodes: sm.nodes.len(),
            series,
            avg_positive_regret,
            fold_equity: fold,
        };
        model.insert(sm);
        Ok(report)
    }

    /// Clusters features of the opening decision of random deals.
    pub fn fit_bucketer<R: Rng + ?Sized>(
        &self,
        street: Street,
        rng: &mut R,
    ) -> Result<Bucketer, AiError> {
        let n = self.config.samples.get(street);
        let fc = self.config.features();
        let mut samples = Vec::with_capacity(n);
        for _ in 0..n {
            let state = self.deal(street, rng)?;
            let seat = rng.random_range(0..2);
            samples.push(features::from_state(&state, seat, &fc, rng));
        }
        Bucketer::fit(&samples, cluster_count_for(n), self.config.kmeans_max_iter, rng)
    }

    /// Seeds regrets from heuristic play. Returns the number of aborted
    /// hands.
    ///
    /// Per visited info set, an action's regret is how far its average
    /// payoff fell short of the best action's; actions never tried count as
    /// a full stack lost. Sets with no regret at all get `floor` everywhere.
    fn warm_start<R: Rng + ?Sized>(
        &self,
        sm: &mut StreetModel,
        hands: usize,
        floor: f64,
        fold: &mut FoldStats,
        rng: &mut R,
    ) -> Result<usize, AiError> {
        let street = sm.street;
        let stack = self.config.starting_stack as f64;
        let mut tallies: HashMap<InfoKey, Tally> = HashMap::new();
        let mut aborted = 0usize;

        'hands: for _ in 0..hands {
            let mut state = self.deal(street, rng)?;
            let mut path = Vec::new();
            while !state.is_terminal() {
                let seat = state.to_act();
                let mut action = heuristic_action(&state, seat, &self.heuristic, rng);
                if state.street() == street {
                    if action == Action::RaiseLarge {
                        let eq = equity(
                            state.hole(seat),
                            state.board(),
                            self.config.feature_equity_samples,
                            OpponentProfile::Uniform,
                            rng,
                        );
                        if eq < WARM_START_SHOVE_EQUITY {
                            action = Action::Call;
                        }
                    }
                    match sm.classify(&state, seat, rng) {
                        Ok(Some(key)) => path.push((key, action, seat)),
                        Ok(None) => {}
                        Err(GameError::HistoryOverflow) => {
                            warn!(%street, history = state.history(), "warm-start hand aborted");
                            aborted += 1;
                            continue 'hands;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                apply_or_call(&mut state, seat, action)?;
            }

            let util = state.payoff(0) as f64 / stack;
            for (key, action, seat) in path {
                let t = tallies.entry(key).or_default();
                t.counts[action.index()] += 1;
                t.utils[action.index()] += if seat == 0 { util } else { -util };
            }
            fold.record(street, state.actions());
        }

        for (key, t) in tallies {
            sm.nodes.insert(key, Node::with_regrets(seed_regrets(&t, floor)));
        }
        Ok(aborted)
    }

    /// Plays one hand, sampling one action per visited info set, then
    /// pushes the importance-weighted payoff into each sampled action's
    /// regret, last visit first.
    ///
    /// Returns seat 0's normalised payoff, or `None` when the hand's history
    /// outgrew the key encoding and was abandoned.
    fn sample_trajectory<R: Rng + ?Sized>(
        &self,
        sm: &mut StreetModel,
        epsilon: f64,
        fold: &mut FoldStats,
        rng: &mut R,
    ) -> Result<Option<f64>, AiError> {
        let street = sm.street;
        let mut state = self.deal(street, rng)?;
        let mut visits: Vec<Visit> = Vec::new();
        let mut reach = 1.0;

        while !state.is_terminal() {
            let seat = state.to_act();
            if state.street() != street {
                let action = heuristic_action(&state, seat, &self.heuristic, rng);
                apply_or_call(&mut state, seat, action)?;
                continue;
            }
            let key = match sm.classify(&state, seat, rng) {
                Ok(key) => key,
                Err(GameError::HistoryOverflow) => {
                    debug!(%street, "trajectory abandoned, history too long");
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };
            let strategy = match key {
                Some(k) => {
                    let node = sm.nodes.entry(k).or_default();
                    let s = node.exploring_strategy(epsilon);
                    node.accumulate_strategy(&s, reach);
                    s
                }
                None => {
                    debug!(%street, "unclassified state, playing uniform");
                    UNIFORM
                }
            };
            let action = sample_action(&strategy, rng);
            let prob = strategy[action.index()];
            visits.push(Visit {
                key,
                action,
                prob,
                seat,
            });
            apply_or_call(&mut state, seat, action)?;
            reach *= prob;
        }

        let util = state.payoff(0) as f64 / self.config.starting_stack as f64;
        backpropagate(&mut sm.nodes, &visits, util);
        fold.record(street, state.actions());
        Ok(Some(util))
    }

    /// A fresh hand positioned at the start of `street`, seat 0 dealing.
    fn deal<R: Rng + ?Sized>(&self, street: Street, rng: &mut R) -> Result<GameState, GameError> {
        let deck = Deck::shuffled(rng);
        let stack = self.config.starting_stack;
        match street {
            Street::Preflop => {
                let mut state = GameState::new_hand(deck, [stack; 2], 0, self.config.blinds)?;
                state.post_blinds()?;
                Ok(state)
            }
            _ => {
                let c = self.config.postflop_contribution;
                GameState::deal_at_street(deck, street, [stack - c; 2], [c; 2], 0)
            }
        }
    }
}

/// Starting regrets for one info set from its warm-start tally.
///
/// An action's regret is how far its average payoff fell short of the best
/// action's; actions never tried average -1.0, a full stack lost. When no
/// action fell short, every action gets `floor`.
fn seed_regrets(t: &Tally, floor: f64) -> Strategy {
    let mut avg = [-1.0; NUM_ACTIONS];
    for a in 0..NUM_ACTIONS {
        if t.counts[a] > 0 {
            avg[a] = t.utils[a] / t.counts[a] as f64;
        }
    }
    let best = avg.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let regrets = avg.map(|u| (best - u).max(0.0));
    if regrets.iter().sum::<f64>() == 0.0 {
        [floor; NUM_ACTIONS]
    } else {
        regrets
    }
}

/// Adds `util / prob` to each visit's sampled action, negated for seat 1,
/// last visit first. `util` is seat 0's normalised payoff. Unkeyed visits
/// and keys without a node are skipped.
fn backpropagate(nodes: &mut HashMap<InfoKey, Node>, visits: &[Visit], util: f64) {
    for v in visits.iter().rev() {
        let Some(key) = v.key else { continue };
        if let Some(node) = nodes.get_mut(&key) {
            let u = if v.seat == 0 { util } else { -util };
            node.add_regret(v.action, u / (v.prob + PROB_FLOOR));
        }
    }
}

/// Applies `action`, downgrading a refused raise to a call.
fn apply_or_call(state: &mut GameState, seat: usize, action: Action) -> Result<(), GameError> {
    match state.apply_action(seat, action, None) {
        Ok(_) => Ok(()),
        Err(GameError::RaiseNotAllowed) => state.apply_action(seat, Action::Call, None).map(|_| ()),
        Err(e) => Err(e),
    }
}

fn mean_std(xs: &[f64]) -> (f64, f64) {
    if xs.is_empty() {
        return (0.0, 0.0);
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hucfr_engine::history::HistoryKey;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rec(seat: usize, street: Street, action: Action) -> ActionRecord {
        ActionRecord {
            seat,
            street,
            action,
            chips: 0,
        }
    }

    fn tiny_trainer() -> Trainer {
        Trainer::new(TrainerConfig {
            iterations: PerStreet::splat(30),
            samples: PerStreet::splat(30),
            warm_start_hands: PerStreet::splat(10),
            feature_equity_samples: 4,
            log_every: 10,
            ..TrainerConfig::default()
        })
        .unwrap()
    }

    fn key(bucket: u32, history: &str) -> InfoKey {
        InfoKey {
            street: Street::River,
            bucket,
            history: HistoryKey::from_history(history).unwrap(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn seeded_regret_is_shortfall_from_best_action() {
        let t = Tally {
            counts: [2, 1, 0, 0, 0],
            utils: [-0.2, 0.3, 0.0, 0.0, 0.0],
        };
        let r = seed_regrets(&t, 0.05);
        // averages: fold -0.1, call 0.3, untried raises -1.0
        assert!(close(r[Action::Fold.index()], 0.4));
        assert_eq!(r[Action::Call.index()], 0.0);
        for a in [Action::RaiseSmall, Action::RaiseMedium, Action::RaiseLarge] {
            assert!(close(r[a.index()], 1.3), "{a}");
        }
    }

    #[test]
    fn untried_actions_count_as_a_lost_stack() {
        let t = Tally {
            counts: [0, 0, 0, 0, 3],
            utils: [0.0, 0.0, 0.0, 0.0, -1.5],
        };
        // the shove averaged -0.5, so everything else trails it by 0.5
        let r = seed_regrets(&t, 0.05);
        assert_eq!(r[Action::RaiseLarge.index()], 0.0);
        assert!(close(r[Action::Fold.index()], 0.5));
        assert!(close(r[Action::RaiseSmall.index()], 0.5));
    }

    #[test]
    fn regret_free_tally_floors_every_action() {
        let even = Tally {
            counts: [1; NUM_ACTIONS],
            utils: [0.25; NUM_ACTIONS],
        };
        assert_eq!(seed_regrets(&even, 0.02), [0.02; NUM_ACTIONS]);
        assert_eq!(seed_regrets(&Tally::default(), 0.1), [0.1; NUM_ACTIONS]);
    }

    #[test]
    fn backpropagation_signs_by_acting_seat() {
        let (k0, k1) = (key(0, ""), key(1, "c"));
        let mut nodes = HashMap::from([(k0, Node::new()), (k1, Node::new())]);
        let visits = [
            Visit { key: Some(k0), action: Action::Call, prob: 0.5, seat: 0 },
            Visit { key: Some(k1), action: Action::RaiseSmall, prob: 0.25, seat: 1 },
            Visit { key: None, action: Action::Fold, prob: 0.2, seat: 0 },
            Visit { key: Some(key(9, "")), action: Action::Fold, prob: 0.2, seat: 0 },
        ];
        backpropagate(&mut nodes, &visits, 0.1);

        assert_eq!(nodes.len(), 2);
        let r0 = nodes[&k0].regret_sum();
        assert!(close(r0[Action::Call.index()], 0.2));
        assert_eq!(r0.iter().filter(|r| **r != 0.0).count(), 1);
        let r1 = nodes[&k1].regret_sum();
        assert!(close(r1[Action::RaiseSmall.index()], -0.4));
        assert_eq!(r1.iter().filter(|r| **r != 0.0).count(), 1);
    }

    #[test]
    fn trajectory_moves_only_sampled_regrets() {
        let trainer = tiny_trainer();
        let mut checked = false;
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let bucketer = trainer.fit_bucketer(Street::River, &mut rng).unwrap();
            let mut sm = StreetModel::new(Street::River, bucketer, trainer.config().features());
            let mut fold = FoldStats::default();
            // epsilon 1 samples uniformly, so every weight is 1 / 0.2
            let util = trainer
                .sample_trajectory(&mut sm, 1.0, &mut fold, &mut rng)
                .unwrap()
                .unwrap();
            if util == 0.0 || sm.nodes.len() < 2 {
                continue;
            }
            for (k, node) in &sm.nodes {
                // seat 1 opens the river with seat 0 dealing; turns alternate
                let seat = (1 + k.history.len()) % 2;
                let signed = if seat == 0 { util } else { -util };
                let expected = signed / 0.2;
                let moved: Vec<f64> =
                    node.regret_sum().iter().copied().filter(|r| *r != 0.0).collect();
                assert_eq!(moved.len(), 1, "{k:?}");
                assert!((moved[0] - expected).abs() < 1e-6, "{k:?}: {} vs {expected}", moved[0]);
            }
            checked = true;
            break;
        }
        assert!(checked, "no decisive multi-decision trajectory in 50 seeds");
    }

    #[test]
    fn huge_log_interval_trains_without_progress_points() {
        let trainer = Trainer::new(TrainerConfig {
            log_every: u64::MAX,
            ..tiny_trainer().config().clone()
        })
        .unwrap();
        let mut model = TrainedModel::new();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let report = trainer.train_street(Street::River, &mut model, &mut rng).unwrap();
        assert!(report.series.is_empty());
        assert_eq!(report.iterations, 30);
    }

    #[test]
    fn defaults_match_training_schedule() {
        let c = TrainerConfig::default();
        assert_eq!(c.iterations.get(Street::Flop), 50_000);
        assert_eq!(c.samples.get(Street::Turn), 20_000);
        assert_eq!(c.epsilon.get(Street::River), 0.02);
        assert_eq!(c.warm_start_hands, c.samples);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_blinds_and_epsilon() {
        let mut c = TrainerConfig::default();
        c.blinds = Blinds { small: 20, big: 20 };
        assert!(c.validate().is_err());
        let mut c = TrainerConfig::default();
        c.epsilon.turn = 1.5;
        assert!(c.validate().is_err());
        let mut c = TrainerConfig::default();
        c.samples.river = 0;
        assert!(Trainer::new(c).is_err());
    }

    #[test]
    fn fold_stats_count_raise_then_fold() {
        let mut stats = FoldStats::default();
        let actions = vec![
            rec(1, Street::Flop, Action::RaiseSmall),
            rec(0, Street::Flop, Action::Call),
            rec(1, Street::Turn, Action::RaiseMedium),
            rec(0, Street::Turn, Action::Fold),
        ];
        stats.record(Street::Flop, &actions);
        assert_eq!(stats.raise_small, FoldCount { attempts: 2, folds: 1 });
        assert_eq!(stats.raise_medium, FoldCount { attempts: 1, folds: 1 });
        stats.record(Street::Turn, &actions);
        assert_eq!(stats.raise_medium, FoldCount { attempts: 2, folds: 2 });
        assert_eq!(stats.raise_small.ratio(), 0.5);
    }

    #[test]
    fn mean_std_is_population() {
        let (m, s) = mean_std(&[1.0, -1.0, 1.0, -1.0]);
        assert_eq!(m, 0.0);
        assert_eq!(s, 1.0);
        assert_eq!(mean_std(&[]), (0.0, 0.0));
    }

    #[test]
    fn per_street_config_deserialises_with_defaults() {
        let c: TrainerConfig =
            serde_json::from_str(r#"{"iterations":{"preflop":1,"flop":2,"turn":3,"river":4}}"#)
                .unwrap();
        assert_eq!(c.iterations.get(Street::Turn), 3);
        assert_eq!(c.log_every, 500);
    }
}
