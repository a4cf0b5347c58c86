//! Information-set nodes and the trained per-street model.

use std::collections::HashMap;

use hucfr_engine::action::{Action, NUM_ACTIONS};
use hucfr_engine::errors::GameError;
use hucfr_engine::game::GameState;
use hucfr_engine::history::{HistoryKey, Street};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::bucket::Bucketer;
use crate::errors::AiError;
use crate::features::{self, FeatureConfig};

pub type Strategy = [f64; NUM_ACTIONS];

pub const UNIFORM: Strategy = [1.0 / NUM_ACTIONS as f64; NUM_ACTIONS];

/// Identity of an information set: street, card bucket and the street's
/// action history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InfoKey {
    pub street: Street,
    pub bucket: u32,
    pub history: HistoryKey,
}

/// Regret and strategy accumulators for one information set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    regret_sum: Strategy,
    strategy_sum: Strategy,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regrets(regret_sum: Strategy) -> Self {
        Self {
            regret_sum,
            strategy_sum: [0.0; NUM_ACTIONS],
        }
    }

    /// Regret matching: positive regrets normalised, uniform when none are
    /// positive.
    pub fn current_strategy(&self) -> Strategy {
        let positive = self.regret_sum.map(|r| r.max(0.0));
        normalize_or_uniform(positive)
    }

    /// Current strategy mixed with `epsilon` weight of uniform play.
    pub fn exploring_strategy(&self, epsilon: f64) -> Strategy {
        let eps = epsilon.clamp(0.0, 1.0);
        self.current_strategy()
            .map(|p| (1.0 - eps) * p + eps / NUM_ACTIONS as f64)
    }

    pub fn accumulate_strategy(&mut self, strategy: &Strategy, weight: f64) {
        for (sum, p) in self.strategy_sum.iter_mut().zip(strategy) {
            *sum += weight * p;
        }
    }

    pub fn add_regret(&mut self, action: Action, delta: f64) {
        self.regret_sum[action.index()] += delta;
    }

    /// Normalised strategy sum; the solver's output for this node.
    pub fn average_strategy(&self) -> Strategy {
        normalize_or_uniform(self.strategy_sum)
    }

    pub fn regret_sum(&self) -> &Strategy {
        &self.regret_sum
    }

    pub fn strategy_sum(&self) -> &Strategy {
        &self.strategy_sum
    }

    pub fn positive_regret(&self) -> f64 {
        self.regret_sum.iter().map(|r| r.max(0.0)).sum()
    }
}

fn normalize_or_uniform(weights: Strategy) -> Strategy {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.map(|w| w / total)
    } else {
        UNIFORM
    }
}

/// Draws an action from `strategy`; uniform if the weights are unusable.
pub fn sample_action<R: Rng + ?Sized>(strategy: &Strategy, rng: &mut R) -> Action {
    let idx = match WeightedIndex::new(strategy) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.random_range(0..NUM_ACTIONS),
    };
    Action::ALL[idx]
}

/// Bucketer plus node table for one street.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetModel {
    pub street: Street,
    pub bucketer: Bucketer,
    pub features: FeatureConfig,
    #[serde(with = "node_table")]
    pub nodes: HashMap<InfoKey, Node>,
}

impl StreetModel {
    pub fn new(street: Street, bucketer: Bucketer, features: FeatureConfig) -> Self {
        Self {
            street,
            bucketer,
            features,
            nodes: HashMap::new(),
        }
    }

    /// Info-set key for `seat` deciding at `state`.
    ///
    /// `Ok(None)` when the bucketer cannot classify the features; callers
    /// fall back to uniform play.
    ///
    /// # Errors
    ///
    /// [`GameError::HistoryOverflow`] if the street's history is too long to
    /// key.
    pub fn classify<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        seat: usize,
        rng: &mut R,
    ) -> Result<Option<InfoKey>, GameError> {
        let history = state.history_key()?;
        let f = features::from_state(state, seat, &self.features, rng);
        Ok(self.bucketer.predict(&f).map(|bucket| InfoKey {
            street: self.street,
            bucket: bucket as u32,
            history,
        }))
    }

    pub fn average_strategy(&self, key: &InfoKey) -> Option<Strategy> {
        self.nodes.get(key).map(Node::average_strategy)
    }

    pub fn total_positive_regret(&self) -> f64 {
        self.nodes.values().map(Node::positive_regret).sum()
    }
}

/// Nodes serialise as a key-sorted list so the JSON is stable.
mod node_table {
    use super::*;
    use serde::{Deserializer, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Entry {
        key: InfoKey,
        node: Node,
    }

    pub fn serialize<S: Serializer>(
        nodes: &HashMap<InfoKey, Node>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<Entry> = nodes
            .iter()
            .map(|(k, n)| Entry {
                key: *k,
                node: n.clone(),
            })
            .collect();
        entries.sort_by_key(|e| e.key);
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<InfoKey, Node>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|e| (e.key, e.node)).collect())
    }
}

/// Per-street sizes, for reports and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetSummary {
    pub street: Street,
    pub buckets: usize,
    pub nodes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub streets: Vec<StreetSummary>,
}

impl ModelSummary {
    pub fn total_nodes(&self) -> usize {
        self.streets.iter().map(|s| s.nodes).sum()
    }
}

/// The solver's output: up to one [`StreetModel`] per street.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    streets: Vec<StreetModel>,
}

impl TrainedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the model for `model.street`.
    pub fn insert(&mut self, model: StreetModel) {
        match self.streets.iter_mut().find(|m| m.street == model.street) {
            Some(slot) => *slot = model,
            None => {
                self.streets.push(model);
                self.streets.sort_by_key(|m| m.street);
            }
        }
    }

    pub fn street(&self, street: Street) -> Option<&StreetModel> {
        self.streets.iter().find(|m| m.street == street)
    }

    pub fn street_mut(&mut self, street: Street) -> Option<&mut StreetModel> {
        self.streets.iter_mut().find(|m| m.street == street)
    }

    pub fn require(&self, street: Street) -> Result<&StreetModel, AiError> {
        self.street(street).ok_or(AiError::MissingStreet(street))
    }

    pub fn is_complete(&self) -> bool {
        Street::ALL.iter().all(|&s| self.street(s).is_some())
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            streets: self
                .streets
                .iter()
                .map(|m| StreetSummary {
                    street: m.street,
                    buckets: m.bucketer.clusters(),
                    nodes: m.nodes.len(),
                })
                .collect(),
        }
    }

    /// JSON bytes; [`TrainedModel::restore`] reproduces the model exactly.
    pub fn persist(&self) -> Result<Vec<u8>, AiError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn restore(bytes: &[u8]) -> Result<Self, AiError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
