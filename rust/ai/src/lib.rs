//! # hucfr-ai: solver and opponents for heads-up hold'em
//!
//! Everything that decides actions on top of `hucfr-engine`: equity
//! estimation, state abstraction, the rule-based warm-start policy, the
//! Monte Carlo CFR trainer and the bot that plays a trained model.
//!
//! ## Core Components
//!
//! - [`equity`] - Monte Carlo showdown equity against an opponent profile
//! - [`features`] - Feature vectors describing a decision point
//! - [`bucket`] - K-means bucketing of feature vectors
//! - [`ranges`] - Preflop open/defend tables
//! - [`heuristic`] - Rule-based policy used for warm-start and evaluation
//! - [`cfr`] - Info-set nodes and the persisted [`TrainedModel`]
//! - [`trainer`] - Outcome-sampling MCCFR per street
//! - [`bot`] - Play-time decisions from a trained model
//! - [`AIOpponent`] / [`create_ai`] - Common interface and factory
//!
//! ## Quick Start
//!
//! ```rust
//! use hucfr_ai::{create_ai, AIOpponent};
//! use hucfr_engine::engine::{Engine, TableConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let ai = create_ai("heuristic", None).unwrap();
//!
//! let mut engine = Engine::new(Some(42), TableConfig::default());
//! engine.start_hand().unwrap();
//! let state = engine.state().unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let decision = ai.get_action(state, state.to_act(), &mut rng);
//! println!("{} chose {}", ai.name(), decision.action);
//! ```

use std::fmt;

use hucfr_engine::action::Action;
use hucfr_engine::game::GameState;
use rand::RngCore;
use serde::{Deserialize, Serialize};

pub mod bot;
pub mod bucket;
pub mod cfr;
pub mod equity;
pub mod errors;
pub mod features;
pub mod heuristic;
pub mod ranges;
pub mod trainer;

pub use cfr::TrainedModel;
pub use errors::AiError;
pub use trainer::{Trainer, TrainerConfig, TrainingReport};

/// An action plus an optional raise size on top of the call.
///
/// `amount: None` means the convention size for the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub amount: Option<u32>,
}

impl Decision {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            amount: None,
        }
    }

    pub fn sized(action: Action, amount: u32) -> Self {
        Self {
            action,
            amount: Some(amount),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(a) => write!(f, "{} {}", self.action, a),
            None => write!(f, "{}", self.action),
        }
    }
}

/// Trait defining the interface for AI opponents.
///
/// # Required Methods
///
/// - [`get_action`](AIOpponent::get_action) - Decide for one seat
/// - [`name`](AIOpponent::name) - Return the AI's identifier
///
/// # Example Implementation
///
/// ```rust
/// use hucfr_ai::{AIOpponent, Decision};
/// use hucfr_engine::action::Action;
/// use hucfr_engine::game::GameState;
/// use rand::RngCore;
///
/// struct CallingStation;
///
/// impl AIOpponent for CallingStation {
///     fn get_action(&self, _state: &GameState, _seat: usize, _rng: &mut dyn RngCore) -> Decision {
///         Decision::new(Action::Call)
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Determine the next action for `seat`.
    ///
    /// # Arguments
    ///
    /// * `state` - The hand in progress; `seat` must be the seat to act
    /// * `seat` - The deciding seat (0 or 1)
    /// * `rng` - Randomness for sampling and equity simulation
    ///
    /// # Returns
    ///
    /// A [`Decision`]; never an error, ambiguous spots resolve to a check or call
    fn get_action(&self, state: &GameState, seat: usize, rng: &mut dyn RngCore) -> Decision;

    /// Return the name/identifier of this AI implementation.
    fn name(&self) -> &str;
}

/// Factory function to create AI opponents by type string.
///
/// # Arguments
///
/// * `ai_type` - `"heuristic"` or `"cfr"`
/// * `model` - Trained model, required for `"cfr"`
///
/// # Supported AI Types
///
/// - `"heuristic"` - The rule-based policy
/// - `"cfr"` - The trained CFR bot with guard rails
///
/// # Errors
///
/// [`AiError::InvalidConfig`] for an unknown type or a `"cfr"` request
/// without a model.
///
/// # Example
///
/// ```rust
/// use hucfr_ai::create_ai;
///
/// let ai = create_ai("heuristic", None).unwrap();
/// assert_eq!(ai.name(), "HeuristicAI");
/// assert!(create_ai("cfr", None).is_err());
/// ```
pub fn create_ai(
    ai_type: &str,
    model: Option<TrainedModel>,
) -> Result<Box<dyn AIOpponent>, AiError> {
    match ai_type {
        "heuristic" => Ok(Box::new(heuristic::HeuristicAI::new())),
        "cfr" => {
            let model = model.ok_or_else(|| {
                AiError::InvalidConfig("the cfr opponent needs a trained model".into())
            })?;
            Ok(Box::new(bot::CfrBot::new(model)))
        }
        other => Err(AiError::InvalidConfig(format!("unknown AI type: {other}"))),
    }
}
