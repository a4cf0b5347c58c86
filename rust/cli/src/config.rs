//! Layered configuration: defaults, then the TOML file named by
//! `HUCFR_CONFIG`, then `HUCFR_*` environment variables. Command-line flags
//! are applied on top by the individual commands.

use hucfr_ai::TrainerConfig;
use hucfr_engine::engine::TableConfig;
use hucfr_engine::player::STARTING_STACK;
use hucfr_engine::rules::Blinds;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HUCFR_CONFIG";
pub const SEED_ENV: &str = "HUCFR_SEED";
pub const STACK_ENV: &str = "HUCFR_STARTING_STACK";
pub const SMALL_BLIND_ENV: &str = "HUCFR_SMALL_BLIND";
pub const BIG_BLIND_ENV: &str = "HUCFR_BIG_BLIND";
pub const MODEL_ENV: &str = "HUCFR_MODEL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Default model path for `play` and `eval`, output path for `train`
    pub model: Option<String>,
    pub trainer: TrainerConfig,
}

impl Default for Config {
    fn default() -> Self {
        let blinds = Blinds::default();
        Self {
            seed: None,
            starting_stack: STARTING_STACK,
            small_blind: blinds.small,
            big_blind: blinds.big,
            model: None,
            trainer: TrainerConfig::default(),
        }
    }
}

impl Config {
    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    pub fn table(&self) -> TableConfig {
        TableConfig {
            starting_stack: self.starting_stack,
            blinds: self.blinds(),
        }
    }

    /// Trainer settings with the table's stack and blinds filled in.
    pub fn trainer_config(&self) -> TrainerConfig {
        TrainerConfig {
            starting_stack: self.starting_stack,
            blinds: self.blinds(),
            ..self.trainer.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub model: ValueSource,
    pub trainer: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            model: ValueSource::Default,
            trainer: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl From<ConfigError> for crate::error::CliError {
    fn from(e: ConfigError) -> Self {
        crate::error::CliError::Config(e.to_string())
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.model {
            cfg.model = Some(v);
            sources.model = ValueSource::File;
        }
        if let Some(v) = f.trainer {
            cfg.trainer = v;
            sources.trainer = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(SEED_ENV) {
        cfg.seed = Some(parse_env(SEED_ENV, &seed)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(stack) = env_value(STACK_ENV) {
        cfg.starting_stack = parse_env(STACK_ENV, &stack)?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(sb) = env_value(SMALL_BLIND_ENV) {
        cfg.small_blind = parse_env(SMALL_BLIND_ENV, &sb)?;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(bb) = env_value(BIG_BLIND_ENV) {
        cfg.big_blind = parse_env(BIG_BLIND_ENV, &bb)?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(model) = env_value(MODEL_ENV) {
        cfg.model = Some(model);
        sources.model = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    trainer: Option<TrainerConfig>,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", key, raw)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.small_blind == 0 || cfg.small_blind >= cfg.big_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: blinds must satisfy 0 < small_blind < big_blind".into(),
        ));
    }
    if cfg.big_blind > cfg.starting_stack {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must not exceed starting_stack".into(),
        ));
    }
    cfg.trainer_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}
