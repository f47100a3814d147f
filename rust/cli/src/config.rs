use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Settings shared by the game commands. Command-line flags override these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: Option<usize>,
    pub seed: Option<u64>,
    pub output_dir: String,
    pub events: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub seed: ValueSource,
    pub output_dir: ValueSource,
    pub events: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            seed: ValueSource::Default,
            output_dir: ValueSource::Default,
            events: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: None,
            seed: None,
            output_dir: "output".into(),
            events: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

pub const CONFIG_ENV: &str = "FOURFOLD_CONFIG";
pub const PLAYERS_ENV: &str = "FOURFOLD_PLAYERS";
pub const SEED_ENV: &str = "FOURFOLD_SEED";
pub const OUTPUT_DIR_ENV: &str = "FOURFOLD_OUTPUT_DIR";
pub const EVENTS_ENV: &str = "FOURFOLD_EVENTS";

/// Resolves the configuration: defaults, then the TOML file named by
/// `FOURFOLD_CONFIG`, then `FOURFOLD_*` variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = Some(v);
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.output_dir {
            cfg.output_dir = v;
            sources.output_dir = ValueSource::File;
        }
        if let Some(v) = f.events {
            cfg.events = Some(v);
            sources.events = ValueSource::File;
        }
    }

    if let Ok(players) = std::env::var(PLAYERS_ENV)
        && !players.is_empty()
    {
        cfg.players = Some(
            players
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid players".into()))?,
        );
        sources.players = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV)
        && !dir.is_empty()
    {
        cfg.output_dir = dir;
        sources.output_dir = ValueSource::Env;
    }
    if let Ok(path) = std::env::var(EVENTS_ENV)
        && !path.is_empty()
    {
        cfg.events = Some(path);
        sources.events = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    output_dir: Option<String>,
    #[serde(default)]
    events: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.players == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: players must be >=1".into(),
        ));
    }
    if cfg.output_dir.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: output_dir must not be empty".into(),
        ));
    }
    Ok(())
}
