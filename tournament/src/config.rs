use std::path::Path;

use serde::{Deserialize, Serialize};
use strategies::{DefaultStrategy, InputStrategy, RandomStrategy};
use thiserror::Error;
use types::Strategy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid tournament config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Default,
    Random,
    Input,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Default => Box::new(DefaultStrategy::default()),
            StrategyKind::Random => Box::new(RandomStrategy::default()),
            StrategyKind::Input => Box::new(InputStrategy::default()),
        }
    }
}

/// Tournament settings read from YAML. Every field is optional; command
/// line flags take precedence.
///
/// ```yaml
/// database_url: sqlite://tournament.db
/// rounds: 3
/// strategy: random
/// players:
///   - Twilight Sparkle
///   - Applejack
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct TournamentConfig {
    pub database_url: Option<String>,
    pub players: Vec<String>,
    pub rounds: Option<usize>,
    pub strategy: Option<StrategyKind>,
}

impl TournamentConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }
}
