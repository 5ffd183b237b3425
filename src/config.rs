use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "DERMASCAN_CONFIG";
/// Environment variable overriding [`AppConfig::data_path`].
pub const DATA_ENV: &str = "DERMASCAN_DATA";

/// Which off-the-shelf classifier the predictor fits.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    #[default]
    DecisionTree,
    RandomForest,
}

impl ClassifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassifierKind::DecisionTree => "decision_tree",
            ClassifierKind::RandomForest => "random_forest",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "decision_tree" | "tree" => Ok(ClassifierKind::DecisionTree),
            "random_forest" | "forest" => Ok(ClassifierKind::RandomForest),
            _ => Err(format!(
                "Unknown classifier: {}. Expected `decision_tree` or `random_forest`",
                s
            )),
        }
    }
}

/// Train/evaluate settings shared by every prediction request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PredictorConfig {
    pub classifier: ClassifierKind,
    /// Share of rows held out for evaluation.
    pub test_fraction: f32,
    /// Seed for the split and the model's random state.
    pub seed: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::default(),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl PredictorConfig {
    pub fn new(classifier: ClassifierKind) -> Self {
        Self {
            classifier,
            ..Self::default()
        }
    }
}

/// Top-level configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub predictor: PredictorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dermatology.data"),
            predictor: PredictorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        anyhow::ensure!(
            config.predictor.test_fraction > 0.0 && config.predictor.test_fraction < 1.0,
            "test_fraction must be in (0, 1), got {}",
            config.predictor.test_fraction
        );
        Ok(config)
    }

    /// Defaults, then `$DERMASCAN_CONFIG`, then `$DERMASCAN_DATA`.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }
        log::debug!("Configuration {:#?}", config);
        Ok(config)
    }
}
