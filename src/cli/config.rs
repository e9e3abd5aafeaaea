//! TOML configuration for CLI commands
//!
//! Every section is optional; missing keys fall back to defaults and
//! command-line flags override file values.
//!
//! ```toml
//! [training]
//! episodes = 30000
//! learning_rate = 0.01
//! discount_factor = 0.8
//! exploration = "linear_decay"   # or { constant = 0.1 }
//! seed = 7
//!
//! [minimax]
//! time_budget_ms = 10
//!
//! [evaluation]
//! games = 1000
//! ```

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, agents::minimax::DEFAULT_TIME_BUDGET, pipeline::TrainingConfig};

/// Minimax settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Wall-clock ceiling per decision before the process aborts
    pub time_budget_ms: u64,
}

impl MinimaxConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET.as_millis() as u64,
        }
    }
}

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Number of evaluation games
    pub games: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self { games: 1000 }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub training: TrainingConfig,
    pub minimax: MinimaxConfig,
    pub evaluation: EvaluationConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!(
                "config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        if self.minimax.time_budget_ms == 0 {
            return Err(Error::InvalidConfiguration {
                message: "minimax.time_budget_ms must be > 0".into(),
            });
        }
        if self.evaluation.games == 0 {
            return Err(Error::InvalidConfiguration {
                message: "evaluation.games must be > 0".into(),
            });
        }
        Ok(())
    }
}
