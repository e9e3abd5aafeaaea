//! Subcommands and the argument types they share

pub mod evaluate;
pub mod play;
pub mod train;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::{
    agents::{MinimaxAgent, RandomAgent},
    cli::config::AppConfig,
    ports::Agent,
    tictactoe::Player,
};

/// A mark as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mark {
    X,
    O,
}

impl From<Mark> for Player {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Player::X,
            Mark::O => Player::O,
        }
    }
}

/// Fixed policies available as opponents
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// Uniform over the empty cells
    Random,
    /// Full-depth alpha-beta search
    Minimax,
}

/// Build a fixed opponent playing `mark`
pub(crate) fn build_opponent(
    kind: OpponentKind,
    mark: Player,
    config: &AppConfig,
) -> Box<dyn Agent> {
    match kind {
        OpponentKind::Random => Box::new(RandomAgent::new(format!("Random-{mark}"))),
        OpponentKind::Minimax => Box::new(
            MinimaxAgent::new(mark)
                .with_name(format!("Minimax-{mark}"))
                .with_time_budget(config.minimax.time_budget()),
        ),
    }
}

/// Load `--config` if given, defaults otherwise
pub(crate) fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}
