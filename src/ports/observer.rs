//! Observer port - hooks for watching a training run

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring training
///
/// Call order:
/// 1. `on_training_start(total_episodes)` once
/// 2. `on_episode_end(episode, outcome)` after every episode
/// 3. `on_training_end()` once
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal board.
    ///
    /// `episode` is 0-based.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
