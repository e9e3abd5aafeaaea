//! Observers for training runs
//!
//! Observers collect progress and statistics without coupling the training
//! loop to any output format.

use std::collections::VecDeque;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{GameOutcome, Player},
    utils::rate,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts overall and over a trailing window
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_episodes: usize,
    window: usize,
    recent: VecDeque<GameOutcome>,
}

impl MetricsObserver {
    /// Create a metrics observer whose trailing window holds `window` episodes
    pub fn new(window: usize) -> Self {
        Self {
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            total_episodes: 0,
            window: window.max(1),
            recent: VecDeque::new(),
        }
    }

    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total_episodes)
    }

    /// Draw rate over the trailing window
    pub fn recent_draw_rate(&self) -> f64 {
        let draws = self
            .recent
            .iter()
            .filter(|&&outcome| outcome == GameOutcome::Draw)
            .count();
        rate(draws, self.recent.len())
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: rate(self.x_wins, self.total_episodes),
            o_win_rate: rate(self.o_wins, self.total_episodes),
            draw_rate: self.draw_rate(),
            recent_draw_rate: self.recent_draw_rate(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
    pub recent_draw_rate: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome) -> Result<()> {
        self.total_episodes += 1;
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(outcome);
        Ok(())
    }
}

/// Milestone observer - Records when one seat first draws and last loses
pub struct MilestoneObserver {
    seat: Player,
    first_draw: Option<usize>,
    last_loss: Option<usize>,
}

impl MilestoneObserver {
    pub fn new(seat: Player) -> Self {
        Self {
            seat,
            first_draw: None,
            last_loss: None,
        }
    }

    /// Episode of the seat's first draw
    pub fn first_draw(&self) -> Option<usize> {
        self.first_draw
    }

    /// Episode of the seat's most recent loss
    pub fn last_loss(&self) -> Option<usize> {
        self.last_loss
    }
}

impl Observer for MilestoneObserver {
    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Draw if self.first_draw.is_none() => self.first_draw = Some(episode),
            GameOutcome::Win(winner) if winner != self.seat => self.last_loss = Some(episode),
            _ => {}
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        log::info!(
            "{} seat: first draw at {:?}, last loss at {:?}",
            self.seat,
            self.first_draw,
            self.last_loss
        );
        Ok(())
    }
}
