//! Training and evaluation pipelines
//!
//! - [`Trainer`] runs episodes between two seats and updates the learners
//! - [`play_match`] pits fixed policies against each other
//! - observers report progress and statistics during training

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{MatchResult, play_game, play_match};
pub use observers::{MetricsObserver, MetricsSummary, MilestoneObserver, ProgressObserver};
pub use training::{ExplorationSchedule, Seat, Trainer, TrainingConfig, TrainingResult};

pub use crate::ports::{Agent, Observer};
