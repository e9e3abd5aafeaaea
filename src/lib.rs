//! Tic-Tac-Toe learning agents
//!
//! This crate provides:
//! - A 3x3 board with a canonical 9-character state encoding
//! - A tabular Q-learning agent trained by TD(0) updates
//! - A full-depth minimax agent with alpha-beta pruning
//! - A training loop, head-to-head evaluation and a CLI

pub mod agents;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;
pub mod utils;

pub use agents::{MinimaxAgent, RandomAgent};
pub use error::{Error, Result};
pub use q_learning::{QLearningAgent, QTable};
pub use tictactoe::{Action, Board, GameOutcome, Player};
pub use types::StateKey;
