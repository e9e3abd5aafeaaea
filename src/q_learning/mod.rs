//! Tabular Q-learning
//!
//! A [`QTable`] maps encoded board states to per-action value estimates and
//! is updated with TD(0):
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! At episode end there is no successor state and the estimate moves toward
//! the terminal reward alone. Unseen states and actions read as 0.0.
//!
//! ## Usage Example
//!
//! ```
//! use tictactoe_rl::{
//!     q_learning::QLearningAgent,
//!     tictactoe::{Action, Board, Player},
//! };
//!
//! let mut agent = QLearningAgent::new(
//!     0.01, // learning_rate
//!     0.8,  // discount_factor
//! )
//! .with_seed(42);
//!
//! let mut board = Board::new();
//! let before = board.state_key();
//! let action = agent.choose_action_exploring(&board, 1.0).unwrap();
//! board.place(action, Player::X);
//!
//! // Mid-game transition: reward 0, bootstrap from the successor state.
//! agent.update(&before, Some(&board.state_key()), action, 0.0);
//! assert_eq!(agent.q_table().len(), 1);
//! ```

pub mod agent;
pub mod dump;
pub mod q_table;

// Public re-exports
pub use agent::QLearningAgent;
pub use q_table::{QTable, TdParams};
