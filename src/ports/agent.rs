//! Agent port - the shared decision-maker interface
//!
//! Implemented by:
//! - the tabular learner (greedy play)
//! - minimax search
//! - the uniform-random baseline
//!
//! Training-only operations (exploring selection, value updates) are not part
//! of this trait; they live on [`crate::q_learning::QLearningAgent`].

use crate::{
    Result,
    tictactoe::{Action, Board},
};

/// Decision maker that picks an action for the current board
///
/// # Examples
///
/// ```
/// use tictactoe_rl::{
///     agents::RandomAgent,
///     ports::Agent,
///     tictactoe::{Board, Player},
/// };
///
/// fn play_once(agent: &mut dyn Agent, board: &mut Board, mark: Player) -> tictactoe_rl::Result<()> {
///     let action = agent.choose_action(board)?;
///     board.place(action, mark);
///     Ok(())
/// }
///
/// let mut board = Board::new();
/// let mut agent = RandomAgent::with_seed("Random", 7);
/// play_once(&mut agent, &mut board, Player::X).unwrap();
/// assert_eq!(board.available_actions().len(), 8);
/// ```
pub trait Agent: Send {
    /// Select an action for the given board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] if the board has no empty cell.
    fn choose_action(&mut self, board: &Board) -> Result<Action>;

    /// Get the agent's name.
    ///
    /// Used for identification in logs and match summaries.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Deterministic agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
