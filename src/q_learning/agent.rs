//! Tabular Q-learning agent
//!
//! Owns exactly one [`QTable`] and selects actions epsilon-greedily against
//! it. The exploration rate is supplied per call; any decay schedule belongs
//! to the caller.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Agent,
    q_learning::q_table::{QTable, TdParams},
    tictactoe::{Action, Board},
    types::StateKey,
    utils::build_rng,
};

/// Q-learning agent (off-policy TD control)
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    name: String,
    q_table: QTable,
    params: TdParams,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a new Q-learning agent with an empty table
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            name: "Q-Learning".to_string(),
            q_table: QTable::new(),
            params: TdParams::new(learning_rate, discount_factor),
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
        self
    }

    pub fn params(&self) -> TdParams {
        self.params
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Seed the agent was last built or reseeded with, if any
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// ε-greedy action selection used during training.
    ///
    /// With probability `exploration_rate` a uniformly random legal action is
    /// returned; otherwise one of [`QLearningAgent::best_actions`] is drawn
    /// uniformly.
    pub fn choose_action_exploring(
        &mut self,
        board: &Board,
        exploration_rate: f64,
    ) -> Result<Action> {
        let available = board.available_actions();
        if available.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let candidates = if self.rng.random::<f64>() < exploration_rate {
            available
        } else {
            self.q_table.best_actions(&board.state_key(), &available)
        };

        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    /// Legal actions currently tied for the best recorded value
    pub fn best_actions(&self, board: &Board) -> Vec<Action> {
        self.q_table
            .best_actions(&board.state_key(), &board.available_actions())
    }

    /// Recorded `(action, value)` pairs for the board's state, row-major
    pub fn action_values(&self, board: &Board) -> Vec<(Action, f64)> {
        let mut values: Vec<(Action, f64)> = self
            .q_table
            .state_values(&board.state_key())
            .map(|actions| actions.iter().map(|(&a, &v)| (a, v)).collect())
            .unwrap_or_default();
        values.sort_by_key(|&(action, _)| action);
        values
    }

    /// Apply one TD update with the agent's own step size and discount.
    ///
    /// `next_state` is `None` when the transition ended the episode.
    pub fn update(
        &mut self,
        state: &StateKey,
        next_state: Option<&StateKey>,
        action: Action,
        reward: f64,
    ) -> f64 {
        self.q_table
            .update(state, action, reward, next_state, self.params)
    }
}

impl Agent for QLearningAgent {
    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        self.choose_action_exploring(board, 0.0)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    fn board(encoding: &str) -> Board {
        Board::from_encoding(encoding).unwrap()
    }

    #[test]
    fn test_greedy_picks_recorded_best() {
        let mut agent = QLearningAgent::new(0.5, 0.9).with_seed(1);
        let state = board("X---O----");
        let key = state.state_key();
        agent.update(&key, None, Action::new(2, 2), 1.0);
        agent.update(&key, None, Action::new(0, 1), 0.2);

        for _ in 0..20 {
            assert_eq!(agent.choose_action(&state).unwrap(), Action::new(2, 2));
        }
    }

    #[test]
    fn test_unknown_state_plays_any_legal_action() {
        let mut agent = QLearningAgent::new(0.5, 0.9).with_seed(2);
        let state = board("XOXOXO---");
        for _ in 0..20 {
            let action = agent.choose_action(&state).unwrap();
            assert!(state.check_action(action));
        }
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut agent = QLearningAgent::new(0.5, 0.9).with_seed(3);
        let result = agent.choose_action_exploring(&board("XOXXOOOXX"), 0.5);
        assert!(matches!(result, Err(Error::NoValidMoves)));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = Board::new();
        let mut a = QLearningAgent::new(0.5, 0.9).with_seed(9);
        let mut b = QLearningAgent::new(0.5, 0.9).with_seed(9);
        for _ in 0..30 {
            assert_eq!(
                a.choose_action_exploring(&state, 0.5).unwrap(),
                b.choose_action_exploring(&state, 0.5).unwrap()
            );
        }
    }

    #[test]
    fn test_action_values_sorted() {
        let mut agent = QLearningAgent::new(1.0, 0.9).with_name("Learner");
        let mut state = Board::new();
        state.place(Action::new(1, 1), Player::X);
        let key = state.state_key();
        agent.update(&key, None, Action::new(2, 0), 0.5);
        agent.update(&key, None, Action::new(0, 2), 1.0);

        assert_eq!(
            agent.action_values(&state),
            vec![(Action::new(0, 2), 1.0), (Action::new(2, 0), 0.5)]
        );
        assert_eq!(agent.name(), "Learner");
        assert!(agent.action_values(&Board::new()).is_empty());
    }

    #[test]
    fn test_reseed_is_recorded() {
        let mut agent = QLearningAgent::new(0.5, 0.9);
        assert_eq!(agent.rng_seed(), None);
        agent.set_rng_seed(11).unwrap();
        assert_eq!(agent.rng_seed(), Some(11));
    }
}
