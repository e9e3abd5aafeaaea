//! Uniform-random baseline agent

use rand::rngs::StdRng;

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Action, Board},
    utils::build_rng,
};

/// Picks uniformly among the empty cells
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a random agent seeded from OS entropy
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(None),
        }
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(Some(seed)),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        board
            .random_action(&mut self.rng)
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        Ok(())
    }
}
