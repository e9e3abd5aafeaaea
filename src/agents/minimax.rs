//! Minimax search with alpha-beta pruning
//!
//! Scores are from the agent's fixed perspective: `1` for a position its mark
//! has won, `-1` for a loss and `0` for a draw. The search runs to terminal
//! positions only; the game tree is small enough that no depth cut-off is
//! needed.

use std::time::{Duration, Instant};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Action, Board, CELL_COUNT, Player},
};

const WIN_SCORE: i32 = 1;
const LOSS_SCORE: i32 = -1;
const DRAW_SCORE: i32 = 0;
const INFINITY: i32 = 1_000_000;

/// Wall-clock ceiling for a single top-level decision.
///
/// Unoptimized builds get a wider ceiling.
pub const DEFAULT_TIME_BUDGET: Duration = if cfg!(debug_assertions) {
    Duration::from_millis(500)
} else {
    Duration::from_millis(10)
};

/// Whether a decision that took `elapsed` overran `budget`
pub fn budget_exceeded(elapsed: Duration, budget: Duration) -> bool {
    elapsed > budget
}

/// Deterministic full-depth search agent
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    name: String,
    mark: Player,
    time_budget: Duration,
}

impl MinimaxAgent {
    pub fn new(mark: Player) -> Self {
        Self {
            name: "Minimax".to_string(),
            mark,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Mark this agent plays and maximizes for
    pub fn mark(&self) -> Player {
        self.mark
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// Best action for the agent's mark on `board`, or `None` if it is full.
    ///
    /// Every empty cell is tried in row-major order and undone before the
    /// next one; `board` is left exactly as it was passed in. On equal
    /// scores the earliest cell wins.
    pub fn search(&self, board: &mut Board) -> Option<Action> {
        let mut best: Option<(Action, i32)> = None;
        let mut alpha = -INFINITY;

        for index in 0..CELL_COUNT {
            let action = Action::from_index(index);
            if !board.check_action(action) {
                continue;
            }

            board.place(action, self.mark);
            let score = self.minimax(board, 1, false, alpha, INFINITY);
            board.clear(action);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((action, score));
                alpha = alpha.max(score);
            }
        }

        best.map(|(action, _)| action)
    }

    /// Score `board` for the agent's mark.
    ///
    /// `is_maximizing` is true when the agent is to move. Branches are
    /// pruned once `beta <= alpha`.
    pub fn minimax(
        &self,
        board: &mut Board,
        depth: usize,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        debug_assert!(depth <= CELL_COUNT);

        let opponent = self.mark.opponent();
        if board.check_win(self.mark) {
            return WIN_SCORE;
        }
        if board.check_win(opponent) {
            return LOSS_SCORE;
        }
        if board.check_draw() {
            return DRAW_SCORE;
        }

        let to_move = if is_maximizing { self.mark } else { opponent };
        let mut best = if is_maximizing { -INFINITY } else { INFINITY };

        for index in 0..CELL_COUNT {
            let action = Action::from_index(index);
            if !board.check_action(action) {
                continue;
            }

            board.place(action, to_move);
            let score = self.minimax(board, depth + 1, !is_maximizing, alpha, beta);
            board.clear(action);

            if is_maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

impl Agent for MinimaxAgent {
    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        let start = Instant::now();
        let mut scratch = *board;
        let action = self.search(&mut scratch).ok_or(Error::NoValidMoves)?;

        let elapsed = start.elapsed();
        if budget_exceeded(elapsed, self.time_budget()) {
            log::error!(
                "minimax decision for {} on {} took {:?}, budget is {:?}; aborting",
                self.mark(),
                board.encode(),
                elapsed,
                self.time_budget()
            );
            std::process::abort();
        }

        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
