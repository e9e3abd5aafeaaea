//! Tic-Tac-Toe game implementation

pub mod board;
pub mod lines;

pub use board::{Action, BOARD_SIZE, Board, CELL_COUNT, Cell, GameOutcome, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
