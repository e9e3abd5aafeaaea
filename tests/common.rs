//! Shared helpers for the integration suites.

#![allow(dead_code)]

use tictactoe_rl::tictactoe::{Board, Player};

/// Pearson chi-square statistic of `counts` against a uniform expectation.
pub fn chi_square_uniform(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Upper 0.1% critical values of the chi-square distribution, indexed by
/// degrees of freedom (1-8).
pub const CHI_SQUARE_999: [f64; 9] = [
    0.0, 10.828, 13.816, 16.266, 18.467, 20.515, 22.458, 24.322, 26.124,
];

/// Build a board from an encoding, panicking on malformed test input.
pub fn board(encoding: &str) -> Board {
    Board::from_encoding(encoding).expect("test encoding must be valid")
}

/// Mark whose turn it is, assuming X moved first and play alternated.
pub fn to_move(board: &Board) -> Player {
    if board.count(Player::X) > board.count(Player::O) {
        Player::O
    } else {
        Player::X
    }
}
