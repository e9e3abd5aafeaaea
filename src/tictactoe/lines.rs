//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    ///
    /// Every row, column and diagonal is checked independently; a line that
    /// fails only rules out that line.
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| Self::line_owned_by(cells, line, target))
    }

    fn line_owned_by(cells: &[Cell; 9], line: &[usize; 3], target: Cell) -> bool {
        line.iter().all(|&idx| cells[idx] == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_with(positions: &[usize], cell: Cell) -> [Cell; 9] {
        let mut cells = [Cell::Empty; 9];
        for &pos in positions {
            cells[pos] = cell;
        }
        cells
    }

    #[test]
    fn test_has_won_horizontal() {
        let cells = cells_with(&[3, 4, 5], Cell::X);
        assert!(LineAnalyzer::has_won(&cells, Player::X));
        assert!(!LineAnalyzer::has_won(&cells, Player::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let cells = cells_with(&[2, 5, 8], Cell::O);
        assert!(LineAnalyzer::has_won(&cells, Player::O));
        assert!(!LineAnalyzer::has_won(&cells, Player::X));
    }

    #[test]
    fn test_has_won_anti_diagonal() {
        let cells = cells_with(&[2, 4, 6], Cell::X);
        assert!(LineAnalyzer::has_won(&cells, Player::X));
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        let mut cells = cells_with(&[0, 1], Cell::X);
        cells[2] = Cell::O;
        assert!(!LineAnalyzer::has_won(&cells, Player::X));
        assert!(!LineAnalyzer::has_won(&cells, Player::O));
    }
}
