//! Board state representation and basic operations

use std::fmt;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::types::StateKey;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' => Some(Cell::Empty),
            'X' => Some(Cell::X),
            'O' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A (row, column) target cell
///
/// Actions carry no player; the caller supplies which mark to place. The
/// derived ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build an action from a row-major cell index (0-8)
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }

    /// Row-major cell index
    pub const fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Whether both coordinates fall on the board
    pub const fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Mutable 3x3 grid
///
/// The board does not track whose turn it is and does not enforce
/// alternation: callers decide which mark goes where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Parse a 9-character row-major encoding (`-`, `X`, `O`).
    ///
    /// # Errors
    ///
    /// Returns error if the string is not exactly 9 characters long or any
    /// character is not a valid cell.
    pub fn from_encoding(encoding: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = encoding.chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidEncoding {
                expected: CELL_COUNT,
                got: chars.len(),
                context: encoding.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: encoding.to_string(),
            })?;
        }

        Ok(Self { cells })
    }

    /// Canonical 9-character encoding, one character per cell in row-major order
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Encoding wrapped as a value-table key
    pub fn state_key(&self) -> StateKey {
        StateKey::from_board(self)
    }

    /// Get the cell targeted by an action
    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.index()]
    }

    /// Write `player`'s mark at `action`.
    ///
    /// No legality check happens here: the caller must have validated the
    /// action (see [`Board::check_action`]).
    pub fn place(&mut self, action: Action, player: Player) {
        self.cells[action.index()] = player.to_cell();
    }

    /// Reset a cell to empty, undoing a tentative [`Board::place`]
    pub fn clear(&mut self, action: Action) {
        self.cells[action.index()] = Cell::Empty;
    }

    /// Whether the action is on the board and targets an empty cell
    pub fn check_action(&self, action: Action) -> bool {
        action.in_bounds() && self.get(action) == Cell::Empty
    }

    /// Whether `player` holds a full row, column or diagonal
    pub fn check_win(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Whether no empty cell remains.
    ///
    /// A full board that also contains a winning line reports `true` here as
    /// well; check [`Board::check_win`] first where the distinction matters.
    pub fn check_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Whether the game has ended by a win for either player or a full board
    pub fn is_over(&self) -> bool {
        self.check_draw() || self.check_win(Player::X) || self.check_win(Player::O)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.check_win(Player::X) {
            Some(Player::X)
        } else if self.check_win(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Outcome of the game, or `None` while it is still running
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.winner() {
            Some(player) => Some(GameOutcome::Win(player)),
            None if self.check_draw() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// Number of marks placed by `player`
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// All empty cells in row-major order
    pub fn available_actions(&self) -> Vec<Action> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Action::from_index(i))
            .collect()
    }

    /// Uniformly sample one of [`Board::available_actions`].
    ///
    /// Returns `None` on a full board.
    pub fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Action> {
        self.available_actions().choose(rng).copied()
    }

    /// Terminal reward favoring wins: 1.0 win, 0.5 draw, 0.0 otherwise.
    ///
    /// A full board that holds a winning line counts as a win, not a draw.
    pub fn aggressive_reward(&self, player: Player) -> f64 {
        match self.outcome() {
            Some(GameOutcome::Win(winner)) if winner == player => 1.0,
            Some(GameOutcome::Draw) => 0.5,
            _ => 0.0,
        }
    }

    /// Terminal reward favoring not losing: 1.0 draw, 0.5 win, 0.0 otherwise
    pub fn defensive_reward(&self, player: Player) -> f64 {
        match self.outcome() {
            Some(GameOutcome::Draw) => 1.0,
            Some(GameOutcome::Win(winner)) if winner == player => 0.5,
            _ => 0.0,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&StateKey> for Board {
    fn from(key: &StateKey) -> Self {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (cell, c) in cells.iter_mut().zip(key.as_str().chars()) {
            *cell = Cell::from_char(c).unwrap_or(Cell::Empty);
        }
        Self { cells }
    }
}

/// Renders the grid with ` | ` between columns and `- - - - -` between rows
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            if i % BOARD_SIZE == 0 && i != 0 {
                writeln!(f)?;
                writeln!(f, "- - - - -")?;
            }
            if i % BOARD_SIZE != 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", cell.to_char())?;
        }
        writeln!(f)
    }
}
