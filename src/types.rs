//! Newtype wrappers for value-table keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Board;

/// Encoded board state used as a value-table key.
///
/// Wraps the 9-character row-major encoding produced by [`Board::encode`].
/// Equality is structural: two boards with the same cell contents produce
/// the same key.
///
/// # Examples
///
/// ```
/// use tictactoe_rl::tictactoe::{Action, Board, Player};
/// use tictactoe_rl::types::StateKey;
///
/// let mut board = Board::new();
/// board.place(Action::new(1, 1), Player::X);
///
/// let key = board.state_key();
/// assert_eq!(key.as_str(), "----X----");
/// assert_eq!(StateKey::parse("----X----").unwrap(), key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey(String);

impl StateKey {
    /// Parse and validate a key from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid board encoding.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        Board::from_encoding(s).map(|board| Self::from_board(&board))
    }

    pub(crate) fn from_board(board: &Board) -> Self {
        StateKey(board.encode())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for StateKey {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
