//! Head-to-head evaluation of fixed policies

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Agent,
    tictactoe::{Board, GameOutcome, Player},
    utils::rate,
};

/// Outcome counts of a match, from X's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub x_name: String,
    pub o_name: String,

    /// Total games played
    pub games: usize,

    pub wins: usize,
    pub draws: usize,
    pub losses: usize,

    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl MatchResult {
    pub fn new(
        x_name: impl Into<String>,
        o_name: impl Into<String>,
        wins: usize,
        draws: usize,
        losses: usize,
    ) -> Self {
        let games = wins + draws + losses;
        Self {
            x_name: x_name.into(),
            o_name: o_name.into(),
            games,
            wins,
            draws,
            losses,
            win_rate: rate(wins, games),
            draw_rate: rate(draws, games),
            loss_rate: rate(losses, games),
        }
    }

    /// Fraction of games the given seat did not lose
    pub fn not_lost_rate(&self, player: Player) -> f64 {
        match player {
            Player::X => rate(self.wins + self.draws, self.games),
            Player::O => rate(self.losses + self.draws, self.games),
        }
    }
}

/// Play a single game from an empty board, `x` moving first
pub fn play_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<GameOutcome> {
    let mut board = Board::new();
    let mut player = Player::X;

    loop {
        let agent: &mut dyn Agent = match player {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let action = agent.choose_action(&board)?;
        board.place(action, player);

        if let Some(outcome) = board.outcome() {
            return Ok(outcome);
        }
        player = player.opponent();
    }
}

/// Play `games` games between two fixed policies.
///
/// Neither agent learns; randomized agents keep drawing from their own
/// generators across games.
pub fn play_match(x: &mut dyn Agent, o: &mut dyn Agent, games: usize) -> Result<MatchResult> {
    let (mut wins, mut draws, mut losses) = (0, 0, 0);
    for _ in 0..games {
        match play_game(x, o)? {
            GameOutcome::Win(Player::X) => wins += 1,
            GameOutcome::Win(Player::O) => losses += 1,
            GameOutcome::Draw => draws += 1,
        }
    }

    let result = MatchResult::new(x.name(), o.name(), wins, draws, losses);
    log::info!(
        "{} (X) vs {} (O) over {} games: {} wins, {} draws, {} losses",
        result.x_name,
        result.o_name,
        result.games,
        result.wins,
        result.draws,
        result.losses
    );
    Ok(result)
}
