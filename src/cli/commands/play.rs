//! Play command - Human against a trained learner or minimax
//!
//! Moves are read as `row col` (0-2 each). Illegal or malformed input is
//! reported and asked for again.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use super::{Mark, OpponentKind, build_opponent, load_app_config, train::train_learner};
use crate::{
    Error,
    ports::Agent,
    tictactoe::{Action, Board, GameOutcome, Player},
};

/// Computer side of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    /// Q-learning agent trained before the game starts
    Learner,
    Minimax,
}

#[derive(Parser, Debug)]
#[command(about = "Play against the computer")]
pub struct PlayArgs {
    /// Mark the human plays
    #[arg(long, value_enum, default_value = "o")]
    pub human: Mark,

    /// Computer opponent
    #[arg(long, value_enum, default_value = "learner")]
    pub opponent: Opponent,

    /// Opponent the learner trains against before the game
    #[arg(long, value_enum, default_value = "random")]
    pub train_against: OpponentKind,

    /// Training episodes for the learner
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the learner's recorded values before each of its moves
    #[arg(long, default_value_t = false)]
    pub show_values: bool,
}

/// Parse `row col` (or `row,col`) into an action without checking the board
pub fn parse_action(line: &str) -> Option<Action> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Action::new(row, col))
}

/// Reject off-board and occupied targets
pub fn validate_action(board: &Board, action: Action) -> crate::Result<Action> {
    if board.check_action(action) {
        return Ok(action);
    }
    let reason = if action.in_bounds() {
        "cell is occupied"
    } else {
        "off the board"
    };
    Err(Error::InvalidAction {
        row: action.row,
        col: action.col,
        reason: reason.to_string(),
    })
}

/// Prompt until the human enters a legal move.
///
/// # Errors
///
/// Fails if the input ends or cannot be read.
pub fn read_human_action<R: BufRead, W: Write>(
    board: &Board,
    input: &mut R,
    out: &mut W,
) -> Result<Action> {
    let mut line = String::new();
    loop {
        write!(out, "Enter row (0-2) and column (0-2) to make your move: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line).context("reading move")? == 0 {
            bail!("input closed before a move was entered");
        }

        match parse_action(&line) {
            Some(action) => match validate_action(board, action) {
                Ok(action) => return Ok(action),
                Err(err) => writeln!(out, "Invalid move: {err}. Please try again.")?,
            },
            None => writeln!(out, "Please enter two numbers, e.g. `1 2`.")?,
        }
    }
}

/// Run one game between a human on `input`/`out` and `computer`
pub fn play_game<R: BufRead, W: Write>(
    human: Player,
    computer: &mut dyn Agent,
    input: &mut R,
    out: &mut W,
    mut before_computer_move: impl FnMut(&Board, &mut W) -> io::Result<()>,
) -> Result<GameOutcome> {
    let mut board = Board::new();
    writeln!(out, "You are {human}. The board is empty. Let's start!")?;
    write!(out, "{board}")?;

    let mut player = Player::X;
    loop {
        let action = if player == human {
            read_human_action(&board, input, out)?
        } else {
            before_computer_move(&board, out)?;
            computer.choose_action(&board)?
        };
        board.place(action, player);

        writeln!(out, "\nCurrent board state:")?;
        write!(out, "{board}")?;

        if let Some(outcome) = board.outcome() {
            match outcome {
                GameOutcome::Win(winner) => writeln!(out, "{winner} wins!")?,
                GameOutcome::Draw => writeln!(out, "It's a draw!")?,
            }
            return Ok(outcome);
        }
        player = player.opponent();
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = load_app_config(args.config.as_deref())?;
    let human = Player::from(args.human);
    let computer_mark = human.opponent();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match args.opponent {
        Opponent::Minimax => {
            let mut computer = build_opponent(OpponentKind::Minimax, computer_mark, &app);
            play_game(human, computer.as_mut(), &mut input, &mut out, |_, _| Ok(()))?;
        }
        Opponent::Learner => {
            let mut training = app.training.clone().with_seed(args.seed.or(app.training.seed));
            if let Some(episodes) = args.episodes {
                training.episodes = episodes;
            }
            training
                .validate()
                .context("invalid training configuration")?;

            let mut sparring = build_opponent(args.train_against, human, &app);
            let (mut learner, _) =
                train_learner(&training, computer_mark, sparring.as_mut(), true)?;

            let values = learner.clone();
            let show_values = args.show_values;
            play_game(
                human,
                &mut learner,
                &mut input,
                &mut out,
                |board, out| {
                    if show_values {
                        for (action, value) in values.action_values(board) {
                            writeln!(out, "  {action} - {value}")?;
                        }
                    }
                    Ok(())
                },
            )?;
        }
    }
    Ok(())
}
