//! Tic-Tac-Toe learning CLI
//!
//! - `train`: train Q-learning agents against a fixed opponent or each other
//! - `evaluate`: play policies head to head
//! - `play`: play against a trained learner or minimax

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Q-learning and minimax agents for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train Q-learning agents
    Train(Box<tictactoe_rl::cli::commands::train::TrainArgs>),

    /// Play policies against each other
    Evaluate(tictactoe_rl::cli::commands::evaluate::EvaluateArgs),

    /// Play a game against the computer
    Play(tictactoe_rl::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tictactoe_rl::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => tictactoe_rl::cli::commands::evaluate::execute(args),
        Commands::Play(args) => tictactoe_rl::cli::commands::play::execute(args),
    }
}
