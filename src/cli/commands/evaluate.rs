//! Evaluate command - Play fixed policies against each other

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use super::{OpponentKind, build_opponent, load_app_config, train::train_learner};
use crate::{
    cli::{config::AppConfig, output},
    pipeline::{MatchResult, TrainingConfig, play_match},
    ports::Agent,
    tictactoe::Player,
};

/// Policies that can take a seat in an evaluation match
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Random,
    Minimax,
    /// A Q-learning agent trained first, then played greedily
    Learner,
}

#[derive(Parser, Debug)]
#[command(about = "Evaluate agents head to head")]
pub struct EvaluateArgs {
    /// Policy playing X
    #[arg(long, value_enum, default_value = "minimax")]
    pub x: AgentKind,

    /// Policy playing O
    #[arg(long, value_enum, default_value = "random")]
    pub o: AgentKind,

    /// Number of evaluation games
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Opponent a `learner` seat trains against before the match
    #[arg(long, value_enum, default_value = "random")]
    pub train_against: OpponentKind,

    /// Training episodes for `learner` seats
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing the match result as JSON
    #[arg(long)]
    pub output: Option<PathBuf>,
}

fn build_seat(
    kind: AgentKind,
    mark: Player,
    args: &EvaluateArgs,
    app: &AppConfig,
    training: &TrainingConfig,
) -> Result<Box<dyn Agent>> {
    let mut agent = match kind {
        AgentKind::Random => build_opponent(OpponentKind::Random, mark, app),
        AgentKind::Minimax => build_opponent(OpponentKind::Minimax, mark, app),
        AgentKind::Learner => {
            let mut sparring = build_opponent(args.train_against, mark.opponent(), app);
            let (learner, result) = train_learner(training, mark, sparring.as_mut(), false)?;
            log::info!(
                "trained {} over {} episodes ({} states)",
                learner.name(),
                result.episodes,
                learner.q_table().len()
            );
            Box::new(learner) as Box<dyn Agent>
        }
    };

    if let Some(seed) = args.seed {
        let offset = match mark {
            Player::X => 0,
            Player::O => 1,
        };
        agent.set_rng_seed(seed.wrapping_add(offset))?;
    }
    Ok(agent)
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = load_app_config(args.config.as_deref())?;
    let mut training = app.training.clone().with_seed(args.seed.or(app.training.seed));
    if let Some(episodes) = args.episodes {
        training.episodes = episodes;
    }
    training
        .validate()
        .context("invalid training configuration")?;

    let games = args.games.unwrap_or(app.evaluation.games);
    let mut x = build_seat(args.x, Player::X, &args, &app, &training)?;
    let mut o = build_seat(args.o, Player::O, &args, &app, &training)?;

    let result: MatchResult =
        play_match(x.as_mut(), o.as_mut(), games).context("evaluation match failed")?;
    output::print_match_result("Evaluation", &result);

    if let Some(path) = &args.output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result)
            .with_context(|| format!("writing match result to {}", path.display()))?;
    }
    Ok(())
}
