//! Train command - Train one or two Q-learning agents

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use super::{OpponentKind, build_opponent, load_app_config};
use crate::{
    cli::{config::AppConfig, output},
    pipeline::{
        ExplorationSchedule, MatchResult, MilestoneObserver, ProgressObserver, Seat, Trainer,
        TrainingConfig, TrainingResult, play_match,
    },
    ports::Agent,
    q_learning::QLearningAgent,
    tictactoe::Player,
};

/// Which seats learn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LearnerSeats {
    /// A learner plays X against a fixed opponent
    X,
    /// A learner plays O against a fixed opponent
    O,
    /// Two learners with separate tables play each other
    Both,
}

#[derive(Parser, Debug)]
#[command(about = "Train Q-learning agents")]
pub struct TrainArgs {
    /// Seat(s) controlled by a learner
    #[arg(long, short = 'l', value_enum, default_value = "x")]
    pub learner: LearnerSeats,

    /// Fixed opponent when only one seat learns
    #[arg(long, short = 'o', value_enum, default_value = "random")]
    pub opponent: OpponentKind,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Learning rate α (0.0-1.0]
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Constant exploration rate instead of linear decay
    #[arg(long)]
    pub exploration: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the learned table(s) in dump format
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Greedy games played against the training opponent afterwards
    #[arg(long, short = 'v', default_value_t = 0)]
    pub validation_games: usize,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    /// Apply command-line overrides on top of a file or default configuration
    pub fn training_config(&self, base: TrainingConfig) -> TrainingConfig {
        let mut config = base;
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(discount) = self.discount {
            config.discount_factor = discount;
        }
        if let Some(rate) = self.exploration {
            config.exploration = ExplorationSchedule::Constant(rate);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    config: &'a TrainingConfig,
    training: &'a TrainingResult,
    validation: Option<&'a MatchResult>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Dump path for one of two learners: `table.txt` becomes `table_x.txt`
fn seat_dump_path(path: &Path, mark: Player) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}_{}", mark.to_string().to_ascii_lowercase());
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Train a single learner in `mark`'s seat against `opponent`
pub(crate) fn train_learner(
    config: &TrainingConfig,
    mark: Player,
    opponent: &mut dyn Agent,
    progress: bool,
) -> Result<(QLearningAgent, TrainingResult)> {
    let mut learner = config.new_learner(format!("Q-Learning-{mark}"));
    let mut trainer = Trainer::new(config.clone())
        .with_observer(Box::new(MilestoneObserver::new(mark)));
    if progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = match mark {
        Player::X => trainer.run(Seat::Learner(&mut learner), Seat::Fixed(opponent)),
        Player::O => trainer.run(Seat::Fixed(opponent), Seat::Learner(&mut learner)),
    }
    .context("training failed")?;
    Ok((learner, result))
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let app = load_app_config(args.config.as_deref())?;
    let config = args.training_config(app.training.clone());
    config.validate().context("invalid training configuration")?;
    let progress = !args.no_progress;

    let (learners, result, validation) = match args.learner {
        LearnerSeats::Both => train_both(&config, args.validation_games, progress)?,
        LearnerSeats::X | LearnerSeats::O => {
            let mark = if args.learner == LearnerSeats::X {
                Player::X
            } else {
                Player::O
            };
            train_single(&app, &config, mark, args.opponent, args.validation_games, progress)?
        }
    };

    output::print_training_result(&result);
    if let Some(validation) = &validation {
        output::print_match_result("Validation (greedy play)", validation);
    }

    if let Some(path) = &args.dump {
        match learners.as_slice() {
            [(_, learner)] => dump_table(learner, path)?,
            _ => {
                for (mark, learner) in &learners {
                    dump_table(learner, &seat_dump_path(path, *mark))?;
                }
            }
        }
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        let summary = TrainingSummaryFile {
            config: &config,
            training: &result,
            validation: validation.as_ref(),
        };
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating summary file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        output::print_kv("Summary", &path.display().to_string());
    }

    Ok(())
}

type TrainOutput = (
    Vec<(Player, QLearningAgent)>,
    TrainingResult,
    Option<MatchResult>,
);

fn train_single(
    app: &AppConfig,
    config: &TrainingConfig,
    mark: Player,
    opponent_kind: OpponentKind,
    validation_games: usize,
    progress: bool,
) -> Result<TrainOutput> {
    let mut opponent = build_opponent(opponent_kind, mark.opponent(), app);
    let (mut learner, result) = train_learner(config, mark, opponent.as_mut(), progress)?;

    let validation = if validation_games > 0 {
        let played = match mark {
            Player::X => play_match(&mut learner, opponent.as_mut(), validation_games),
            Player::O => play_match(opponent.as_mut(), &mut learner, validation_games),
        };
        Some(played.context("validation failed")?)
    } else {
        None
    };

    Ok((vec![(mark, learner)], result, validation))
}

fn train_both(
    config: &TrainingConfig,
    validation_games: usize,
    progress: bool,
) -> Result<TrainOutput> {
    let mut x = config.new_learner("Q-Learning-X");
    let mut o = config.new_learner("Q-Learning-O");

    let mut trainer = Trainer::new(config.clone());
    if progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    let result = trainer
        .run(Seat::Learner(&mut x), Seat::Learner(&mut o))
        .context("training failed")?;

    let validation = if validation_games > 0 {
        Some(play_match(&mut x, &mut o, validation_games).context("validation failed")?)
    } else {
        None
    };

    Ok((vec![(Player::X, x), (Player::O, o)], result, validation))
}

fn dump_table(learner: &QLearningAgent, path: &Path) -> Result<()> {
    learner
        .q_table()
        .dump_to_file(path)
        .with_context(|| format!("dumping {} table", learner.name()))?;
    output::print_kv("Table dump", &path.display().to_string());
    Ok(())
}
