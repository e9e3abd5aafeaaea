//! Training loop for tabular learners
//!
//! Both seats may learn at once (two independent tables), or one seat learns
//! while the other is a fixed sparring partner.

use std::{path::Path, time::Instant};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Agent, Observer},
    q_learning::QLearningAgent,
    tictactoe::{Action, Board, GameOutcome, Player},
    types::StateKey,
    utils::rate,
};

/// How the exploration rate evolves over a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationSchedule {
    /// `(total - episode) / total`: 1.0 on the first episode, approaching 0.0
    #[default]
    LinearDecay,
    /// The same rate for every episode
    Constant(f64),
}

impl ExplorationSchedule {
    /// Exploration rate for a 0-based `episode` out of `total`
    pub fn rate(&self, episode: usize, total: usize) -> f64 {
        match *self {
            ExplorationSchedule::LinearDecay => rate(total.saturating_sub(episode), total),
            ExplorationSchedule::Constant(value) => value,
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Step size α for learners built by [`TrainingConfig::new_learner`]
    pub learning_rate: f64,

    /// Discount γ for learners built by [`TrainingConfig::new_learner`]
    pub discount_factor: f64,

    pub exploration: ExplorationSchedule,

    /// Random seed; X's seat gets `seed`, O's seat `seed + 1`
    pub seed: Option<u64>,

    /// Episodes between timing log lines
    pub log_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 30_000,
            learning_rate: 0.01,
            discount_factor: 0.8,
            exploration: ExplorationSchedule::LinearDecay,
            seed: None,
            log_interval: 10,
        }
    }
}

impl TrainingConfig {
    /// Fresh learner with this configuration's step size and discount
    pub fn new_learner(&self, name: impl Into<String>) -> QLearningAgent {
        QLearningAgent::new(self.learning_rate, self.discount_factor).with_name(name)
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_exploration(mut self, exploration: ExplorationSchedule) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_log_interval(mut self, log_interval: usize) -> Self {
        self.log_interval = log_interval;
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if self.episodes == 0 {
            return invalid("episodes must be greater than 0".to_string());
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return invalid(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return invalid(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            ));
        }
        if let ExplorationSchedule::Constant(value) = self.exploration {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!(
                    "constant exploration rate must be in [0, 1], got {value}"
                ));
            }
        }
        if self.log_interval == 0 {
            return invalid("log_interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub episodes: usize,

    pub x_name: String,
    pub o_name: String,

    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,

    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,

    /// States recorded by X's table, if X was learning
    pub x_states: Option<usize>,
    /// States recorded by O's table, if O was learning
    pub o_states: Option<usize>,

    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

impl TrainingResult {
    /// Games the given seat did not lose
    pub fn not_lost(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins + self.draws,
            Player::O => self.o_wins + self.draws,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// A participant in a training run
///
/// Only `Learner` seats explore and receive value updates.
pub enum Seat<'a> {
    Learner(&'a mut QLearningAgent),
    Fixed(&'a mut dyn Agent),
}

impl Seat<'_> {
    fn choose_action(&mut self, board: &Board, exploration_rate: f64) -> Result<Action> {
        match self {
            Seat::Learner(agent) => agent.choose_action_exploring(board, exploration_rate),
            Seat::Fixed(agent) => agent.choose_action(board),
        }
    }

    fn learner(&mut self) -> Option<&mut QLearningAgent> {
        match self {
            Seat::Learner(agent) => Some(&mut **agent),
            Seat::Fixed(_) => None,
        }
    }

    fn is_learner(&self) -> bool {
        matches!(self, Seat::Learner(_))
    }

    fn name(&self) -> &str {
        match self {
            Seat::Learner(agent) => agent.name(),
            Seat::Fixed(agent) => agent.name(),
        }
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        match self {
            Seat::Learner(agent) => agent.set_rng_seed(seed),
            Seat::Fixed(agent) => agent.set_rng_seed(seed),
        }
    }

    fn state_count(&self) -> Option<usize> {
        match self {
            Seat::Learner(agent) => Some(agent.q_table().len()),
            Seat::Fixed(_) => None,
        }
    }
}

fn seat_index(player: Player) -> usize {
    match player {
        Player::X => 0,
        Player::O => 1,
    }
}

/// Runs episodes between two seats and feeds transitions to the learners
pub struct Trainer {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train with `x` moving first.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, when neither seat learns, or when
    /// an agent or observer fails.
    pub fn run<'a>(&mut self, x: Seat<'a>, o: Seat<'a>) -> Result<TrainingResult> {
        self.config.validate()?;
        if !x.is_learner() && !o.is_learner() {
            return Err(Error::InvalidConfiguration {
                message: "training needs at least one learning seat".to_string(),
            });
        }

        let mut seats = [x, o];
        self.seed_pair(&mut seats)?;

        let episodes = self.config.episodes;
        let (mut x_wins, mut o_wins, mut draws) = (0, 0, 0);

        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        let started = Instant::now();
        let mut checkpoint = started;
        for episode in 0..episodes {
            if episode % self.config.log_interval == 0 {
                let now = Instant::now();
                log::debug!(
                    "episode {episode}: {} ms",
                    now.duration_since(checkpoint).as_millis()
                );
                checkpoint = now;
            }

            let exploration_rate = self.config.exploration.rate(episode, episodes);
            let outcome = play_episode(&mut seats, exploration_rate)?;
            match outcome {
                GameOutcome::Win(Player::X) => x_wins += 1,
                GameOutcome::Win(Player::O) => o_wins += 1,
                GameOutcome::Draw => draws += 1,
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let [x, o] = &seats;
        let result = TrainingResult {
            episodes,
            x_name: x.name().to_string(),
            o_name: o.name().to_string(),
            x_wins,
            o_wins,
            draws,
            x_win_rate: rate(x_wins, episodes),
            o_win_rate: rate(o_wins, episodes),
            draw_rate: rate(draws, episodes),
            x_states: x.state_count(),
            o_states: o.state_count(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        log::info!(
            "trained {} episodes in {} ms: {} (X) won {}, {} (O) won {}, {} draws",
            result.episodes,
            result.elapsed_ms,
            result.x_name,
            result.x_wins,
            result.o_name,
            result.o_wins,
            result.draws
        );
        Ok(result)
    }

    fn seed_pair(&self, seats: &mut [Seat<'_>; 2]) -> Result<()> {
        if let Some(seed) = self.config.seed {
            seats[0].set_rng_seed(seed)?;
            seats[1].set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}

/// Play one episode from an empty board.
///
/// A learner's transition stays pending until its next decision point, so
/// the bootstrap state is the one it faces after the opponent's reply. When
/// the game ends, the mover's pending transition is settled with the
/// aggressive reward and the other seat's with the defensive reward.
fn play_episode(seats: &mut [Seat<'_>; 2], exploration_rate: f64) -> Result<GameOutcome> {
    let mut board = Board::new();
    let mut pending: [Option<(StateKey, Action)>; 2] = [None, None];
    let mut player = Player::X;

    loop {
        let mover = seat_index(player);
        let state = board.state_key();

        if let (Some(learner), Some((previous, action))) =
            (seats[mover].learner(), pending[mover].take())
        {
            learner.update(&previous, Some(&state), action, 0.0);
        }

        let action = seats[mover].choose_action(&board, exploration_rate)?;
        board.place(action, player);
        if seats[mover].is_learner() {
            pending[mover] = Some((state, action));
        }

        if let Some(outcome) = board.outcome() {
            if let (Some(learner), Some((previous, action))) =
                (seats[mover].learner(), pending[mover].take())
            {
                learner.update(&previous, None, action, board.aggressive_reward(player));
            }

            let other = player.opponent();
            let waiting = seat_index(other);
            if let (Some(learner), Some((previous, action))) =
                (seats[waiting].learner(), pending[waiting].take())
            {
                learner.update(&previous, None, action, board.defensive_reward(other));
            }

            return Ok(outcome);
        }

        player = player.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{MinimaxAgent, RandomAgent};

    fn small_config(episodes: usize) -> TrainingConfig {
        TrainingConfig::default()
            .with_episodes(episodes)
            .with_learning_rate(0.5)
            .with_seed(Some(42))
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = TrainingConfig::default();
        assert_eq!(config.episodes, 30_000);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.discount_factor, 0.8);
        assert_eq!(config.log_interval, 10);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let base = TrainingConfig::default();
        for config in [
            base.clone().with_episodes(0),
            base.clone().with_learning_rate(0.0),
            base.clone().with_learning_rate(1.5),
            base.clone().with_discount_factor(-0.1),
            base.clone().with_exploration(ExplorationSchedule::Constant(2.0)),
            base.clone().with_log_interval(0),
        ] {
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_linear_decay() {
        let schedule = ExplorationSchedule::LinearDecay;
        assert_eq!(schedule.rate(0, 4), 1.0);
        assert_eq!(schedule.rate(1, 4), 0.75);
        assert_eq!(schedule.rate(3, 4), 0.25);
        assert_eq!(ExplorationSchedule::Constant(0.1).rate(3, 4), 0.1);
    }

    #[test]
    fn test_learner_against_random_counts_every_episode() {
        let config = small_config(50);
        let mut learner = config.new_learner("Learner");
        let mut random = RandomAgent::new("Random");

        let mut trainer = Trainer::new(config);
        let result = trainer
            .run(Seat::Learner(&mut learner), Seat::Fixed(&mut random))
            .unwrap();

        assert_eq!(result.episodes, 50);
        assert_eq!(result.x_wins + result.o_wins + result.draws, 50);
        assert_eq!(result.x_name, "Learner");
        assert_eq!(result.o_name, "Random");
        assert_eq!(result.x_states, Some(learner.q_table().len()));
        assert_eq!(result.o_states, None);
        assert!(!learner.q_table().is_empty());
        assert_eq!(learner.params().learning_rate, 0.5);
        assert_eq!(learner.rng_seed(), Some(42));
    }

    #[test]
    fn test_learning_second_seat_records_only_its_own_turns() {
        let mut learner = QLearningAgent::new(0.5, 0.8);
        let mut random = RandomAgent::new("Random");

        Trainer::new(small_config(20))
            .run(Seat::Fixed(&mut random), Seat::Learner(&mut learner))
            .unwrap();

        // O always moves with an odd number of marks on the board.
        for (state, _) in learner.q_table().sorted_entries() {
            let board = Board::from(state);
            assert_eq!(board.count(Player::X), board.count(Player::O) + 1);
        }
    }

    #[test]
    fn test_losing_learner_gets_zero_terminal_reward() {
        // Minimax never loses, so every terminal reward the second seat sees
        // is 0.0 (loss) or 1.0 (defensive draw).
        let mut minimax = MinimaxAgent::new(Player::X);
        let mut learner = QLearningAgent::new(1.0, 0.8);

        let result = Trainer::new(small_config(30))
            .run(Seat::Fixed(&mut minimax), Seat::Learner(&mut learner))
            .unwrap();

        assert_eq!(result.o_wins, 0);
        for (_, actions) in learner.q_table().sorted_entries() {
            for (_, value) in actions {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let run = || {
            let mut x = QLearningAgent::new(0.5, 0.8);
            let mut o = QLearningAgent::new(0.5, 0.8);
            let result = Trainer::new(small_config(40))
                .run(Seat::Learner(&mut x), Seat::Learner(&mut o))
                .unwrap();
            (result.x_wins, result.o_wins, result.draws, x.q_table().entry_count())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_two_fixed_seats_are_rejected() {
        let mut a = RandomAgent::new("A");
        let mut b = RandomAgent::new("B");
        let result = Trainer::new(small_config(5)).run(Seat::Fixed(&mut a), Seat::Fixed(&mut b));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_config_from_toml() {
        let config: TrainingConfig = toml::from_str(
            r#"
            episodes = 100
            exploration = { constant = 0.2 }
            "#,
        )
        .unwrap();
        assert_eq!(config.episodes, 100);
        assert_eq!(config.exploration, ExplorationSchedule::Constant(0.2));
        assert_eq!(config.learning_rate, 0.01);
    }
}
