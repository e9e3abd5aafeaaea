//! End-to-end training runs.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tictactoe_rl::{
    Result,
    agents::{MinimaxAgent, RandomAgent},
    pipeline::{Seat, Trainer, TrainingConfig, TrainingResult, play_match},
    ports::{Agent, Observer},
    tictactoe::{Action, Board, GameOutcome, Player},
};

struct CountingObserver {
    starts: Arc<AtomicUsize>,
    episodes: Arc<AtomicUsize>,
    ends: Arc<AtomicUsize>,
}

impl Observer for CountingObserver {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> Result<()> {
        self.episodes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.ends.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn config(episodes: usize, seed: u64) -> TrainingConfig {
    TrainingConfig::default()
        .with_episodes(episodes)
        .with_learning_rate(0.5)
        .with_seed(Some(seed))
}

#[test]
fn observers_see_every_episode() {
    let starts = Arc::new(AtomicUsize::new(0));
    let episodes = Arc::new(AtomicUsize::new(0));
    let ends = Arc::new(AtomicUsize::new(0));

    let config = config(37, 1);
    let mut learner = config.new_learner("Learner");
    let mut random = RandomAgent::new("Random");
    Trainer::new(config)
        .with_observer(Box::new(CountingObserver {
            starts: Arc::clone(&starts),
            episodes: Arc::clone(&episodes),
            ends: Arc::clone(&ends),
        }))
        .run(Seat::Learner(&mut learner), Seat::Fixed(&mut random))
        .unwrap();

    assert_eq!(starts.load(Ordering::SeqCst), 1);
    assert_eq!(episodes.load(Ordering::SeqCst), 37);
    assert_eq!(ends.load(Ordering::SeqCst), 1);
}

#[test]
fn trained_learner_beats_random_baseline() {
    let config = config(3_000, 7);
    let mut learner = config.new_learner("Learner");
    let mut random = RandomAgent::new("Random");
    Trainer::new(config)
        .run(Seat::Learner(&mut learner), Seat::Fixed(&mut random))
        .unwrap();

    let mut opponent = RandomAgent::with_seed("Random", 8);
    let result = play_match(&mut learner, &mut opponent, 1_000).unwrap();
    assert!(
        result.not_lost_rate(Player::X) >= 0.8,
        "greedy learner only avoided defeat in {:.3} of games",
        result.not_lost_rate(Player::X)
    );
}

#[test]
fn learner_finds_the_only_drawing_reply_against_minimax() {
    // Minimax opens in the corner; only the center avoids a forced loss.
    let config = config(1_000, 3);
    let mut minimax = MinimaxAgent::new(Player::X);
    let mut learner = config.new_learner("Learner");
    let result = Trainer::new(config)
        .run(Seat::Fixed(&mut minimax), Seat::Learner(&mut learner))
        .unwrap();

    assert_eq!(result.o_wins, 0);
    assert!(result.draws > 0);

    let after_opening = Board::from_encoding("X--------").unwrap();
    assert_eq!(learner.best_actions(&after_opening), vec![Action::new(1, 1)]);
}

#[test]
fn self_play_builds_two_tables() {
    let config = config(500, 11);
    let mut x = config.new_learner("X");
    let mut o = config.new_learner("O");
    let result: TrainingResult = Trainer::new(config)
        .run(Seat::Learner(&mut x), Seat::Learner(&mut o))
        .unwrap();

    assert_eq!(result.x_wins + result.o_wins + result.draws, 500);
    assert_eq!(result.x_states, Some(x.q_table().len()));
    assert_eq!(result.o_states, Some(o.q_table().len()));

    // X's table only holds positions with X to move, O's only with O to move.
    for (state, _) in x.q_table().sorted_entries() {
        let board = Board::from(state);
        assert_eq!(board.count(Player::X), board.count(Player::O));
    }
    for (state, _) in o.q_table().sorted_entries() {
        let board = Board::from(state);
        assert_eq!(board.count(Player::X), board.count(Player::O) + 1);
    }
}

#[test]
fn result_round_trips_through_json() {
    let config = config(10, 5);
    let mut learner = config.new_learner("Learner");
    let mut random = RandomAgent::new("Random");
    let result = Trainer::new(config)
        .run(Seat::Learner(&mut learner), Seat::Fixed(&mut random))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    result.save(&path).unwrap();
    assert_eq!(TrainingResult::load(&path).unwrap(), result);
}

#[test]
fn seats_can_borrow_from_separate_owners() {
    let config = config(25, 2);
    let mut opponent: Box<dyn Agent> = Box::new(RandomAgent::new("Random"));

    let result = {
        let mut learner = config.new_learner("Learner");
        let result = Trainer::new(config.clone())
            .run(Seat::Fixed(opponent.as_mut()), Seat::Learner(&mut learner))
            .unwrap();
        assert_eq!(result.o_states, Some(learner.q_table().len()));
        result
    };

    assert_eq!(result.x_name, "Random");
    assert_eq!(result.x_wins + result.o_wins + result.draws, 25);
}
