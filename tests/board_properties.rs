//! Win detection and state encoding properties over the whole line table.

mod common;

use common::board;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tictactoe_rl::tictactoe::{Action, Board, Cell, Player, WINNING_LINES};

#[test]
fn every_line_wins_for_its_owner_only() {
    assert_eq!(WINNING_LINES.len(), 8);
    for line in WINNING_LINES {
        for player in [Player::X, Player::O] {
            let mut board = Board::new();
            for &index in &line {
                board.place(Action::from_index(index), player);
            }
            assert!(board.check_win(player), "line {line:?} for {player}");
            assert!(!board.check_win(player.opponent()));
            assert!(board.is_over());
        }
    }
}

#[test]
fn two_of_three_never_wins() {
    for line in WINNING_LINES {
        for skip in 0..3 {
            let mut board = Board::new();
            for (i, &index) in line.iter().enumerate() {
                if i != skip {
                    board.place(Action::from_index(index), Player::X);
                }
            }
            assert!(!board.check_win(Player::X));
            assert!(!board.is_over());
        }
    }
}

#[test]
fn full_board_without_line_is_a_draw() {
    let drawn = board("XOXXOOOXX");
    assert!(!drawn.check_win(Player::X));
    assert!(!drawn.check_win(Player::O));
    assert!(drawn.check_draw());
    assert!(drawn.is_over());
    assert!(drawn.available_actions().is_empty());
}

#[test]
fn same_moves_give_same_encoding() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let mut a = Board::new();
        let mut b = Board::new();
        let mut player = Player::X;
        while !a.is_over() {
            let action = a.random_action(&mut rng).unwrap();
            a.place(action, player);
            b.place(action, player);
            player = player.opponent();
        }
        assert_eq!(a.encode(), b.encode());
        assert_eq!(a.state_key(), b.state_key());
    }
}

#[test]
fn single_cell_difference_changes_encoding() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let mut cells = String::new();
        for _ in 0..9 {
            cells.push(['-', 'X', 'O'][rng.random_range(0..3)]);
        }
        let original = board(&cells);

        for index in 0..9 {
            let action = Action::from_index(index);
            for replacement in [Cell::Empty, Cell::X, Cell::O] {
                if original.get(action) == replacement {
                    continue;
                }
                let mut changed: Vec<char> = cells.chars().collect();
                changed[index] = replacement.to_char();
                let changed = board(&changed.into_iter().collect::<String>());
                assert_ne!(original.encode(), changed.encode());
            }
        }
    }
}

#[test]
fn encoding_round_trips_through_parse() {
    for encoding in ["---------", "X---O----", "XOXOXOXOX", "OO-XX-X--"] {
        assert_eq!(board(encoding).encode(), encoding);
    }
}
