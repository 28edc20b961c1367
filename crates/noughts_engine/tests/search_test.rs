//! Tests for the perfect-play move selector.

use noughts_engine::search::WIN_SCORE;
use noughts_engine::{Board, Outcome, Player, Square, best_move, evaluate, score_moves};

/// Plays every line of X against the selector and checks O never loses.
fn explore(board: Board, to_move: Player, positions: &mut usize) {
    match evaluate(&board) {
        Outcome::Win { player, .. } => {
            assert_eq!(player, Player::O, "X beat the computer:\n{}", board.display());
            return;
        }
        Outcome::Draw => return,
        Outcome::InProgress => {}
    }
    *positions += 1;
    match to_move {
        Player::X => {
            for index in board.empties().collect::<Vec<_>>() {
                explore(board.with(index, Player::X), Player::O, positions);
            }
        }
        Player::O => {
            let index = best_move(&board, Player::O).expect("Open board has a move");
            assert_eq!(board.get(index), Some(Square::Empty));
            explore(board.with(index, Player::O), Player::X, positions);
        }
    }
}

#[test]
fn test_computer_never_loses_as_second_player() {
    let mut positions = 0;
    explore(Board::new(), Player::X, &mut positions);
    assert!(positions > 0);
}

#[test]
fn test_never_picks_losing_move_when_safe_one_exists() {
    let boards = ["X.. ... ...", ".X. ... ...", "X.. .O. ..X", "XX. .O. ...", ".X. XO. ..."];
    for s in boards {
        let board: Board = s.parse().unwrap();
        let scores = score_moves(&board, Player::O);
        let best_available = scores.iter().map(|m| m.score).max().unwrap();
        let chosen = best_move(&board, Player::O).unwrap();
        let chosen_score = scores.iter().find(|m| m.index == chosen).unwrap().score;
        assert_eq!(chosen_score, best_available, "board {s}");
        assert!(chosen_score >= 0, "board {s}");
    }
}

#[test]
fn test_one_ply_win_is_taken_as_a_win() {
    // O can win at 1 immediately; nothing else wins.
    let board: Board = "X.X .O. XO.".parse().unwrap();
    assert_eq!(best_move(&board, Player::O), Some(1));

    // Several winning continuations exist; the choice must still be a forced win.
    let board: Board = "XX. OO. ...".parse().unwrap();
    let chosen = best_move(&board, Player::O).unwrap();
    let score = score_moves(&board, Player::O)
        .into_iter()
        .find(|m| m.index == chosen)
        .unwrap()
        .score;
    assert_eq!(score, WIN_SCORE);
}

#[test]
fn test_first_ply_move_is_in_range_and_free() {
    let board = Board::new();
    let index = best_move(&board, Player::O).expect("Empty board has moves");
    assert!(index < 9);
    assert!(board.is_empty(index));
    assert!([0, 2, 4, 6, 8].contains(&index));
}
