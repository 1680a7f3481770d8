use crate::engine::SessionRng;
use super::board::{Board, CENTER, CORNERS};
use super::bot_controller::calculate_random_move;
use super::types::Mark;
use super::win_detector::has_win;

/// Lowest empty index that completes a line for `mark`.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    board
        .empty_cells()
        .find(|&index| has_win(&board.with_mark(index, mark), mark))
}

fn count_winning_moves(board: &Board, mark: Mark) -> usize {
    board
        .empty_cells()
        .filter(|&index| has_win(&board.with_mark(index, mark), mark))
        .count()
}

/// Empty cells where `mark` would leave itself two or more winning replies.
pub fn find_fork_moves(board: &Board, mark: Mark) -> Vec<usize> {
    board
        .empty_cells()
        .filter(|&index| count_winning_moves(&board.with_mark(index, mark), mark) >= 2)
        .collect()
}

fn opposite_corner(corner: usize) -> usize {
    8 - corner
}

/// Counters the opponent's fork squares.
///
/// A single fork square is simply occupied. With several, occupying one lets
/// the opponent fork on another, so the bot instead makes a threat that forces
/// a reply outside the fork squares.
fn block_fork_move(board: &Board, bot_mark: Mark, opponent_mark: Mark) -> Option<usize> {
    let fork_moves = find_fork_moves(board, opponent_mark);
    let first = *fork_moves.first()?;
    if fork_moves.len() == 1 {
        return Some(first);
    }

    let forcing = board.empty_cells().find(|&index| {
        let after = board.with_mark(index, bot_mark);
        match find_winning_move(&after, bot_mark) {
            Some(forced_reply) if !fork_moves.contains(&forced_reply) => {
                count_winning_moves(&after.with_mark(forced_reply, opponent_mark), opponent_mark) < 2
            }
            _ => false,
        }
    });

    forcing.or(Some(first))
}

fn opposite_corner_move(board: &Board, opponent_mark: Mark) -> Option<usize> {
    let opponent_corners: Vec<usize> = CORNERS
        .into_iter()
        .filter(|&corner| board.get(corner) == Some(opponent_mark))
        .collect();

    match opponent_corners.as_slice() {
        [corner] => {
            let opposite = opposite_corner(*corner);
            board.is_empty_at(opposite).then_some(opposite)
        }
        _ => None,
    }
}

pub(crate) fn calculate_hard_move(
    board: &Board,
    bot_mark: Mark,
    opponent_mark: Mark,
    rng: &mut SessionRng,
) -> Option<usize> {
    if let Some(index) = find_winning_move(board, bot_mark) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(board, opponent_mark) {
        return Some(index);
    }

    if let Some(&index) = find_fork_moves(board, bot_mark).first() {
        return Some(index);
    }

    if let Some(index) = block_fork_move(board, bot_mark, opponent_mark) {
        return Some(index);
    }

    if board.is_empty_at(CENTER) {
        return Some(CENTER);
    }

    if let Some(index) = opposite_corner_move(board, opponent_mark) {
        return Some(index);
    }

    let empty_corners: Vec<usize> = CORNERS
        .into_iter()
        .filter(|&corner| board.is_empty_at(corner))
        .collect();
    if let Some(index) = rng.choose(&empty_corners) {
        return Some(index);
    }

    calculate_random_move(board, rng)
}
