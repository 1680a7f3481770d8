use super::board::Board;
use super::types::{Mark, WinningLine};

pub const LINE_PATTERNS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn completes(board: &Board, pattern: &[usize; 3], mark: Mark) -> bool {
    pattern.iter().all(|&index| board.get(index) == Some(mark))
}

pub fn has_win(board: &Board, mark: Mark) -> bool {
    if mark == Mark::Empty {
        return false;
    }
    LINE_PATTERNS
        .iter()
        .any(|pattern| completes(board, pattern, mark))
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

/// First completed pattern in pattern order, X checked before O.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for mark in [Mark::X, Mark::O] {
        if let Some(pattern) = LINE_PATTERNS
            .iter()
            .find(|pattern| completes(board, pattern, mark))
        {
            return Some(WinningLine::new(mark, *pattern));
        }
    }
    None
}

pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !has_win(board, Mark::X) && !has_win(board, Mark::O)
}
