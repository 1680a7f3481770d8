use super::board::Board;
use super::types::Mark;
use super::win_detector::has_win;

const WIN_SCORE: i32 = 10;

/// Exhaustive alpha-beta search. Faster wins score higher, slower losses
/// score higher than quick ones, ties go to the lowest index.
pub fn calculate_minimax_move(board: &Board, bot_mark: Mark) -> Option<usize> {
    let opponent_mark = bot_mark.opponent()?;

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in board.empty_cells() {
        let score = minimax(
            &board.with_mark(index, bot_mark),
            1,
            false,
            bot_mark,
            opponent_mark,
            i32::MIN,
            i32::MAX,
        );

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn minimax(
    board: &Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if has_win(board, bot_mark) {
        return WIN_SCORE - depth;
    }
    if has_win(board, opponent_mark) {
        return depth - WIN_SCORE;
    }
    if board.is_full() {
        return 0;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in board.empty_cells() {
            let eval = minimax(
                &board.with_mark(index, bot_mark),
                depth + 1,
                false,
                bot_mark,
                opponent_mark,
                alpha,
                beta,
            );
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in board.empty_cells() {
            let eval = minimax(
                &board.with_mark(index, opponent_mark),
                depth + 1,
                true,
                bot_mark,
                opponent_mark,
                alpha,
                beta,
            );
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
