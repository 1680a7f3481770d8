use super::board::Board;
use super::types::{GameStatus, Mark, MoveOutcome, WinningLine};
use super::win_detector::{check_win, check_win_with_line};

/// One round: the board, whose turn it is, and how it ended. X always opens.
#[derive(Debug, Clone)]
pub struct GameRound {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<usize>,
}

impl Default for GameRound {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRound {
    pub const FIRST_MARK: Mark = Mark::X;

    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: Self::FIRST_MARK,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    /// Places `mark` at `index` if the round is running, it is `mark`'s turn
    /// and the cell is empty. Anything else is ignored.
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> MoveOutcome {
        if self.is_over() || mark != self.current_mark || !self.board.is_empty_at(index) {
            return MoveOutcome::rejected();
        }

        self.board.set(index, mark);
        self.last_move = Some(index);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        MoveOutcome::applied(self.status)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn check_game_over(&mut self) {
        if let Some(winner_mark) = check_win(&self.board) {
            self.status = match winner_mark {
                Mark::X => GameStatus::XWon,
                _ => GameStatus::OWon,
            };
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tictactoe::RoundResult;

    fn play(round: &mut GameRound, moves: &[usize]) -> MoveOutcome {
        let mut outcome = MoveOutcome::rejected();
        for &index in moves {
            outcome = round.apply_move(index, round.current_mark());
            assert!(outcome.accepted, "move {} rejected", index);
        }
        outcome
    }

    #[test]
    fn test_x_opens_and_turns_alternate() {
        let mut round = GameRound::new();
        assert_eq!(round.current_mark(), Mark::X);
        let outcome = round.apply_move(4, Mark::X);
        assert!(outcome.accepted);
        assert!(!outcome.terminal);
        assert_eq!(outcome.winner, None);
        assert_eq!(round.current_mark(), Mark::O);
        assert_eq!(round.last_move(), Some(4));
    }

    #[test]
    fn test_occupied_cell_is_noop() {
        let mut round = GameRound::new();
        round.apply_move(4, Mark::X);
        let before = *round.board();
        let outcome = round.apply_move(4, Mark::O);
        assert_eq!(outcome, MoveOutcome::rejected());
        assert_eq!(round.board(), &before);
        assert_eq!(round.current_mark(), Mark::O);
    }

    #[test]
    fn test_wrong_turn_and_out_of_range_are_noops() {
        let mut round = GameRound::new();
        assert!(!round.apply_move(0, Mark::O).accepted);
        assert!(!round.apply_move(9, Mark::X).accepted);
        assert!(!round.apply_move(0, Mark::Empty).accepted);
        assert_eq!(round.board().move_count(), 0);
        assert_eq!(round.current_mark(), Mark::X);
    }

    #[test]
    fn test_win_ends_round() {
        let mut round = GameRound::new();
        let outcome = play(&mut round, &[0, 3, 1, 4, 2]);
        assert!(outcome.terminal);
        assert_eq!(outcome.winner, Some(RoundResult::Win(Mark::X)));
        assert_eq!(round.status(), GameStatus::XWon);
        assert_eq!(round.winning_line().map(|l| l.cells), Some([0, 1, 2]));
        // Turn stays with the winner; nothing more is accepted.
        assert_eq!(round.current_mark(), Mark::X);
        assert!(!round.apply_move(5, Mark::O).accepted);
        assert!(!round.apply_move(5, Mark::X).accepted);
    }

    #[test]
    fn test_draw_ends_round() {
        let mut round = GameRound::new();
        let outcome = play(&mut round, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert!(outcome.terminal);
        assert_eq!(outcome.winner, Some(RoundResult::Draw));
        assert_eq!(round.status(), GameStatus::Draw);
        assert_eq!(round.winning_line(), None);
    }

    #[test]
    fn test_win_on_last_cell_is_not_draw() {
        let mut round = GameRound::new();
        // The ninth mark completes column 0-3-6.
        let outcome = play(&mut round, &[0, 1, 3, 4, 2, 5, 7, 8, 6]);
        assert_eq!(outcome.winner, Some(RoundResult::Win(Mark::X)));
    }

    #[test]
    fn test_reset() {
        let mut round = GameRound::new();
        play(&mut round, &[0, 3, 1, 4, 2]);
        round.reset();
        assert_eq!(round.board().move_count(), 0);
        assert_eq!(round.current_mark(), Mark::X);
        assert_eq!(round.status(), GameStatus::InProgress);
        assert_eq!(round.last_move(), None);
    }
}
