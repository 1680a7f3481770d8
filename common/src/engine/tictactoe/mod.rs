mod board;
mod bot_controller;
mod game_state;
mod hard;
mod minimax;
mod score;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, CELL_COUNT, CENTER, CORNERS};
pub use bot_controller::{BotInput, BotTuning, Difficulty, HardSearch, calculate_move};
pub use game_state::GameRound;
pub use hard::{find_fork_moves, find_winning_move};
pub use minimax::calculate_minimax_move;
pub use score::ScoreTally;
pub use session::{GameSession, TurnState};
pub use settings::{DelayRange, GameMode, SessionSettings, ThinkDelaySettings};
pub use types::{GameStatus, Mark, MoveOutcome, RoundResult, WinningLine};
pub use win_detector::{LINE_PATTERNS, check_win, check_win_with_line, has_win, is_draw};
