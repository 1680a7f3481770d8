mod board_view;

pub use board_view::{render_board, render_outcome, render_scoreboard, ScoreLabels};
