use tictactoe_common::tictactoe::{
    Board, GameMode, GameRound, Mark, RoundResult, ScoreTally, SessionSettings,
};

const ROW_SEPARATOR: &str = "---+---+---";

/// Draws the grid. Empty cells show the key that claims them (index + 1).
pub fn render_board(board: &Board) -> String {
    let rows: Vec<String> = board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            let symbols: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(col, mark)| match mark {
                    Mark::Empty => format!(" {} ", row * 3 + col + 1),
                    _ => format!(" {} ", mark.symbol()),
                })
                .collect();
            symbols.join("|")
        })
        .collect();

    let mut out = rows.join(&format!("\n{}\n", ROW_SEPARATOR));
    out.push('\n');
    out
}

pub struct ScoreLabels {
    pub player: String,
    pub opponent: String,
}

impl ScoreLabels {
    pub fn from_settings(settings: &SessionSettings) -> Self {
        let human = settings.human_mark;
        let other = human.opponent().unwrap_or(Mark::O);
        match settings.mode {
            GameMode::HumanVsComputer => Self {
                player: format!("{} (YOU)", human),
                opponent: format!("{} (CPU)", other),
            },
            GameMode::HumanVsHuman => Self {
                player: format!("{} (P1)", human),
                opponent: format!("{} (P2)", other),
            },
        }
    }
}

pub fn render_scoreboard(scores: &ScoreTally, labels: &ScoreLabels) -> String {
    format!(
        "{}: {}  |  TIES: {}  |  {}: {}",
        labels.player, scores.player_wins, scores.ties, labels.opponent, scores.opponent_wins
    )
}

pub fn render_outcome(round: &GameRound, settings: &SessionSettings) -> Option<String> {
    let result = round.status().result()?;
    let text = match result {
        RoundResult::Draw => "ROUND TIED".to_string(),
        RoundResult::Win(mark) => {
            let headline = match settings.mode {
                GameMode::HumanVsComputer if mark == settings.human_mark => "YOU WON!",
                GameMode::HumanVsComputer => "OH NO, YOU LOST...",
                GameMode::HumanVsHuman => "",
            };
            let line = round
                .winning_line()
                .map(|line| {
                    let keys: Vec<String> = line.cells.iter().map(|i| (i + 1).to_string()).collect();
                    format!(" (line {})", keys.join("-"))
                })
                .unwrap_or_default();
            format!("{} {} TAKES THE ROUND{}", headline, mark, line)
                .trim_start()
                .to_string()
        }
    };
    Some(text)
}
