use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{Validate, validate_probability};
use crate::engine::SessionRng;
use super::board::{Board, CENTER};
use super::game_state::GameRound;
use super::hard::{calculate_hard_move, find_winning_move};
use super::minimax::calculate_minimax_move;
use super::types::Mark;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Random,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Random,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Random => "random",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown difficulty '{}', expected one of random, easy, medium, hard",
                    s
                )
            })
    }
}

/// How the hard tier picks its move. Both never lose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardSearch {
    Heuristic,
    Minimax,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotTuning {
    /// Chance that the easy tier looks for its own winning move.
    pub easy_win_chance: f64,
    /// Chance that the medium tier ignores everything and plays randomly.
    pub medium_mistake_chance: f64,
    pub hard_search: HardSearch,
}

impl Default for BotTuning {
    fn default() -> Self {
        Self {
            easy_win_chance: 0.20,
            medium_mistake_chance: 0.25,
            hard_search: HardSearch::Heuristic,
        }
    }
}

impl Validate for BotTuning {
    fn validate(&self) -> Result<(), String> {
        validate_probability("easy_win_chance", self.easy_win_chance)?;
        validate_probability("medium_mistake_chance", self.medium_mistake_chance)?;
        Ok(())
    }
}

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, current_mark: Mark) -> Self {
        Self {
            board,
            current_mark,
        }
    }

    pub fn from_round(round: &GameRound) -> Self {
        Self::new(*round.board(), round.current_mark())
    }
}

/// Picks a cell for `input.current_mark`. Returns `None` when the board has no
/// empty cell or the mark is `Empty`; a correctly run round never asks then.
pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    tuning: &BotTuning,
    rng: &mut SessionRng,
) -> Option<usize> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;
    let board = &input.board;

    if !board.has_empty_cell() {
        return None;
    }

    match difficulty {
        Difficulty::Random => calculate_random_move(board, rng),
        Difficulty::Easy => calculate_easy_move(board, bot_mark, opponent_mark, tuning, rng),
        Difficulty::Medium => calculate_medium_move(board, bot_mark, opponent_mark, tuning, rng),
        Difficulty::Hard => match tuning.hard_search {
            HardSearch::Heuristic => calculate_hard_move(board, bot_mark, opponent_mark, rng),
            HardSearch::Minimax => calculate_minimax_move(board, bot_mark),
        },
    }
}

pub(crate) fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    let available_moves: Vec<usize> = board.empty_cells().collect();
    rng.choose(&available_moves)
}

fn calculate_easy_move(
    board: &Board,
    bot_mark: Mark,
    opponent_mark: Mark,
    tuning: &BotTuning,
    rng: &mut SessionRng,
) -> Option<usize> {
    if let Some(index) = find_winning_move(board, opponent_mark) {
        return Some(index);
    }

    if rng.chance(tuning.easy_win_chance)
        && let Some(index) = find_winning_move(board, bot_mark)
    {
        return Some(index);
    }

    calculate_random_move(board, rng)
}

fn calculate_medium_move(
    board: &Board,
    bot_mark: Mark,
    opponent_mark: Mark,
    tuning: &BotTuning,
    rng: &mut SessionRng,
) -> Option<usize> {
    if rng.chance(tuning.medium_mistake_chance) {
        return calculate_random_move(board, rng);
    }

    find_winning_move(board, bot_mark)
        .or_else(|| find_winning_move(board, opponent_mark))
        .or_else(|| board.is_empty_at(CENTER).then_some(CENTER))
        .or_else(|| calculate_random_move(board, rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn tuning_with(easy_win_chance: f64, medium_mistake_chance: f64) -> BotTuning {
        BotTuning {
            easy_win_chance,
            medium_mistake_chance,
            ..BotTuning::default()
        }
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_no_move_on_full_board_or_empty_mark() {
        let mut rng = SessionRng::new(0);
        let tuning = BotTuning::default();
        let full = BotInput::new(board("xoxxoooxx"), Mark::X);
        for difficulty in Difficulty::ALL {
            assert_eq!(calculate_move(difficulty, &full, &tuning, &mut rng), None);
        }
        let no_mark = BotInput::new(Board::new(), Mark::Empty);
        assert_eq!(calculate_move(Difficulty::Random, &no_mark, &tuning, &mut rng), None);
    }

    #[test]
    fn test_every_tier_picks_an_empty_cell_and_leaves_board_alone() {
        let positions = [".........", "x...o....", "xx.o.....", "xoxoxo...", "xoxxoo.x."];
        for tuning in [
            BotTuning::default(),
            BotTuning {
                hard_search: HardSearch::Minimax,
                ..BotTuning::default()
            },
        ] {
            for seed in 0..20 {
                let mut rng = SessionRng::new(seed);
                for position in positions {
                    let before = board(position);
                    let current_mark = if before.count(Mark::X) > before.count(Mark::O) {
                        Mark::O
                    } else {
                        Mark::X
                    };
                    let input = BotInput::new(before, current_mark);
                    for difficulty in Difficulty::ALL {
                        let index = calculate_move(difficulty, &input, &tuning, &mut rng).unwrap();
                        assert!(before.is_empty_at(index), "{} chose {} on {}", difficulty, index, position);
                        assert_eq!(input.board, before);
                    }
                }
            }
        }
    }

    #[test]
    fn test_easy_always_blocks() {
        let input = BotInput::new(board("xx.o....."), Mark::O);
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let index = calculate_move(Difficulty::Easy, &input, &BotTuning::default(), &mut rng);
            assert_eq!(index, Some(2));
        }
    }

    #[test]
    fn test_easy_takes_win_only_when_lucky() {
        // O can win at 8; X has no immediate threat.
        let input = BotInput::new(board("ox..o.x.."), Mark::O);
        let mut rng = SessionRng::new(11);
        assert_eq!(
            calculate_move(Difficulty::Easy, &input, &tuning_with(1.0, 0.0), &mut rng),
            Some(8)
        );

        let mut missed = false;
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let index = calculate_move(Difficulty::Easy, &input, &tuning_with(0.0, 0.0), &mut rng);
            if index != Some(8) {
                missed = true;
            }
        }
        assert!(missed);
    }

    #[test]
    fn test_medium_without_mistakes() {
        let tuning = tuning_with(0.0, 0.0);
        let mut rng = SessionRng::new(5);

        let win_over_block = BotInput::new(board("xx.oo...."), Mark::O);
        assert_eq!(calculate_move(Difficulty::Medium, &win_over_block, &tuning, &mut rng), Some(5));

        let block = BotInput::new(board("xx.o....."), Mark::O);
        assert_eq!(calculate_move(Difficulty::Medium, &block, &tuning, &mut rng), Some(2));

        let center = BotInput::new(board("x........"), Mark::O);
        assert_eq!(calculate_move(Difficulty::Medium, &center, &tuning, &mut rng), Some(CENTER));
    }

    #[test]
    fn test_medium_always_mistaken_is_random() {
        let tuning = tuning_with(0.0, 1.0);
        let input = BotInput::new(board("x........"), Mark::O);
        let mut seen_other = false;
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            if calculate_move(Difficulty::Medium, &input, &tuning, &mut rng) != Some(CENTER) {
                seen_other = true;
            }
        }
        assert!(seen_other);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let input = BotInput::new(board("x...o...."), Mark::X);
        let tuning = BotTuning::default();
        for difficulty in Difficulty::ALL {
            let a = calculate_move(difficulty, &input, &tuning, &mut SessionRng::new(99));
            let b = calculate_move(difficulty, &input, &tuning, &mut SessionRng::new(99));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_tuning_validation() {
        assert!(BotTuning::default().validate().is_ok());
        assert!(tuning_with(1.5, 0.0).validate().is_err());
        assert!(tuning_with(0.0, -0.1).validate().is_err());
        assert!(tuning_with(f64::NAN, 0.0).validate().is_err());
    }
}
