use tictactoe_common::SessionRng;
use tictactoe_common::log;
use tictactoe_common::tictactoe::{
    BotInput, BotTuning, Board, Difficulty, GameRound, Mark, RoundResult, ScoreTally,
    calculate_move, check_win,
};

/// Plays `round` to the end with `choose` picking every move. Stops early and
/// returns `None` when a chooser has no move or picks a move the round rejects.
fn play_out<F>(round: &mut GameRound, mut choose: F) -> Option<RoundResult>
where
    F: FnMut(&BotInput) -> Option<usize>,
{
    while !round.is_over() {
        let input = BotInput::from_round(round);
        let index = choose(&input)?;
        if !round.apply_move(index, input.current_mark).accepted {
            log!("{} picked rejected cell {}, abandoning round", input.current_mark, index);
            return None;
        }
    }
    round.status().result()
}

/// Plays `games` computer-vs-computer rounds. The tally is seen from X's side.
pub fn simulate_games(
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    games: u32,
    tuning: &BotTuning,
    rng: &mut SessionRng,
) -> ScoreTally {
    let mut tally = ScoreTally::default();
    let mut round = GameRound::new();

    for game in 0..games {
        round.reset();
        let result = play_out(&mut round, |input| {
            let difficulty = match input.current_mark {
                Mark::X => x_difficulty,
                _ => o_difficulty,
            };
            calculate_move(difficulty, input, tuning, rng)
        });

        if let Some(result) = result {
            tally.record(result, Mark::X);
        }
        if (game + 1) % 1000 == 0 {
            log!("Simulated {} of {} games", game + 1, games);
        }
    }

    tally
}

/// The cell the given tier would play for `mark` on `board`.
pub fn suggest_move(
    board: &Board,
    mark: Mark,
    difficulty: Difficulty,
    tuning: &BotTuning,
    rng: &mut SessionRng,
) -> Result<usize, String> {
    if let Some(winner) = check_win(board) {
        return Err(format!("Board is already won by {}", winner));
    }
    if board.is_full() {
        return Err("Board is full".to_string());
    }
    calculate_move(difficulty, &BotInput::new(*board, mark), tuning, rng)
        .ok_or_else(|| format!("No move available for {}", mark))
}
