use std::io::Write;

use tokio::io::{AsyncBufRead, Lines};
use tokio::time::Instant;
use tictactoe_common::log;
use tictactoe_common::tictactoe::{CELL_COUNT, GameSession, TurnState};

use crate::ui::{ScoreLabels, render_board, render_outcome, render_scoreboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerCommand {
    Cell(usize),
    NextRound,
    RestartRound,
    Quit,
    Help,
    Unknown,
}

fn parse_command(line: &str) -> PlayerCommand {
    let trimmed = line.trim().to_ascii_lowercase();
    if let Ok(key) = trimmed.parse::<usize>() {
        return match key {
            1..=CELL_COUNT => PlayerCommand::Cell(key - 1),
            _ => PlayerCommand::Unknown,
        };
    }
    match trimmed.as_str() {
        "n" | "next" => PlayerCommand::NextRound,
        "r" | "restart" => PlayerCommand::RestartRound,
        "q" | "quit" | "exit" => PlayerCommand::Quit,
        "h" | "help" | "?" => PlayerCommand::Help,
        _ => PlayerCommand::Unknown,
    }
}

const HELP: &str = "Keys 1-9 claim a cell (top-left is 1). n: next round, r: restart round, q: quit.";

fn write_out<W: Write>(out: &mut W, text: &str) -> Result<(), String> {
    writeln!(out, "{}", text).map_err(|e| format!("Failed to write to terminal: {}", e))
}

fn show_position<W: Write>(out: &mut W, session: &GameSession, labels: &ScoreLabels) -> Result<(), String> {
    write_out(out, &render_board(session.round().board()))?;
    if let Some(outcome) = render_outcome(session.round(), session.settings()) {
        write_out(out, &outcome)?;
        write_out(out, &render_scoreboard(&session.scores(), labels))?;
        write_out(out, "Press n for the next round or q to quit.")?;
    }
    Ok(())
}

fn play_opponent_move<W: Write>(out: &mut W, session: &mut GameSession, labels: &ScoreLabels) -> Result<(), String> {
    if let Some((index, _)) = session.opponent_move() {
        write_out(out, &format!("Computer plays {}", index + 1))?;
    }
    show_position(out, session, labels)
}

async fn next_line<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> Result<Option<String>, String> {
    lines
        .next_line()
        .await
        .map_err(|e| format!("Failed to read input: {}", e))
}

/// Plays rounds until the player quits or input ends. The computer's move
/// waits out the thinking delay; only a round restart or quit cancels it.
pub async fn run_tictactoe_game<R, W>(
    session: &mut GameSession,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let labels = ScoreLabels::from_settings(session.settings());
    log!(
        "Starting {} game as {} on {} (seed {})",
        session.settings().mode,
        session.settings().human_mark,
        session.settings().difficulty,
        session.seed()
    );

    write_out(out, HELP)?;
    write_out(out, &render_scoreboard(&session.scores(), &labels))?;
    write_out(out, &render_board(session.round().board()))?;

    // Drawn once per computer turn; input other than restart or quit leaves it alone.
    let mut deadline: Option<Instant> = None;

    loop {
        if session.turn_state() == TurnState::AwaitingOpponentMove {
            let until = match deadline {
                Some(until) => until,
                None => {
                    let delay = session.think_delay();
                    if delay.is_zero() {
                        play_opponent_move(out, session, &labels)?;
                        continue;
                    }
                    write_out(out, "Computer is thinking...")?;
                    let until = Instant::now() + delay;
                    deadline = Some(until);
                    until
                }
            };

            tokio::select! {
                _ = tokio::time::sleep_until(until) => {
                    deadline = None;
                    play_opponent_move(out, session, &labels)?;
                }
                line = next_line(lines) => {
                    let Some(line) = line? else {
                        break;
                    };
                    match parse_command(&line) {
                        PlayerCommand::RestartRound => {
                            deadline = None;
                            session.reset_round();
                            write_out(out, "Round restarted.")?;
                            write_out(out, &render_board(session.round().board()))?;
                        }
                        PlayerCommand::Quit => break,
                        PlayerCommand::Help => write_out(out, HELP)?,
                        _ => write_out(out, "Wait for the computer to move.")?,
                    }
                }
            }
            continue;
        }

        let Some(line) = next_line(lines).await? else {
            break;
        };

        match parse_command(&line) {
            PlayerCommand::Cell(index) => {
                let mark = session.human_mark_to_move();
                let outcome = session.human_move(index);
                if !outcome.accepted {
                    continue;
                }
                if let Some(mark) = mark {
                    write_out(out, &format!("{} plays {}", mark, index + 1))?;
                }
                show_position(out, session, &labels)?;
            }
            PlayerCommand::NextRound => {
                if session.turn_state() == TurnState::RoundOver {
                    session.reset_round();
                    write_out(out, &format!("Round {}", session.round_number()))?;
                    write_out(out, &render_board(session.round().board()))?;
                }
            }
            PlayerCommand::RestartRound => {
                session.reset_round();
                write_out(out, "Round restarted.")?;
                write_out(out, &render_board(session.round().board()))?;
            }
            PlayerCommand::Quit => break,
            PlayerCommand::Help => write_out(out, HELP)?,
            PlayerCommand::Unknown => write_out(out, "Unknown input, press h for help.")?,
        }
    }

    write_out(out, &format!("Final score: {}", render_scoreboard(&session.scores(), &labels)))?;
    let settings = session.settings().clone();
    session.restart(settings);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tictactoe_common::SessionRng;
    use tictactoe_common::tictactoe::{
        DelayRange, Difficulty, GameMode, Mark, SessionSettings, ThinkDelaySettings,
    };

    fn session(human_mark: Mark, mode: GameMode) -> GameSession {
        GameSession::new(
            SessionSettings {
                human_mark,
                difficulty: Difficulty::Hard,
                mode,
                think_delay: ThinkDelaySettings::none(),
                ..SessionSettings::default()
            },
            SessionRng::new(42),
        )
    }

    async fn run(session: &mut GameSession, input: &'static str) -> String {
        let mut lines = BufReader::new(input.as_bytes()).lines();
        let mut out = Vec::new();
        run_tictactoe_game(session, &mut lines, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("5"), PlayerCommand::Cell(4));
        assert_eq!(parse_command(" 1 \n"), PlayerCommand::Cell(0));
        assert_eq!(parse_command("0"), PlayerCommand::Unknown);
        assert_eq!(parse_command("10"), PlayerCommand::Unknown);
        assert_eq!(parse_command("N"), PlayerCommand::NextRound);
        assert_eq!(parse_command("restart"), PlayerCommand::RestartRound);
        assert_eq!(parse_command("q"), PlayerCommand::Quit);
        assert_eq!(parse_command("?"), PlayerCommand::Help);
    }

    #[tokio::test]
    async fn test_human_vs_human_round_and_tally() {
        let mut session = session(Mark::X, GameMode::HumanVsHuman);
        let output = run(&mut session, "1\n4\n2\n5\n3\nq\n").await;
        assert!(output.contains("X TAKES THE ROUND (line 1-2-3)"));
        assert!(output.contains("Final score: X (P1): 1  |  TIES: 0  |  O (P2): 0"));
        // Quitting resets the tally.
        assert_eq!(session.scores().rounds_played(), 0);
    }

    #[tokio::test]
    async fn test_computer_answers_center_with_corner() {
        let mut session = session(Mark::X, GameMode::HumanVsComputer);
        let output = run(&mut session, "5\n").await;
        assert!(output.contains("X plays 5"));
        assert!(
            ["Computer plays 1", "Computer plays 3", "Computer plays 7", "Computer plays 9"]
                .iter()
                .any(|line| output.contains(line)),
            "{}",
            output
        );
    }

    #[tokio::test]
    async fn test_occupied_cell_is_ignored() {
        let mut session = session(Mark::X, GameMode::HumanVsHuman);
        let output = run(&mut session, "5\n5\n").await;
        assert_eq!(output.matches("plays 5").count(), 1);
    }

    #[tokio::test]
    async fn test_computer_opens_when_human_is_o() {
        let mut session = session(Mark::O, GameMode::HumanVsComputer);
        let output = run(&mut session, "").await;
        assert!(output.contains("Computer plays 5"));
    }

    #[tokio::test]
    async fn test_restart_cancels_pending_computer_move() {
        let mut session = GameSession::new(
            SessionSettings {
                human_mark: Mark::O,
                difficulty: Difficulty::Hard,
                mode: GameMode::HumanVsComputer,
                ..SessionSettings::default()
            },
            SessionRng::new(1),
        );
        let output = run(&mut session, "r\nq\n").await;
        assert!(output.contains("Round restarted."));
        assert!(!output.contains("Computer plays"));
    }

    #[tokio::test]
    async fn test_input_during_thinking_does_not_postpone_computer_move() {
        let fixed = DelayRange::new(60, 60);
        let mut session = GameSession::new(
            SessionSettings {
                human_mark: Mark::O,
                difficulty: Difficulty::Hard,
                mode: GameMode::HumanVsComputer,
                think_delay: ThinkDelaySettings {
                    random: fixed,
                    easy: fixed,
                    medium: fixed,
                    hard: fixed,
                },
                ..SessionSettings::default()
            },
            SessionRng::new(3),
        );

        let (reader, mut writer) = tokio::io::duplex(256);
        let typist = tokio::spawn(async move {
            for _ in 0..8 {
                writer.write_all(b"h\n").await.unwrap();
                tokio::time::sleep(Duration::from_millis(25)).await;
            }
            writer.write_all(b"q\n").await.unwrap();
        });

        let mut lines = BufReader::new(reader).lines();
        let mut out = Vec::new();
        run_tictactoe_game(&mut session, &mut lines, &mut out).await.unwrap();
        typist.await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Computer plays 5"), "{}", output);
        assert_eq!(output.matches("Computer is thinking...").count(), 1);
    }
}
