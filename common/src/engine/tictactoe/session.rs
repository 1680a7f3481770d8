use std::time::Duration;

use crate::engine::SessionRng;
use crate::log;
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::GameRound;
use super::score::ScoreTally;
use super::settings::{GameMode, SessionSettings};
use super::types::{Mark, MoveOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    AwaitingHumanMove,
    AwaitingOpponentMove,
    RoundOver,
}

/// Owns the running round and the score tally for one player's session.
pub struct GameSession {
    settings: SessionSettings,
    round: GameRound,
    scores: ScoreTally,
    rng: SessionRng,
    round_number: u32,
}

impl GameSession {
    pub fn new(settings: SessionSettings, rng: SessionRng) -> Self {
        Self {
            settings,
            round: GameRound::new(),
            scores: ScoreTally::default(),
            rng,
            round_number: 1,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn round(&self) -> &GameRound {
        &self.round
    }

    pub fn scores(&self) -> ScoreTally {
        self.scores
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn turn_state(&self) -> TurnState {
        if self.round.is_over() {
            return TurnState::RoundOver;
        }
        match self.settings.computer_mark() {
            Some(mark) if mark == self.round.current_mark() => TurnState::AwaitingOpponentMove,
            _ => TurnState::AwaitingHumanMove,
        }
    }

    /// Mark the human at the keyboard plays now. In human-vs-human mode both
    /// marks are human.
    pub fn human_mark_to_move(&self) -> Option<Mark> {
        (self.turn_state() == TurnState::AwaitingHumanMove).then(|| self.round.current_mark())
    }

    pub fn human_move(&mut self, index: usize) -> MoveOutcome {
        let Some(mark) = self.human_mark_to_move() else {
            return MoveOutcome::rejected();
        };
        let outcome = self.round.apply_move(index, mark);
        self.after_move(index, mark, outcome);
        outcome
    }

    /// The opponent's choice for the current position, without applying it.
    pub fn compute_opponent_move(&mut self) -> Option<usize> {
        if self.turn_state() != TurnState::AwaitingOpponentMove {
            return None;
        }
        let input = BotInput::from_round(&self.round);
        calculate_move(self.settings.difficulty, &input, &self.settings.bot, &mut self.rng)
    }

    pub fn opponent_move(&mut self) -> Option<(usize, MoveOutcome)> {
        let index = self.compute_opponent_move()?;
        let mark = self.round.current_mark();
        let outcome = self.round.apply_move(index, mark);
        self.after_move(index, mark, outcome);
        Some((index, outcome))
    }

    /// Cosmetic pause before the opponent's move, drawn from the tier's range.
    pub fn think_delay(&mut self) -> Duration {
        self.settings
            .think_delay
            .for_difficulty(self.settings.difficulty)
            .sample(&mut self.rng)
    }

    /// Clears the board for the next round; the tally is kept.
    pub fn reset_round(&mut self) {
        self.round.reset();
        self.round_number += 1;
        log!("Round {} started", self.round_number);
    }

    /// Starts over with new settings and an empty tally.
    pub fn restart(&mut self, settings: SessionSettings) {
        log!(
            "Session restarted: {} as {}, difficulty {}",
            settings.mode,
            settings.human_mark,
            settings.difficulty
        );
        self.settings = settings;
        self.scores.reset();
        self.round.reset();
        self.round_number = 1;
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if mode == self.settings.mode {
            return;
        }
        let settings = SessionSettings {
            mode,
            ..self.settings.clone()
        };
        self.restart(settings);
    }

    fn after_move(&mut self, index: usize, mark: Mark, outcome: MoveOutcome) {
        if !outcome.accepted {
            return;
        }
        if let Some(result) = outcome.winner {
            self.scores.record(result, self.settings.human_mark);
            log!(
                "Round {} over after {} at {}: {}",
                self.round_number,
                mark,
                index,
                result
            );
        }
    }
}
