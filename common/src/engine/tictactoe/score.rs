use super::types::{Mark, RoundResult};

/// Results across rounds, seen from the player's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub player_wins: u32,
    pub opponent_wins: u32,
    pub ties: u32,
}

impl ScoreTally {
    pub fn record(&mut self, result: RoundResult, player_mark: Mark) {
        match result {
            RoundResult::Draw => self.ties += 1,
            RoundResult::Win(mark) if mark == player_mark => self.player_wins += 1,
            RoundResult::Win(_) => self.opponent_wins += 1,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.player_wins + self.opponent_wins + self.ties
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_player_side() {
        let mut tally = ScoreTally::default();
        tally.record(RoundResult::Win(Mark::O), Mark::O);
        tally.record(RoundResult::Win(Mark::X), Mark::O);
        tally.record(RoundResult::Draw, Mark::O);
        tally.record(RoundResult::Draw, Mark::O);
        assert_eq!(
            tally,
            ScoreTally {
                player_wins: 1,
                opponent_wins: 1,
                ties: 2
            }
        );
        assert_eq!(tally.rounds_played(), 4);
        tally.reset();
        assert_eq!(tally.rounds_played(), 0);
    }
}
