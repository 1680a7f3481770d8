use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::engine::SessionRng;
use super::bot_controller::{BotTuning, Difficulty};
use super::types::Mark;

const MAX_THINK_DELAY_MS: u64 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    HumanVsHuman,
    HumanVsComputer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "human-vs-human",
            GameMode::HumanVsComputer => "human-vs-computer",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human-vs-human" | "hvh" | "pvp" => Ok(GameMode::HumanVsHuman),
            "human-vs-computer" | "hvc" | "cpu" => Ok(GameMode::HumanVsComputer),
            other => Err(format!(
                "Unknown game mode '{}', expected human-vs-human or human-vs-computer",
                other
            )),
        }
    }
}

/// Inclusive millisecond range the computer "thinks" before moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub fn sample(&self, rng: &mut SessionRng) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }
}

impl Validate for DelayRange {
    fn validate(&self) -> Result<(), String> {
        if self.min_ms > self.max_ms {
            return Err(format!(
                "think delay min_ms ({}) must not exceed max_ms ({})",
                self.min_ms, self.max_ms
            ));
        }
        if self.max_ms > MAX_THINK_DELAY_MS {
            return Err(format!(
                "think delay max_ms must not exceed {}",
                MAX_THINK_DELAY_MS
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkDelaySettings {
    pub random: DelayRange,
    pub easy: DelayRange,
    pub medium: DelayRange,
    pub hard: DelayRange,
}

impl ThinkDelaySettings {
    pub fn none() -> Self {
        let zero = DelayRange::new(0, 0);
        Self {
            random: zero,
            easy: zero,
            medium: zero,
            hard: zero,
        }
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> DelayRange {
        match difficulty {
            Difficulty::Random => self.random,
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for ThinkDelaySettings {
    fn default() -> Self {
        Self {
            random: DelayRange::new(600, 1600),
            easy: DelayRange::new(400, 1000),
            medium: DelayRange::new(600, 1600),
            hard: DelayRange::new(800, 2000),
        }
    }
}

impl Validate for ThinkDelaySettings {
    fn validate(&self) -> Result<(), String> {
        for difficulty in Difficulty::ALL {
            self.for_difficulty(difficulty)
                .validate()
                .map_err(|e| format!("{} tier: {}", difficulty, e))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub human_mark: Mark,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    #[serde(default)]
    pub bot: BotTuning,
    #[serde(default)]
    pub think_delay: ThinkDelaySettings,
}

impl SessionSettings {
    pub fn computer_mark(&self) -> Option<Mark> {
        match self.mode {
            GameMode::HumanVsComputer => self.human_mark.opponent(),
            GameMode::HumanVsHuman => None,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            difficulty: Difficulty::Medium,
            mode: GameMode::HumanVsComputer,
            bot: BotTuning::default(),
            think_delay: ThinkDelaySettings::default(),
        }
    }
}

impl Validate for SessionSettings {
    fn validate(&self) -> Result<(), String> {
        if self.human_mark == Mark::Empty {
            return Err("human_mark must be x or o".to_string());
        }
        self.bot.validate()?;
        self.think_delay.validate()?;
        Ok(())
    }
}
