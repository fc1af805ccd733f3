use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::Params;

/// AI skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = Infallible;

    /// Unknown values fall back to `Medium`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        })
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing and skill knobs for one AI controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub difficulty: Difficulty,
    /// Delay between choosing a target and acting on it
    pub reaction_ms: u64,
    /// 1.0 predicts the ball path exactly, lower values add noise
    pub accuracy: f32,
    /// Chance per decision to aim deliberately off target
    pub miss_rate: f32,
    pub decision_interval_ms: u64,
    pub move_interval_ms: u64,
}

impl AiProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (reaction_ms, accuracy, miss_rate) = match difficulty {
            Difficulty::Easy => (450, 0.55, 0.25),
            Difficulty::Medium => (250, 0.8, 0.1),
            Difficulty::Hard => (100, 0.95, 0.03),
        };
        Self::custom(difficulty, reaction_ms, accuracy, miss_rate)
    }

    /// Build a profile with explicit knobs; accuracy and miss rate are clamped to 0..=1
    pub fn custom(difficulty: Difficulty, reaction_ms: u64, accuracy: f32, miss_rate: f32) -> Self {
        Self {
            difficulty,
            reaction_ms,
            accuracy: clamp_unit(accuracy),
            miss_rate: clamp_unit(miss_rate),
            decision_interval_ms: Params::AI_DECISION_INTERVAL_MS,
            move_interval_ms: Params::AI_MOVE_INTERVAL_MS,
        }
    }
}

impl From<Difficulty> for AiProfile {
    fn from(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty)
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
