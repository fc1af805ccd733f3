use serde::{Deserialize, Serialize};

use crate::components::{Direction, PlayerId, Side};

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,  // Left side score
    pub right: u8, // Right side score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Final outcome handed to the match-ended subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Side,
    pub score_left: u8,
    pub score_right: u8,
}

impl MatchResult {
    pub fn winner_score(&self) -> u8 {
        match self.winner {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }

    pub fn loser_score(&self) -> u8 {
        match self.winner {
            Side::Left => self.score_right,
            Side::Right => self.score_left,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// How the ball met a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleHit {
    /// Regular bounce off the face, re-aimed by hit offset
    Face,
    /// Recovery bounce after clipping a corner or the back
    Edge,
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub ball_hit_paddle: Option<(PlayerId, PaddleHit)>,
    pub ball_hit_wall: bool,
    pub ball_reset: bool,
    pub match_ended: Option<MatchResult>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Paddle intents queued for the next tick
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    pub intents: Vec<(PlayerId, Direction)>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    /// Queue an intent; a later intent for the same player replaces the earlier one
    pub fn push_intent(&mut self, player: PlayerId, dir: Direction) {
        if let Some(slot) = self.intents.iter_mut().find(|(p, _)| *p == player) {
            slot.1 = dir;
        } else {
            self.intents.push((player, dir));
        }
    }

    pub fn pop_intents(&mut self) -> Vec<(PlayerId, Direction)> {
        std::mem::take(&mut self.intents)
    }
}
