use serde::{Deserialize, Serialize};

use crate::components::{Ball, Paddle, PlayerId};
use crate::engine::MatchStatus;
use crate::map::Field;
use crate::resources::{MatchResult, Score};

/// Read-only copy of a match at one tick.
///
/// Everything is held by value, so a snapshot never aliases the live
/// match and can be handed to renderers or AI controllers freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub status: MatchStatus,
    pub field: Field,
    pub ball: Ball,
    pub paddles: Vec<Paddle>,
    pub score: Score,
    pub win_score: u8,
    pub winner: Option<crate::components::Side>,
}

impl MatchSnapshot {
    pub fn paddle(&self, player: PlayerId) -> Option<&Paddle> {
        self.paddles.iter().find(|p| p.player == player)
    }

    pub fn is_playing(&self) -> bool {
        self.status == MatchStatus::Playing
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.winner.map(|winner| MatchResult {
            winner,
            score_left: self.score.left,
            score_right: self.score.right,
        })
    }
}
