use std::cell::RefCell;
use std::rc::Rc;

use game_core::{MatchResult, MatchSnapshot, MatchStatus, Side};
use proto::{FrameSnapshot, FrameStatus, HostMessage, PaddleFrame};

use crate::error::Result;

/// Receiver of encoded host messages (a renderer, a socket, a recorder)
pub trait FrameSink {
    fn send_bytes(&self, bytes: &[u8]) -> Result<()>;
}

/// Keeps every message it receives. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }

    /// Decode everything received so far, skipping undecodable payloads
    pub fn messages(&self) -> Vec<HostMessage> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|bytes| HostMessage::from_bytes(bytes).ok())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.borrow_mut().clear();
    }
}

impl FrameSink for RecordingSink {
    fn send_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.sent.borrow_mut().push(bytes.to_vec());
        Ok(())
    }
}

pub fn frame_message(snapshot: &MatchSnapshot) -> HostMessage {
    let status = match snapshot.status {
        MatchStatus::Waiting => FrameStatus::Waiting,
        MatchStatus::Playing => FrameStatus::Playing,
        MatchStatus::Paused => FrameStatus::Paused,
        MatchStatus::Finished => FrameStatus::Finished,
    };

    HostMessage::Frame(FrameSnapshot {
        tick: snapshot.tick as u32,
        status,
        field_width: snapshot.field.width,
        field_height: snapshot.field.height,
        ball_x: snapshot.ball.pos.x,
        ball_y: snapshot.ball.pos.y,
        ball_vx: snapshot.ball.vel.x,
        ball_vy: snapshot.ball.vel.y,
        ball_radius: snapshot.ball.radius,
        paddles: snapshot
            .paddles
            .iter()
            .map(|p| PaddleFrame {
                player: p.player.get(),
                x: p.x,
                y: p.y,
                height: p.height,
            })
            .collect(),
        score_left: snapshot.score.left,
        score_right: snapshot.score.right,
    })
}

pub fn match_ended_message(result: &MatchResult) -> HostMessage {
    HostMessage::MatchEnded {
        winner: match result.winner {
            Side::Left => 0,
            Side::Right => 1,
        },
        score_left: result.score_left,
        score_right: result.score_right,
    }
}
