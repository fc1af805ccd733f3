//! Frame protocol between a match host and whatever renders it
//!
//! Uses postcard for compact binary serialization

use postcard::{from_bytes, to_allocvec};

/// Match status as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FrameStatus {
    Waiting,
    Playing,
    Paused,
    Finished,
}

/// One paddle inside a frame
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaddleFrame {
    pub player: u8, // 1..=4
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSnapshot {
    pub tick: u32,
    pub status: FrameStatus,
    pub field_width: f32,
    pub field_height: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub ball_radius: f32,
    pub paddles: Vec<PaddleFrame>,
    pub score_left: u8,
    pub score_right: u8,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HostMessage {
    /// Rendered after every frame tick
    Frame(FrameSnapshot),

    /// Sent once when a side reaches the win score
    MatchEnded {
        winner: u8, // 0 = left, 1 = right
        score_left: u8,
        score_right: u8,
    },
}

impl HostMessage {
    /// Serialize message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
