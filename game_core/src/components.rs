use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::map::{Aabb, Field};
use crate::params::Params;

/// Half of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// X direction a ball travels after leaving this side's paddles
    pub fn facing(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Paddle lane on a side. Only the 4-player topology uses `Inner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Outer,
    Inner,
}

/// Player slot, 1..=4. Odd ids play on the left, even ids on the right;
/// 1/2 are the outer lane, 3/4 the inner lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(1);
    pub const TWO: PlayerId = PlayerId(2);
    pub const THREE: PlayerId = PlayerId(3);
    pub const FOUR: PlayerId = PlayerId(4);

    pub fn new(id: u8) -> Option<Self> {
        (1..=4).contains(&id).then_some(PlayerId(id))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn side(self) -> Side {
        if self.0 % 2 == 1 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn lane(self) -> Lane {
        if self.0 <= 2 {
            Lane::Outer
        } else {
            Lane::Inner
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Logical paddle input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Stop,
}

impl Direction {
    /// Sign along the Y axis (Y grows downward)
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
            Direction::Stop => 0.0,
        }
    }

    /// Combine two held keys; pressing both cancels out
    pub fn from_keys(up: bool, down: bool) -> Self {
        match (up, down) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::Stop,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub player: PlayerId,
    pub x: f32, // fixed per side
    pub y: f32, // center, clamped to [min_y, max_y]
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Paddle {
    pub fn new(
        player: PlayerId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        speed: f32,
        field: &Field,
    ) -> Self {
        let mut paddle = Self {
            player,
            x,
            y,
            width,
            height,
            speed,
            min_y: 0.0,
            max_y: 0.0,
        };
        paddle.fit_to(field);
        paddle
    }

    pub fn side(&self) -> Side {
        self.player.side()
    }

    pub fn lane(&self) -> Lane {
        self.player.lane()
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// X of the face the ball bounces off (toward the field center)
    pub fn face_x(&self) -> f32 {
        self.x + self.side().facing() * self.width / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    /// Recompute vertical bounds for the field and re-clamp
    pub fn fit_to(&mut self, field: &Field) {
        let half = self.height / 2.0;
        self.min_y = half;
        self.max_y = (field.height - half).max(half);
        self.y = self.y.clamp(self.min_y, self.max_y);
    }

    /// Move by at most `speed * dt` in the given direction, clamped to bounds
    pub fn apply(&mut self, dir: Direction, dt: f32) {
        self.y = (self.y + dir.sign() * self.speed * dt).clamp(self.min_y, self.max_y);
    }
}

/// Ball component - the pong ball
///
/// `vel.length()` always equals `speed`. While `serving` is set the ball
/// travels at half its rated speed until it first meets a paddle face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub rated_speed: f32,
    pub serving: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, rated_speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            speed: 0.0,
            rated_speed,
            serving: true,
        }
    }

    pub fn serve_speed(&self) -> f32 {
        self.rated_speed * Params::SERVE_SPEED_FACTOR
    }

    /// Reset ball to `center` at serve speed, heading toward `toward`
    pub fn serve(&mut self, center: Vec2, toward: Side, rng: &mut crate::GameRng) {
        self.pos = center;
        self.serving = true;
        self.speed = self.serve_speed();

        let angle: f32 = rng
            .0
            .gen_range(-Params::MAX_SERVE_ANGLE..=Params::MAX_SERVE_ANGLE);
        let dir_x = -toward.facing();
        self.vel = Vec2::new(dir_x * angle.cos(), angle.sin()) * self.speed;
    }

    /// Set a new heading keeping the current speed
    pub fn aim(&mut self, dir_x: f32, angle: f32) {
        self.vel = Vec2::new(dir_x * angle.cos(), angle.sin()) * self.speed;
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: Direction,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}
