use std::convert::Infallible;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::{Lane, PlayerId, Side};
use crate::map::Field;
use crate::params::Params;

/// Paddle length preset, scales `Params::PADDLE_BASE_HEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaddleLength {
    Short,
    #[default]
    Normal,
    Long,
}

impl PaddleLength {
    pub fn factor(self) -> f32 {
        match self {
            PaddleLength::Short => 0.5,
            PaddleLength::Normal => 1.0,
            PaddleLength::Long => 1.33,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaddleLength::Short => "short",
            PaddleLength::Normal => "normal",
            PaddleLength::Long => "long",
        }
    }
}

impl FromStr for PaddleLength {
    type Err = Infallible;

    /// Unknown values fall back to `Normal`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "short" => PaddleLength::Short,
            "long" => PaddleLength::Long,
            _ => PaddleLength::Normal,
        })
    }
}

/// Ball size preset, scales `Params::BALL_BASE_RADIUS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BallSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl BallSize {
    pub fn factor(self) -> f32 {
        match self {
            BallSize::Small => 0.75,
            BallSize::Normal => 1.0,
            BallSize::Large => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BallSize::Small => "small",
            BallSize::Normal => "normal",
            BallSize::Large => "large",
        }
    }
}

impl FromStr for BallSize {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "small" => BallSize::Small,
            "large" => BallSize::Large,
            _ => BallSize::Normal,
        })
    }
}

/// Ball speed preset, scales `Params::BALL_BASE_SPEED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BallSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl BallSpeed {
    pub fn factor(self) -> f32 {
        match self {
            BallSpeed::Slow => 0.6,
            BallSpeed::Normal => 1.0,
            BallSpeed::Fast => 1.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BallSpeed::Slow => "slow",
            BallSpeed::Normal => "normal",
            BallSpeed::Fast => "fast",
        }
    }
}

impl FromStr for BallSpeed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "slow" => BallSpeed::Slow,
            "fast" => BallSpeed::Fast,
            _ => BallSpeed::Normal,
        })
    }
}

impl From<String> for PaddleLength {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<PaddleLength> for String {
    fn from(p: PaddleLength) -> Self {
        p.as_str().to_string()
    }
}

impl From<String> for BallSize {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<BallSize> for String {
    fn from(p: BallSize) -> Self {
        p.as_str().to_string()
    }
}

impl From<String> for BallSpeed {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<BallSpeed> for String {
    fn from(p: BallSpeed) -> Self {
        p.as_str().to_string()
    }
}

/// Clamp a requested win threshold into the supported range.
///
/// Anything outside `MIN_WIN_SCORE..=MAX_WIN_SCORE` falls back to
/// `Params::WIN_SCORE` rather than erroring.
pub fn sanitize_win_score(requested: i64) -> u8 {
    let range = Params::MIN_WIN_SCORE as i64..=Params::MAX_WIN_SCORE as i64;
    if range.contains(&requested) {
        requested as u8
    } else {
        Params::WIN_SCORE
    }
}

/// Number of paddles in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    TwoPlayer,
    FourPlayer,
}

impl Topology {
    pub fn players(self) -> &'static [PlayerId] {
        match self {
            Topology::TwoPlayer => &[PlayerId::ONE, PlayerId::TWO],
            Topology::FourPlayer => {
                &[PlayerId::ONE, PlayerId::TWO, PlayerId::THREE, PlayerId::FOUR]
            }
        }
    }

    pub fn contains(self, player: PlayerId) -> bool {
        self.players().contains(&player)
    }
}

/// Match settings as chosen by the player (presets, not numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub topology: Topology,
    pub paddle_length: PaddleLength,
    pub ball_size: BallSize,
    pub ball_speed: BallSpeed,
    pub win_score: u8,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            topology: Topology::TwoPlayer,
            paddle_length: PaddleLength::Normal,
            ball_size: BallSize::Normal,
            ball_speed: BallSpeed::Normal,
            win_score: Params::WIN_SCORE,
        }
    }
}

/// Numeric match configuration derived from `MatchSettings`
#[derive(Debug, Clone)]
pub struct Config {
    pub topology: Topology,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_rated_speed: f32,
    pub win_score: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_settings(&MatchSettings::default())
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &MatchSettings) -> Self {
        Self {
            topology: settings.topology,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_BASE_HEIGHT * settings.paddle_length.factor(),
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_BASE_RADIUS * settings.ball_size.factor(),
            ball_rated_speed: Params::BALL_BASE_SPEED * settings.ball_speed.factor(),
            win_score: sanitize_win_score(settings.win_score as i64),
        }
    }

    /// Config for a match played on `field` instead of the default field.
    ///
    /// Gives the same numbers as starting on the default field and then
    /// resizing to `field`.
    pub fn for_field(settings: &MatchSettings, field: &Field) -> Self {
        Self::from_settings(settings).scaled(Field::default().scale_to(field))
    }

    /// Rescale sizes and speeds by a field ratio. Speeds follow the width
    /// ratio so crossing time is unchanged.
    pub fn scaled(mut self, ratio: Vec2) -> Self {
        self.paddle_width *= ratio.x;
        self.paddle_height *= ratio.y;
        self.paddle_speed *= ratio.y;
        self.ball_radius *= ratio.x.min(ratio.y);
        self.ball_rated_speed *= ratio.x;
        self
    }

    pub fn serve_speed(&self) -> f32 {
        self.ball_rated_speed * Params::SERVE_SPEED_FACTOR
    }

    /// Get X position for a paddle based on its side and lane.
    /// Insets grow and shrink with the field width.
    pub fn paddle_x(&self, player: PlayerId, field: &Field) -> f32 {
        let inset = match player.lane() {
            Lane::Outer => Params::PADDLE_MARGIN,
            Lane::Inner => Params::PADDLE_MARGIN + Params::INNER_LANE_OFFSET,
        };
        let inset = inset * field.width / Params::FIELD_WIDTH;
        match player.side() {
            Side::Left => inset,
            Side::Right => field.width - inset,
        }
    }
}
