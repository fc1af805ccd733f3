use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_BASE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 420.0; // units per second
    pub const PADDLE_MARGIN: f32 = 20.0; // side wall to outer paddle center
    pub const INNER_LANE_OFFSET: f32 = 80.0; // outer to inner paddle (4 players)

    // Ball
    pub const BALL_BASE_RADIUS: f32 = 8.0;
    pub const BALL_BASE_SPEED: f32 = 480.0; // rated speed, units per second
    pub const SERVE_SPEED_FACTOR: f32 = 0.5;
    pub const MAX_BOUNCE_ANGLE: f32 = FRAC_PI_4;
    pub const MAX_SERVE_ANGLE: f32 = FRAC_PI_6;
    pub const EDGE_BOUNCE_DAMPING: f32 = 0.8;
    pub const EDGE_BOUNCE_JITTER: f32 = 60.0;

    // Score
    pub const WIN_SCORE: u8 = 5;
    pub const MIN_WIN_SCORE: u8 = 3;
    pub const MAX_WIN_SCORE: u8 = 10;

    // Physics
    pub const FIXED_DT: f32 = 1.0 / 60.0;

    // AI
    pub const AI_DECISION_INTERVAL_MS: u64 = 1000;
    pub const AI_MOVE_INTERVAL_MS: u64 = 10;
    pub const AI_MOVE_THRESHOLD_RATIO: f32 = 0.02; // of field height
    pub const AI_PREDICTION_BUDGET: f32 = 3.0; // seconds of simulated flight
    pub const AI_NOISE_PER_STEP: f32 = 10.0; // at prediction accuracy 0
    pub const AI_MISS_MIN: f32 = 0.6; // in paddle heights
    pub const AI_MISS_MAX: f32 = 1.2;
}
