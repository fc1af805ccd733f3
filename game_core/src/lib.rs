//! Deterministic Pong simulation.
//!
//! `MatchEngine` owns an ECS world with paddles and a ball and advances it
//! in fixed ticks. AI opponents live in [`ai`] and only read snapshots.

pub mod ai;
pub mod components;
pub mod config;
pub mod engine;
pub mod map;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod systems;

pub use ai::{AiController, AiProfile, Difficulty};
pub use components::*;
pub use config::*;
pub use engine::{MatchEngine, MatchStatus};
pub use map::*;
pub use params::*;
pub use resources::*;
pub use snapshot::MatchSnapshot;

use hecs::World;

/// Helper to create a paddle entity in its lane, vertically centered
pub fn create_paddle(
    world: &mut World,
    config: &Config,
    field: &Field,
    player: PlayerId,
) -> hecs::Entity {
    let paddle = Paddle::new(
        player,
        config.paddle_x(player, field),
        field.center().y,
        config.paddle_width,
        config.paddle_height,
        config.paddle_speed,
        field,
    );
    world.spawn((paddle, PaddleIntent::new()))
}

/// Helper to create a resting ball entity
pub fn create_ball(world: &mut World, config: &Config, pos: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, config.ball_radius, config.ball_rated_speed),))
}
