use hecs::World;
use rand::Rng;

use crate::components::{Ball, Lane, Paddle};
use crate::map::Field;
use crate::params::Params;
use crate::resources::{Events, GameRng, PaddleHit};

/// Bounce the ball off the top and bottom walls
pub fn check_walls(world: &mut World, field: &Field, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let radius = ball.radius;
        if ball.pos.y - radius <= 0.0 {
            ball.vel.y = ball.vel.y.abs();
            ball.pos.y = radius;
            events.ball_hit_wall = true;
        } else if ball.pos.y + radius >= field.height {
            ball.vel.y = -ball.vel.y.abs();
            ball.pos.y = field.height - radius;
            events.ball_hit_wall = true;
        }
    }
}

/// Check ball collisions with paddles after a move of `dt`.
///
/// Paddles are tested inner lane first so the nearest paddle on a side
/// gets the ball. At most one paddle is hit per tick.
pub fn check_paddles(world: &mut World, events: &mut Events, rng: &mut GameRng, dt: f32) {
    // Collect paddle data without holding borrows
    let mut paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();
    paddles.sort_by_key(|p| (p.lane() == Lane::Outer, p.player));

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for paddle in &paddles {
            if let Some(hit) = resolve_paddle_hit(ball, paddle, rng, dt) {
                events.ball_hit_paddle = Some((paddle.player, hit));
                break;
            }
        }
    }
}

/// Resolve a single ball/paddle pair, mutating the ball on contact.
///
/// The ball's travel over the last `dt` is swept, so a ball that started
/// the tick in front of the face cannot skip past the paddle.
pub fn resolve_paddle_hit(
    ball: &mut Ball,
    paddle: &Paddle,
    rng: &mut GameRng,
    dt: f32,
) -> Option<PaddleHit> {
    let facing = paddle.side().facing();

    // Only balls travelling toward this side's goal line can be struck
    if ball.vel.x * facing >= 0.0 {
        return None;
    }

    let face_x = paddle.face_x();
    let back_x = paddle.x - facing * paddle.width / 2.0;
    let leading_edge = ball.pos.x - facing * ball.radius;
    let trailing_edge = ball.pos.x + facing * ball.radius;

    let previous_leading_edge = leading_edge - ball.vel.x * dt;

    let crossed_face = (face_x - leading_edge) * facing >= 0.0;
    let not_passed = (trailing_edge - back_x) * facing >= 0.0;
    let was_in_front = (previous_leading_edge - face_x) * facing >= 0.0;
    let overlaps_y = paddle.bounds().overlaps_span_y(ball.pos.y, ball.radius);

    if !(crossed_face && (not_passed || was_in_front) && overlaps_y) {
        return None;
    }

    if was_in_front || (ball.pos.x - paddle.x) * facing >= 0.0 {
        // Front half: re-aim by hit offset, serve ramp ends here
        let hit_offset = ((ball.pos.y - paddle.y) / (paddle.height / 2.0)).clamp(-1.0, 1.0);
        let angle = hit_offset * Params::MAX_BOUNCE_ANGLE;

        ball.speed = ball.rated_speed;
        ball.serving = false;
        ball.aim(facing, angle);
        ball.pos.x = face_x + facing * ball.radius;
        Some(PaddleHit::Face)
    } else {
        // Struck from behind or clipped a corner: dampened recovery bounce
        let jitter = rng
            .0
            .gen_range(-Params::EDGE_BOUNCE_JITTER..=Params::EDGE_BOUNCE_JITTER);
        ball.vel.x = -ball.vel.x * Params::EDGE_BOUNCE_DAMPING;
        ball.vel.y += jitter;
        ball.speed = ball.vel.length();
        Some(PaddleHit::Edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Config, Field, PlayerId};
    use glam::Vec2;

    fn setup_world() -> (World, Config, Field, Events, GameRng) {
        (World::new(), Config::new(), Field::default(), Events::new(), GameRng::new(12345))
    }

    fn spawn_ball(world: &mut World, config: &Config, pos: Vec2, vel: Vec2) -> hecs::Entity {
        let entity = create_ball(world, config, pos);
        let mut ball = world.get::<&mut Ball>(entity).unwrap();
        ball.vel = vel;
        ball.speed = vel.length();
        drop(ball);
        entity
    }

    fn ball_of(world: &World, entity: hecs::Entity) -> Ball {
        *world.get::<&Ball>(entity).unwrap()
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (mut world, config, field, mut events, _rng) = setup_world();
        let ball_vel = Vec2::new(200.0, -100.0);
        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(400.0, config.ball_radius - 1.0),
            ball_vel,
        );

        check_walls(&mut world, &field, &mut events);

        let ball = ball_of(&world, entity);
        assert!(ball.vel.y > 0.0, "Ball should bounce down after hitting top wall");
        assert_eq!(ball.vel.x, ball_vel.x, "X velocity should be unchanged");
        assert_eq!(ball.pos.y, config.ball_radius, "Ball should be pushed out of wall");
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let (mut world, config, field, mut events, _rng) = setup_world();
        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(400.0, field.height - config.ball_radius + 2.0),
            Vec2::new(200.0, 100.0),
        );

        check_walls(&mut world, &field, &mut events);

        let ball = ball_of(&world, entity);
        assert!(ball.vel.y < 0.0, "Ball should bounce up after hitting bottom wall");
        assert_eq!(ball.pos.y, field.height - config.ball_radius);
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_ball_collides_with_left_paddle_face() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        let paddle = create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let paddle = *world.get::<&Paddle>(paddle).unwrap();

        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(paddle.face_x() + config.ball_radius - 2.0, paddle.y),
            Vec2::new(-240.0, 0.0),
        );
        {
            let mut ball = world.get::<&mut Ball>(entity).unwrap();
            ball.serving = true;
        }

        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        let ball = ball_of(&world, entity);
        assert!(ball.vel.x > 0.0, "Ball should bounce right after hitting left paddle");
        assert_eq!(ball.pos.x, paddle.face_x() + config.ball_radius, "Ball sits on the face");
        assert!(!ball.serving, "First paddle hit ends the serve ramp");
        assert!((ball.vel.length() - config.ball_rated_speed).abs() < 1e-3);
        assert_eq!(events.ball_hit_paddle, Some((PlayerId::ONE, PaddleHit::Face)));
    }

    #[test]
    fn test_ball_collides_with_right_paddle_face() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        let paddle = create_paddle(&mut world, &config, &field, PlayerId::TWO);
        let paddle = *world.get::<&Paddle>(paddle).unwrap();

        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(paddle.face_x() - config.ball_radius + 2.0, paddle.y),
            Vec2::new(240.0, 0.0),
        );

        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        let ball = ball_of(&world, entity);
        assert!(ball.vel.x < 0.0, "Ball should bounce left after hitting right paddle");
        assert!(ball.pos.x < paddle.x);
        assert_eq!(events.ball_hit_paddle, Some((PlayerId::TWO, PaddleHit::Face)));
    }

    #[test]
    fn test_hit_offset_sets_bounce_angle() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        let paddle = create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let paddle = *world.get::<&Paddle>(paddle).unwrap();
        let half = paddle.height / 2.0;

        // Half way toward the bottom edge: 22.5 degrees downward
        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(paddle.face_x() + 2.0, paddle.y + half / 2.0),
            Vec2::new(-240.0, 0.0),
        );
        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);
        let ball = ball_of(&world, entity);
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle - Params::MAX_BOUNCE_ANGLE / 2.0).abs() < 1e-4);

        // Beyond the paddle top: offset clamps to -1, 45 degrees upward
        world.clear();
        events.clear();
        create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(paddle.face_x() + 2.0, paddle.top() - config.ball_radius + 1.0),
            Vec2::new(-240.0, 0.0),
        );
        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);
        let ball = ball_of(&world, entity);
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle + Params::MAX_BOUNCE_ANGLE).abs() < 1e-4);
    }

    #[test]
    fn test_ball_does_not_bounce_when_moving_away_from_paddle() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        let paddle = create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let paddle = *world.get::<&Paddle>(paddle).unwrap();

        let ball_vel = Vec2::new(240.0, 0.0);
        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(paddle.face_x(), paddle.y),
            ball_vel,
        );

        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        assert_eq!(
            ball_of(&world, entity).vel,
            ball_vel,
            "Ball should not bounce when moving away"
        );
        assert!(events.ball_hit_paddle.is_none());
    }

    #[test]
    fn test_edge_hit_dampens_without_ending_serve() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        let paddle = create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let paddle = *world.get::<&Paddle>(paddle).unwrap();

        // Ball center is behind the paddle center, clipping the top corner
        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(paddle.x - 2.0, paddle.top() - config.ball_radius + 2.0),
            Vec2::new(-200.0, 50.0),
        );
        {
            let mut ball = world.get::<&mut Ball>(entity).unwrap();
            ball.serving = true;
        }

        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        let ball = ball_of(&world, entity);
        assert!((ball.vel.x - 160.0).abs() < 1e-3, "x velocity inverted and dampened");
        assert!((ball.vel.y - 50.0).abs() <= Params::EDGE_BOUNCE_JITTER + 1e-3);
        assert!(ball.serving, "Edge hits keep the serve ramp");
        assert!((ball.vel.length() - ball.speed).abs() < 1e-3);
        assert_eq!(events.ball_hit_paddle, Some((PlayerId::ONE, PaddleHit::Edge)));
    }

    #[test]
    fn test_inner_paddle_checked_before_outer() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let inner = create_paddle(&mut world, &config, &field, PlayerId::THREE);
        let inner = *world.get::<&Paddle>(inner).unwrap();

        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(inner.face_x() + 2.0, inner.y),
            Vec2::new(-240.0, 0.0),
        );

        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        assert!(ball_of(&world, entity).vel.x > 0.0);
        assert_eq!(events.ball_hit_paddle, Some((PlayerId::THREE, PaddleHit::Face)));
    }

    #[test]
    fn test_ball_passes_when_paddle_out_of_reach() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        let paddle = create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let paddle = *world.get::<&Paddle>(paddle).unwrap();

        let entity = spawn_ball(
            &mut world,
            &config,
            Vec2::new(paddle.face_x(), paddle.bottom() + config.ball_radius + 5.0),
            Vec2::new(-240.0, 0.0),
        );

        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        assert!(ball_of(&world, entity).vel.x < 0.0);
        assert!(events.ball_hit_paddle.is_none());
    }

    #[test]
    fn test_fast_ball_past_the_paddle_still_hits_face() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        let paddle = create_paddle(&mut world, &config, &field, PlayerId::ONE);
        let paddle = *world.get::<&Paddle>(paddle).unwrap();

        // Started the tick in front of the face, ended it behind the paddle
        let vel = Vec2::new(-3000.0, 0.0);
        let end_x = paddle.face_x() + config.ball_radius + vel.x * Params::FIXED_DT + 1.0;
        let entity = spawn_ball(&mut world, &config, Vec2::new(end_x, paddle.y), vel);
        assert!(end_x + config.ball_radius < paddle.x - paddle.width / 2.0);

        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        let ball = ball_of(&world, entity);
        assert!(ball.vel.x > 0.0);
        assert_eq!(ball.pos.x, paddle.face_x() + config.ball_radius);
        assert_eq!(events.ball_hit_paddle, Some((PlayerId::ONE, PaddleHit::Face)));
    }

    #[test]
    fn test_no_collision_when_no_ball() {
        let (mut world, config, field, mut events, mut rng) = setup_world();
        create_paddle(&mut world, &config, &field, PlayerId::ONE);

        check_walls(&mut world, &field, &mut events);
        check_paddles(&mut world, &mut events, &mut rng, Params::FIXED_DT);

        assert!(events.ball_hit_paddle.is_none());
        assert!(!events.ball_hit_wall);
    }
}
