use hecs::World;

use crate::components::{Ball, Side};
use crate::map::Field;
use crate::resources::{Events, GameRng, Score};

/// Check if the ball fully left the field (scoring).
///
/// On a point the ball is served from the center toward the side that
/// conceded it.
pub fn check_scoring(
    world: &mut World,
    field: &Field,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Side> {
    let mut scorer = None;

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let side = if ball.pos.x + ball.radius < 0.0 {
            Side::Right
        } else if ball.pos.x - ball.radius > field.width {
            Side::Left
        } else {
            continue;
        };

        score.increment(side);
        match side {
            Side::Left => events.left_scored = true,
            Side::Right => events.right_scored = true,
        }

        ball.serve(field.center(), side.opposite(), rng);
        events.ball_reset = true;
        scorer = Some(side);
    }

    scorer
}
