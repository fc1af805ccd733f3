use rand::Rng;

use crate::components::Ball;
use crate::map::Field;
use crate::params::Params;
use crate::resources::GameRng;

/// Predict the Y where the ball center reaches `plane_x`.
///
/// Walks the ball forward in fixed steps, mirroring off the top and bottom
/// walls, until it crosses the plane or the prediction budget runs out.
/// `noise` is the spread added to Y at every step; 0 gives the exact path
/// and draws nothing from `rng`.
pub fn predict_arrival_y(
    ball: &Ball,
    field: &Field,
    plane_x: f32,
    noise: f32,
    rng: &mut GameRng,
) -> f32 {
    let top = ball.radius;
    let bottom = (field.height - ball.radius).max(top);

    let mut pos = ball.pos;
    let mut vel = ball.vel;
    if vel.x == 0.0 {
        return pos.y.clamp(top, bottom);
    }

    let dt = Params::FIXED_DT;
    let max_steps = (Params::AI_PREDICTION_BUDGET / dt).ceil() as u32;

    for _ in 0..max_steps {
        let remaining = plane_x - pos.x;
        if remaining * vel.x <= 0.0 {
            // Already at or beyond the plane
            return pos.y.clamp(top, bottom);
        }

        let t = remaining / vel.x;
        if t <= dt {
            let (y, _) = mirror(pos.y + vel.y * t, vel.y, top, bottom);
            return y;
        }

        pos += vel * dt;
        let (y, vy) = mirror(pos.y, vel.y, top, bottom);
        pos.y = y;
        vel.y = vy;

        if noise > 0.0 {
            pos.y += gaussian_like(rng) * noise;
        }
    }

    pos.y.clamp(top, bottom)
}

/// Reflect a Y coordinate back into `[top, bottom]`, flipping `vy` on each bounce
fn mirror(mut y: f32, mut vy: f32, top: f32, bottom: f32) -> (f32, f32) {
    if bottom <= top {
        return (top, vy);
    }
    // A single step never crosses the band more than a few times
    for _ in 0..8 {
        if y < top {
            y = 2.0 * top - y;
            vy = -vy;
        } else if y > bottom {
            y = 2.0 * bottom - y;
            vy = -vy;
        } else {
            break;
        }
    }
    (y.clamp(top, bottom), vy)
}

/// Roughly normal sample with unit spread (sum of three uniforms)
fn gaussian_like(rng: &mut GameRng) -> f32 {
    let sum: f32 = (0..3).map(|_| rng.0.gen_range(-1.0f32..=1.0)).sum();
    sum / 3.0_f32.sqrt()
}
