use log::{debug, trace};
use rand::Rng;

use super::predict::predict_arrival_y;
use super::profile::AiProfile;
use crate::components::{Direction, PlayerId};
use crate::params::Params;
use crate::resources::GameRng;
use crate::snapshot::MatchSnapshot;

/// A target waiting out the reaction delay
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTarget {
    target: f32,
    commit_at: u64,
}

/// Drives one paddle from match snapshots.
///
/// Three timers run on the caller's clock (milliseconds): the decision
/// tick that re-predicts, the reaction delay before a target is committed,
/// and the fine movement tick that steers toward the committed target.
/// `update` fires whatever is due and returns the paddle direction to hold.
pub struct AiController {
    player: PlayerId,
    profile: AiProfile,
    rng: GameRng,
    running: bool,
    next_decision_at: Option<u64>,
    pending: Option<PendingTarget>,
    committed: Option<f32>,
    next_move_at: Option<u64>,
    direction: Direction,
}

impl AiController {
    pub fn new(player: PlayerId, profile: AiProfile, seed: u64) -> Self {
        Self {
            player,
            profile,
            rng: GameRng::new(seed),
            running: false,
            next_decision_at: None,
            pending: None,
            committed: None,
            next_move_at: None,
            direction: Direction::Stop,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Direction currently held by the controller
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn committed_target(&self) -> Option<f32> {
        self.committed
    }

    pub fn pending_target(&self) -> Option<f32> {
        self.pending.map(|p| p.target)
    }

    /// Begin observing; the first decision happens on the next update
    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_decision_at = Some(now_ms);
        if self.committed.is_some() {
            self.next_move_at = Some(now_ms);
        }
    }

    /// Halt and drop pending timers. The committed target is kept for resume.
    pub fn pause(&mut self) {
        self.running = false;
        self.cancel_timers();
    }

    /// Halt and forget everything decided so far
    pub fn stop(&mut self) {
        self.pause();
        self.committed = None;
    }

    pub fn reset(&mut self) {
        self.stop();
    }

    /// The ball was re-served: predict again right away
    pub fn on_ball_reset(&mut self, now_ms: u64) {
        if self.running {
            self.pending = None;
            self.next_decision_at = Some(now_ms);
        }
    }

    fn cancel_timers(&mut self) {
        self.next_decision_at = None;
        self.pending = None;
        self.next_move_at = None;
        self.direction = Direction::Stop;
    }

    /// Fire every timer due at `now_ms` and return the direction to apply
    pub fn update(&mut self, now_ms: u64, snapshot: &MatchSnapshot) -> Direction {
        if !self.running {
            return Direction::Stop;
        }

        if self.next_decision_at.is_some_and(|due| now_ms >= due) {
            self.decide(now_ms, snapshot);
            self.next_decision_at = Some(now_ms + self.profile.decision_interval_ms);
        }

        if let Some(pending) = self.pending {
            if now_ms >= pending.commit_at {
                debug!("{} committed target y={:.1}", self.player, pending.target);
                self.committed = Some(pending.target);
                self.pending = None;
                self.next_move_at = Some(now_ms);
            }
        }

        if self.next_move_at.is_some_and(|due| now_ms >= due) {
            self.direction = self.steer(snapshot);
            self.next_move_at = match self.direction {
                Direction::Stop => None,
                _ => Some(now_ms + self.profile.move_interval_ms),
            };
        }

        self.direction
    }

    fn decide(&mut self, now_ms: u64, snapshot: &MatchSnapshot) {
        if !snapshot.is_playing() {
            return;
        }
        let Some(paddle) = snapshot.paddle(self.player) else {
            return;
        };

        let ball = &snapshot.ball;
        let facing = paddle.side().facing();
        let approaching = ball.vel.x * facing < 0.0;

        let target = if approaching {
            let plane_x = paddle.face_x() + facing * ball.radius;
            let noise = (1.0 - self.profile.accuracy) * Params::AI_NOISE_PER_STEP;
            let predicted = predict_arrival_y(ball, &snapshot.field, plane_x, noise, &mut self.rng);

            if self.profile.miss_rate > 0.0 && self.rng.0.gen_bool(self.profile.miss_rate as f64) {
                let offset = self.rng.0.gen_range(Params::AI_MISS_MIN..=Params::AI_MISS_MAX)
                    * paddle.height;
                let sign = if self.rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
                trace!("{} aiming off by {:.1}", self.player, sign * offset);
                predicted + sign * offset
            } else {
                predicted
            }
        } else {
            // Ball heading away: return to guard position
            snapshot.field.height / 2.0
        };

        // Paddle center can never pass its travel limits
        let target = target.clamp(paddle.min_y, paddle.max_y);
        self.pending = Some(PendingTarget {
            target,
            commit_at: now_ms + self.profile.reaction_ms,
        });
    }

    fn steer(&self, snapshot: &MatchSnapshot) -> Direction {
        let (Some(target), Some(paddle)) = (self.committed, snapshot.paddle(self.player)) else {
            return Direction::Stop;
        };
        if !snapshot.is_playing() {
            return Direction::Stop;
        }

        let threshold = snapshot.field.height * Params::AI_MOVE_THRESHOLD_RATIO;
        let diff = target - paddle.y;
        if diff.abs() <= threshold {
            Direction::Stop
        } else if diff < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}
