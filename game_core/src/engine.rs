use hecs::World;
use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Ball, Direction, Paddle, PlayerId, Side};
use crate::config::{Config, MatchSettings};
use crate::map::Field;
use crate::params::Params;
use crate::resources::{Events, GameRng, IntentQueue, MatchResult, Score};
use crate::snapshot::MatchSnapshot;
use crate::systems::*;

/// Match lifecycle as seen by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Waiting,
    Playing,
    Paused,
    Finished,
}

/// Owns one match's mutable state and advances it one fixed tick at a time.
///
/// Control methods never fail: calling them in the wrong state is a no-op.
pub struct MatchEngine {
    world: World,
    field: Field,
    config: Config,
    score: Score,
    events: Events,
    intents: IntentQueue,
    rng: GameRng,
    status: MatchStatus,
    winner: Option<Side>,
    tick: u64,
}

impl MatchEngine {
    pub fn new(settings: &MatchSettings, seed: u64) -> Self {
        Self::with_field(settings, Field::default(), seed)
    }

    /// New match on `field`. Sizes and speeds are scaled from the default
    /// field exactly as `resize` would scale them.
    pub fn with_field(settings: &MatchSettings, field: Field, seed: u64) -> Self {
        let config = Config::for_field(settings, &field);
        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        for &player in config.topology.players() {
            crate::create_paddle(&mut world, &config, &field, player);
        }

        // Opening serve goes to a random side
        let mut ball = Ball::new(field.center(), config.ball_radius, config.ball_rated_speed);
        let toward = if rng.0.gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        ball.serve(field.center(), toward, &mut rng);
        world.spawn((ball,));

        Self {
            world,
            field,
            config,
            score: Score::new(),
            events: Events::new(),
            intents: IntentQueue::new(),
            rng,
            status: MatchStatus::Waiting,
            winner: None,
            tick: 0,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Events produced by the most recent `step()`
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn players(&self) -> &'static [PlayerId] {
        self.config.topology.players()
    }

    pub fn start(&mut self) {
        if self.status == MatchStatus::Waiting {
            info!("match started ({:?}, first to {})", self.config.topology, self.config.win_score);
            self.status = MatchStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.status == MatchStatus::Playing {
            debug!("match paused at tick {}", self.tick);
            self.status = MatchStatus::Paused;
            self.intents.clear();
        }
    }

    pub fn resume(&mut self) {
        if self.status == MatchStatus::Paused {
            debug!("match resumed at tick {}", self.tick);
            self.status = MatchStatus::Playing;
        }
    }

    /// Queue a paddle intent for the next tick. Ignored outside `Playing`
    /// and for players not in this topology.
    pub fn apply_paddle_intent(&mut self, player: PlayerId, dir: Direction) {
        if self.status == MatchStatus::Playing && self.config.topology.contains(player) {
            self.intents.push_intent(player, dir);
        }
    }

    /// Advance exactly one fixed tick.
    ///
    /// Order: paddle intents, ball integration, wall and paddle collisions,
    /// scoring, terminal check.
    pub fn step(&mut self) -> &Events {
        self.events.clear();
        if self.status != MatchStatus::Playing {
            return &self.events;
        }

        let dt = Params::FIXED_DT;

        ingest_intents(&mut self.world, &mut self.intents);
        move_paddles(&mut self.world, dt);
        move_ball(&mut self.world, dt);
        check_walls(&mut self.world, &self.field, &mut self.events);
        check_paddles(&mut self.world, &mut self.events, &mut self.rng, dt);

        if let Some(side) = check_scoring(
            &mut self.world,
            &self.field,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
        ) {
            debug!(
                "{:?} scored, {}-{}",
                side, self.score.left, self.score.right
            );
        }

        self.tick += 1;
        trace!("tick {}", self.tick);

        if let Some(winner) = self.score.has_winner(self.config.win_score) {
            let result = MatchResult {
                winner,
                score_left: self.score.left,
                score_right: self.score.right,
            };
            info!(
                "match finished: {:?} wins {}-{}",
                winner, result.score_left, result.score_right
            );
            self.status = MatchStatus::Finished;
            self.winner = Some(winner);
            self.intents.clear();
            self.events.match_ended = Some(result);
        }

        &self.events
    }

    pub fn ball(&self) -> Ball {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
            .unwrap_or_else(|| {
                Ball::new(
                    self.field.center(),
                    self.config.ball_radius,
                    self.config.ball_rated_speed,
                )
            })
    }

    pub fn paddle(&self, player: PlayerId) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.player == player)
            .map(|(_e, p)| *p)
    }

    /// Owned copy of the match state for renderers and AI controllers
    pub fn snapshot(&self) -> MatchSnapshot {
        let mut paddles: Vec<Paddle> =
            self.world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();
        paddles.sort_by_key(|p| p.player);

        MatchSnapshot {
            tick: self.tick,
            status: self.status,
            field: self.field,
            ball: self.ball(),
            paddles,
            score: self.score,
            win_score: self.config.win_score,
            winner: self.winner,
        }
    }

    /// Rescale to a new field size, keeping relative positions.
    ///
    /// Speeds follow the width ratio so crossing time is unchanged.
    /// Non-positive sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }

        let new_field = Field::new(width, height);
        let ratio = self.field.scale_to(&new_field);

        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.x *= ratio.x;
            paddle.y *= ratio.y;
            paddle.width *= ratio.x;
            paddle.height *= ratio.y;
            paddle.speed *= ratio.y;
            paddle.fit_to(&new_field);
        }

        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.pos *= ratio;
            ball.radius *= ratio.x.min(ratio.y);
            ball.rated_speed *= ratio.x;
            ball.speed *= ratio.x;
            ball.vel = (ball.vel * ratio).normalize_or_zero() * ball.speed;
            ball.pos.y = new_field.clamp_y(ball.pos.y, ball.radius);
        }

        debug!(
            "field resized {}x{} -> {}x{}",
            self.field.width, self.field.height, width, height
        );
        self.config = self.config.clone().scaled(ratio);
        self.field = new_field;
    }
}
