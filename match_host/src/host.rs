use log::{debug, info, warn};

use game_core::{
    AiController, AiProfile, Direction, MatchEngine, MatchResult, MatchSettings, MatchSnapshot,
    MatchStatus, PlayerId, Score,
};
use proto::HostMessage;

use crate::env::Environment;
use crate::events::{EventBus, Subscription};
use crate::input::{InputSnapshot, KeyBindings};
use crate::sink::{frame_message, match_ended_message, FrameSink};

/// Delay between a reset and the first tick of the new match
pub const RESET_DELAY_MS: u64 = 1000;

/// Runs one match: schedules ticks, maps input, drives AI paddles and
/// publishes score and end notifications.
///
/// Call `frame` once per display refresh. AI controllers share the host's
/// clock and are started, paused and reset together with the match.
pub struct MatchHost {
    env: Box<dyn Environment>,
    settings: MatchSettings,
    seed: u64,
    engine: MatchEngine,
    bindings: KeyBindings,
    ais: Vec<AiController>,
    bus: EventBus,
    renderers: Vec<Box<dyn FrameSink>>,
    finish_sinks: Vec<Box<dyn FrameSink>>,
    reset_delay_ms: u64,
    restart_at: Option<u64>,
    resets: u64,
    last_score: Score,
}

impl MatchHost {
    pub fn new(settings: MatchSettings, seed: u64, env: Box<dyn Environment>) -> Self {
        Self {
            env,
            settings,
            seed,
            engine: MatchEngine::new(&settings, seed),
            bindings: KeyBindings::default(),
            ais: Vec::new(),
            bus: EventBus::new(),
            renderers: Vec::new(),
            finish_sinks: Vec::new(),
            reset_delay_ms: RESET_DELAY_MS,
            restart_at: None,
            resets: 0,
            last_score: Score::new(),
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_reset_delay(mut self, delay_ms: u64) -> Self {
        self.reset_delay_ms = delay_ms;
        self
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn status(&self) -> MatchStatus {
        self.engine.status()
    }

    pub fn score(&self) -> Score {
        self.engine.score()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.engine.snapshot()
    }

    pub fn is_resetting(&self) -> bool {
        self.restart_at.is_some()
    }

    pub fn ai(&self, player: PlayerId) -> Option<&AiController> {
        self.ais.iter().find(|ai| ai.player() == player)
    }

    /// Hand `player` to an AI. Returns false if the player is not in this match.
    pub fn add_ai(&mut self, player: PlayerId, profile: AiProfile) -> bool {
        if !self.settings.topology.contains(player) {
            return false;
        }
        self.ais.retain(|ai| ai.player() != player);

        let mut ai = AiController::new(player, profile, self.ai_seed(player));
        if self.engine.status() == MatchStatus::Playing && self.restart_at.is_none() {
            ai.start(self.env.now());
        }
        debug!("{} controlled by {} AI", player, profile.difficulty);
        self.ais.push(ai);
        true
    }

    pub fn add_renderer(&mut self, sink: Box<dyn FrameSink>) {
        self.renderers.push(sink);
    }

    pub fn add_finish_sink(&mut self, sink: Box<dyn FrameSink>) {
        self.finish_sinks.push(sink);
    }

    pub fn on_score_changed(&self, callback: impl FnMut(&Score) + 'static) -> Subscription {
        self.bus.score_changed.subscribe(callback)
    }

    pub fn on_match_ended(&self, callback: impl FnMut(&MatchResult) + 'static) -> Subscription {
        self.bus.match_ended.subscribe(callback)
    }

    /// Start a waiting match or resume a paused one. No-op while a reset is pending.
    pub fn start(&mut self) {
        if self.restart_at.is_some() {
            debug!("start ignored, reset in progress");
            return;
        }
        match self.engine.status() {
            MatchStatus::Waiting => self.engine.start(),
            MatchStatus::Paused => self.engine.resume(),
            MatchStatus::Playing | MatchStatus::Finished => return,
        }
        let now = self.env.now();
        for ai in &mut self.ais {
            ai.start(now);
        }
    }

    pub fn pause(&mut self) {
        if self.engine.status() != MatchStatus::Playing {
            return;
        }
        self.engine.pause();
        for ai in &mut self.ais {
            ai.pause();
        }
    }

    /// Halt play and cancel every pending AI timer and command
    pub fn stop(&mut self) {
        for ai in &mut self.ais {
            ai.stop();
        }
        self.restart_at = None;
        self.engine.pause();
        info!("match stopped");
    }

    /// Throw the current match away and start a fresh one after the reset delay.
    ///
    /// AI timers are cancelled before the new engine exists, so nothing
    /// scheduled for the old match can reach the new one. A second reset or
    /// a start while this one is pending is ignored.
    pub fn reset(&mut self) {
        if self.restart_at.is_some() {
            debug!("reset ignored, already in progress");
            return;
        }
        for ai in &mut self.ais {
            ai.reset();
        }

        self.resets += 1;
        let field = *self.engine.field();
        let seed = self.seed.wrapping_add(self.resets);
        self.engine = MatchEngine::with_field(&self.settings, field, seed);
        if self.last_score != Score::new() {
            self.last_score = Score::new();
            self.bus.score_changed.emit(&self.last_score);
        }

        let now = self.env.now();
        self.restart_at = Some(now + self.reset_delay_ms);
        info!("match reset, restarting in {} ms", self.reset_delay_ms);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(width, height);
    }

    /// Per-frame callback: apply input, advance one tick, publish results.
    pub fn frame(&mut self, input: &InputSnapshot) {
        let now = self.env.now();

        if let Some(due) = self.restart_at {
            if now < due {
                self.render();
                return;
            }
            self.restart_at = None;
            self.engine.start();
            for ai in &mut self.ais {
                ai.start(now);
            }
        }

        if self.engine.status() != MatchStatus::Playing {
            self.render();
            return;
        }

        for &player in self.engine.players() {
            if self.ai(player).is_none() {
                let dir = self.bindings.direction(player, input);
                if dir != Direction::Stop {
                    self.engine.apply_paddle_intent(player, dir);
                }
            }
        }

        let snapshot = self.engine.snapshot();
        for ai in &mut self.ais {
            let dir = ai.update(now, &snapshot);
            self.engine.apply_paddle_intent(ai.player(), dir);
        }

        let events = self.engine.step().clone();

        if events.ball_reset {
            for ai in &mut self.ais {
                ai.on_ball_reset(now);
            }
        }

        let score = self.engine.score();
        if score != self.last_score {
            self.last_score = score;
            self.bus.score_changed.emit(&score);
        }

        if let Some(result) = events.match_ended {
            for ai in &mut self.ais {
                ai.stop();
            }
            self.bus.match_ended.emit(&result);
            broadcast(&self.finish_sinks, &match_ended_message(&result));
        }

        self.render();
    }

    fn render(&self) {
        if self.renderers.is_empty() {
            return;
        }
        broadcast(&self.renderers, &frame_message(&self.engine.snapshot()));
    }

    fn ai_seed(&self, player: PlayerId) -> u64 {
        self.seed
            .wrapping_mul(31)
            .wrapping_add(self.resets)
            .wrapping_add(player.get() as u64)
    }
}

fn broadcast(sinks: &[Box<dyn FrameSink>], msg: &HostMessage) {
    match msg.to_bytes() {
        Ok(bytes) => {
            for sink in sinks {
                if let Err(e) = sink.send_bytes(&bytes) {
                    warn!("sink dropped message: {}", e);
                }
            }
        }
        Err(e) => warn!("failed to encode host message: {}", e),
    }
}
