//! Match orchestration on top of `game_core`.
//!
//! `MatchHost` is the per-frame driver a front end talks to; `runner`
//! plays whole matches and tournaments headlessly on a virtual clock.

pub mod env;
pub mod error;
pub mod events;
pub mod host;
pub mod input;
pub mod runner;
pub mod sink;

pub use env::{Environment, ManualClock, SystemEnv};
pub use error::HostError;
pub use events::{EventBus, Observers, Subscription};
pub use host::{MatchHost, RESET_DELAY_MS};
pub use input::{InputSnapshot, KeyBindings};
pub use runner::{play_ai_match, play_bracket_match, run_tournament};
pub use sink::{FrameSink, RecordingSink};
