//! AI opponents.
//!
//! A controller only ever reads `MatchSnapshot`s and answers with a
//! `Direction` for its paddle; whoever owns the engine applies it through
//! the same intent path as human input.

pub mod controller;
pub mod predict;
pub mod profile;

pub use controller::AiController;
pub use predict::predict_arrival_y;
pub use profile::{AiProfile, Difficulty};
