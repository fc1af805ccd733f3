//! Single-elimination tournament bracket.
//!
//! A `Tournament` is an owned value: create it, register participants,
//! generate the first round, then feed match results back in and advance
//! round by round until one participant is left.

pub mod error;
pub mod participant;
pub mod tournament;

pub use error::BracketError;
pub use participant::{AiDifficulty, Participant, ParticipantId, ParticipantKind};
pub use tournament::{BracketMatch, MatchId, MatchScore, MatchStatus, Tournament, TournamentStatus};
