use thiserror::Error;

use crate::participant::ParticipantId;
use crate::tournament::MatchId;

/// Rejected bracket operation. State is never modified when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BracketError {
    #[error("need at least 2 participants, have {0}")]
    TooFewParticipants(usize),

    #[error("first round needs an even roster, have {0}")]
    OddParticipantCount(usize),

    #[error("roster is full ({0} participants)")]
    RosterFull(usize),

    #[error("registration is closed")]
    RegistrationClosed,

    #[error("matches have already been generated")]
    MatchesAlreadyGenerated,

    #[error("tournament is not in progress")]
    NotInProgress,

    #[error("unknown match {0}")]
    UnknownMatch(MatchId),

    #[error("match {0} is already completed")]
    MatchAlreadyCompleted(MatchId),

    #[error("participant {winner} did not play in match {match_id}")]
    WinnerNotInMatch { match_id: MatchId, winner: ParticipantId },

    #[error("winning score {winner_score} must be greater than {loser_score}")]
    NonDecisiveScore { winner_score: u32, loser_score: u32 },

    #[error("round {0} still has unfinished matches")]
    RoundNotComplete(u32),

    #[error("tournament already has a winner")]
    TournamentFinished,
}
