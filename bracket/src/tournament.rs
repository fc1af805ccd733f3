use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::BracketError;
use crate::participant::{AiDifficulty, Participant, ParticipantId, ParticipantKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u32);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Setup,
    Registration,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    InProgress,
    Completed,
}

/// Final score, `a` and `b` in the same order as the match's participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub a: u32,
    pub b: u32,
}

impl MatchScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub round: u32,
    pub a: ParticipantId,
    pub b: ParticipantId,
    pub winner: Option<ParticipantId>,
    pub score: Option<MatchScore>,
    pub status: MatchStatus,
}

impl BracketMatch {
    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.a == participant || self.b == participant
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Single-elimination tournament.
///
/// Rounds are paired sequentially: first with second, third with fourth,
/// and so on. When a later round has an odd number of winners the last one
/// sits out and joins the following round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    name: String,
    participant_count: usize,
    participants: Vec<Participant>,
    matches: Vec<BracketMatch>,
    current_round: u32,
    status: TournamentStatus,
    bye: Option<ParticipantId>,
    winner: Option<ParticipantId>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, participant_count: usize) -> Self {
        let name = name.into();
        debug!("tournament '{}' created for {} participants", name, participant_count);
        Self {
            name,
            participant_count,
            participants: Vec::with_capacity(participant_count),
            matches: Vec::new(),
            current_round: 0,
            status: TournamentStatus::Setup,
            bye: None,
            winner: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn matches(&self) -> &[BracketMatch] {
        &self.matches
    }

    pub fn get_match(&self, id: MatchId) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// 0 until the first round is generated
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn current_round_matches(&self) -> impl Iterator<Item = &BracketMatch> + '_ {
        let round = self.current_round;
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// Matches of the current round still waiting for a result
    pub fn pending_matches(&self) -> impl Iterator<Item = &BracketMatch> + '_ {
        self.current_round_matches().filter(|m| !m.is_completed())
    }

    /// Participant sitting out the current round, if any
    pub fn bye(&self) -> Option<ParticipantId> {
        self.bye
    }

    pub fn winner(&self) -> Option<&Participant> {
        self.winner.and_then(|id| self.participant(id))
    }

    pub fn add_participant(
        &mut self,
        alias: impl Into<String>,
        kind: ParticipantKind,
    ) -> Result<ParticipantId, BracketError> {
        if !self.matches.is_empty() || self.current_round > 0 {
            return Err(BracketError::RegistrationClosed);
        }
        if self.participants.len() >= self.participant_count {
            return Err(BracketError::RosterFull(self.participant_count));
        }

        let id = ParticipantId(self.participants.len() as u32 + 1);
        let participant = match kind {
            ParticipantKind::Human { user_ref } => Participant::human(id, alias, user_ref),
            ParticipantKind::Ai { difficulty } => Participant::ai(id, alias, difficulty),
        };
        debug!("registered {} '{}'", id, participant.alias);
        self.participants.push(participant);
        self.status = TournamentStatus::Registration;
        Ok(id)
    }

    pub fn add_human(
        &mut self,
        alias: impl Into<String>,
        user_ref: Option<String>,
    ) -> Result<ParticipantId, BracketError> {
        self.add_participant(alias, ParticipantKind::Human { user_ref })
    }

    pub fn add_ai(
        &mut self,
        alias: impl Into<String>,
        difficulty: AiDifficulty,
    ) -> Result<ParticipantId, BracketError> {
        self.add_participant(alias, ParticipantKind::Ai { difficulty })
    }

    /// Pair the roster in registration order and open round 1
    pub fn generate_first_round(&mut self) -> Result<&[BracketMatch], BracketError> {
        if !self.matches.is_empty() {
            return Err(BracketError::MatchesAlreadyGenerated);
        }
        let count = self.participants.len();
        if count < 2 {
            return Err(BracketError::TooFewParticipants(count));
        }
        if count % 2 != 0 {
            return Err(BracketError::OddParticipantCount(count));
        }

        let roster: Vec<ParticipantId> = self.participants.iter().map(|p| p.id).collect();
        self.status = TournamentStatus::InProgress;
        Ok(self.push_round(&roster))
    }

    /// Mark a pending match as being played. Purely informational.
    pub fn begin_match(&mut self, id: MatchId) -> Result<(), BracketError> {
        self.ensure_in_progress()?;
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(BracketError::UnknownMatch(id))?;
        match m.status {
            MatchStatus::Completed => Err(BracketError::MatchAlreadyCompleted(id)),
            _ => {
                m.status = MatchStatus::InProgress;
                Ok(())
            }
        }
    }

    /// Record a result. Everything is validated before anything changes.
    pub fn complete_match(
        &mut self,
        id: MatchId,
        winner: ParticipantId,
        score: MatchScore,
    ) -> Result<(), BracketError> {
        self.ensure_in_progress()?;

        let index = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(BracketError::UnknownMatch(id))?;
        let m = &self.matches[index];
        if m.is_completed() {
            return Err(BracketError::MatchAlreadyCompleted(id));
        }
        if !m.involves(winner) {
            return Err(BracketError::WinnerNotInMatch { match_id: id, winner });
        }
        let (winner_score, loser_score) = if winner == m.a {
            (score.a, score.b)
        } else {
            (score.b, score.a)
        };
        if winner_score <= loser_score {
            return Err(BracketError::NonDecisiveScore {
                winner_score,
                loser_score,
            });
        }

        let m = &mut self.matches[index];
        m.winner = Some(winner);
        m.score = Some(score);
        m.status = MatchStatus::Completed;
        let loser = if winner == m.a { m.b } else { m.a };

        for p in self.participants.iter_mut() {
            if p.id == winner {
                p.wins += 1;
            } else if p.id == loser {
                p.losses += 1;
            }
        }
        debug!("{} won by {}, {}-{}", id, winner, winner_score, loser_score);

        if self.is_tournament_complete() {
            self.status = TournamentStatus::Completed;
            self.winner = Some(winner);
            if let Some(champion) = self.participant(winner) {
                info!("tournament '{}' won by '{}'", self.name, champion.alias);
            }
        }
        Ok(())
    }

    /// Every match in the current round has a result
    pub fn is_round_complete(&self) -> bool {
        let mut matches = self.current_round_matches().peekable();
        matches.peek().is_some() && matches.all(|m| m.is_completed())
    }

    /// True when the current round is done and another round follows it
    pub fn can_advance(&self) -> bool {
        self.status == TournamentStatus::InProgress
            && self.is_round_complete()
            && (self.current_round_matches().count() > 1 || self.bye.is_some())
    }

    pub fn is_tournament_complete(&self) -> bool {
        self.bye.is_none() && self.current_round_matches().count() == 1 && self.is_round_complete()
    }

    /// Pair the current round's winners, in match order, into the next round
    pub fn generate_next_round(&mut self) -> Result<&[BracketMatch], BracketError> {
        if self.status == TournamentStatus::Completed || self.is_tournament_complete() {
            return Err(BracketError::TournamentFinished);
        }
        self.ensure_in_progress()?;
        if !self.is_round_complete() {
            return Err(BracketError::RoundNotComplete(self.current_round));
        }

        let mut advancing: Vec<ParticipantId> =
            self.current_round_matches().filter_map(|m| m.winner).collect();
        if let Some(rested) = self.bye.take() {
            advancing.push(rested);
        }
        Ok(self.push_round(&advancing))
    }

    fn ensure_in_progress(&self) -> Result<(), BracketError> {
        match self.status {
            TournamentStatus::InProgress => Ok(()),
            TournamentStatus::Completed => Err(BracketError::TournamentFinished),
            _ => Err(BracketError::NotInProgress),
        }
    }

    fn push_round(&mut self, entrants: &[ParticipantId]) -> &[BracketMatch] {
        self.current_round += 1;
        let round = self.current_round;
        let start = self.matches.len();

        let mut pairs = entrants.chunks_exact(2);
        for pair in pairs.by_ref() {
            let id = MatchId(self.matches.len() as u32 + 1);
            self.matches.push(BracketMatch {
                id,
                round,
                a: pair[0],
                b: pair[1],
                winner: None,
                score: None,
                status: MatchStatus::Pending,
            });
        }
        self.bye = pairs.remainder().first().copied();

        info!(
            "round {} generated: {} matches{}",
            round,
            self.matches.len() - start,
            if self.bye.is_some() { ", one bye" } else { "" }
        );
        &self.matches[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ais(n: usize) -> Tournament {
        let mut t = Tournament::new("cup", n);
        for i in 0..n {
            t.add_ai(format!("bot{}", i + 1), AiDifficulty::Medium).unwrap();
        }
        t
    }

    fn win_all_by_a(t: &mut Tournament) {
        let results: Vec<(MatchId, ParticipantId)> =
            t.pending_matches().map(|m| (m.id, m.a)).collect();
        for (id, winner) in results {
            t.complete_match(id, winner, MatchScore::new(5, 2)).unwrap();
        }
    }

    #[test]
    fn test_new_tournament_is_in_setup() {
        let t = Tournament::new("cup", 4);
        assert_eq!(t.status(), TournamentStatus::Setup);
        assert_eq!(t.current_round(), 0);
        assert!(t.winner().is_none());
    }

    #[test]
    fn test_registration_status_and_roster_cap() {
        let mut t = Tournament::new("cup", 2);
        t.add_human("ada", None).unwrap();
        assert_eq!(t.status(), TournamentStatus::Registration);
        t.add_ai("bot", AiDifficulty::Easy).unwrap();
        assert_eq!(t.add_human("late", None), Err(BracketError::RosterFull(2)));
    }

    #[test]
    fn test_registration_closes_after_first_round() {
        let mut t = Tournament::new("cup", 4);
        t.add_human("a", None).unwrap();
        t.add_human("b", None).unwrap();
        t.generate_first_round().unwrap();
        assert_eq!(t.add_human("c", None), Err(BracketError::RegistrationClosed));
    }

    #[test]
    fn test_first_round_errors() {
        let mut t = with_ais(0);
        assert_eq!(t.generate_first_round().unwrap_err(), BracketError::TooFewParticipants(0));

        let mut t = with_ais(3);
        assert_eq!(t.generate_first_round().unwrap_err(), BracketError::OddParticipantCount(3));
        assert_eq!(t.status(), TournamentStatus::Registration);

        let mut t = with_ais(2);
        t.generate_first_round().unwrap();
        assert_eq!(t.generate_first_round().unwrap_err(), BracketError::MatchesAlreadyGenerated);
    }

    #[test]
    fn test_complete_match_validation_leaves_state_unchanged() {
        let mut t = with_ais(4);
        let first = t.generate_first_round().unwrap()[0].clone();
        let before = t.clone();

        assert_eq!(
            t.complete_match(first.id, ParticipantId(3), MatchScore::new(5, 1)),
            Err(BracketError::WinnerNotInMatch {
                match_id: first.id,
                winner: ParticipantId(3)
            })
        );
        assert_eq!(
            t.complete_match(first.id, first.b, MatchScore::new(5, 3)),
            Err(BracketError::NonDecisiveScore {
                winner_score: 3,
                loser_score: 5
            })
        );
        assert_eq!(
            t.complete_match(first.id, first.a, MatchScore::new(4, 4)),
            Err(BracketError::NonDecisiveScore {
                winner_score: 4,
                loser_score: 4
            })
        );
        assert_eq!(
            t.complete_match(MatchId(99), first.a, MatchScore::new(5, 0)),
            Err(BracketError::UnknownMatch(MatchId(99)))
        );
        assert_eq!(t, before);

        t.complete_match(first.id, first.b, MatchScore::new(1, 5)).unwrap();
        assert_eq!(
            t.complete_match(first.id, first.b, MatchScore::new(1, 5)),
            Err(BracketError::MatchAlreadyCompleted(first.id))
        );

        let winner = t.participant(first.b).unwrap();
        let loser = t.participant(first.a).unwrap();
        assert_eq!((winner.wins, winner.losses), (1, 0));
        assert_eq!((loser.wins, loser.losses), (0, 1));
    }

    #[test]
    fn test_operations_before_start_are_rejected() {
        let mut t = with_ais(2);
        assert_eq!(
            t.complete_match(MatchId(1), ParticipantId(1), MatchScore::new(5, 0)),
            Err(BracketError::NotInProgress)
        );
        assert_eq!(t.generate_next_round().unwrap_err(), BracketError::NotInProgress);
        assert_eq!(t.begin_match(MatchId(1)), Err(BracketError::NotInProgress));
    }

    #[test]
    fn test_next_round_requires_complete_round() {
        let mut t = with_ais(4);
        let first = t.generate_first_round().unwrap()[0].clone();
        t.complete_match(first.id, first.a, MatchScore::new(5, 0)).unwrap();

        assert!(!t.can_advance());
        assert_eq!(t.generate_next_round().unwrap_err(), BracketError::RoundNotComplete(1));
    }

    #[test]
    fn test_begin_match_marks_in_progress() {
        let mut t = with_ais(2);
        let id = t.generate_first_round().unwrap()[0].id;
        t.begin_match(id).unwrap();
        assert_eq!(t.get_match(id).unwrap().status, MatchStatus::InProgress);
        assert_eq!(t.pending_matches().count(), 1);
    }

    #[test]
    fn test_two_player_final_completes_immediately() {
        let mut t = with_ais(2);
        t.generate_first_round().unwrap();
        win_all_by_a(&mut t);

        assert!(!t.can_advance());
        assert!(t.is_tournament_complete());
        assert_eq!(t.status(), TournamentStatus::Completed);
        assert_eq!(t.winner().unwrap().id, ParticipantId(1));
        assert_eq!(t.generate_next_round().unwrap_err(), BracketError::TournamentFinished);
    }

    #[test]
    fn test_six_players_use_a_bye() {
        let mut t = with_ais(6);
        assert_eq!(t.generate_first_round().unwrap().len(), 3);
        win_all_by_a(&mut t);
        assert!(t.can_advance());

        let round2 = t.generate_next_round().unwrap().to_vec();
        assert_eq!(round2.len(), 1);
        assert_eq!((round2[0].a, round2[0].b), (ParticipantId(1), ParticipantId(3)));
        assert_eq!(t.bye(), Some(ParticipantId(5)));

        win_all_by_a(&mut t);
        assert!(!t.is_tournament_complete(), "bye still waiting");
        assert!(t.can_advance());

        let round3 = t.generate_next_round().unwrap().to_vec();
        assert_eq!((round3[0].a, round3[0].b), (ParticipantId(1), ParticipantId(5)));
        assert_eq!(t.bye(), None);

        win_all_by_a(&mut t);
        assert!(t.is_tournament_complete());
        assert_eq!(t.winner().unwrap().alias, "bot1");
    }
}
