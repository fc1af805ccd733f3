use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};

use bracket::{AiDifficulty, MatchId, MatchScore, ParticipantId, Tournament};
use game_core::{AiProfile, Difficulty, MatchResult, MatchSettings, Side};

use crate::env::ManualClock;
use crate::error::{HostError, Result};
use crate::host::MatchHost;
use crate::input::InputSnapshot;

/// Longest stretch of simulated play before a headless match is abandoned
pub const MAX_MATCH_MS: u64 = 30 * 60 * 1000;

const FRAME_MS: u64 = 16;

pub fn to_game_difficulty(difficulty: AiDifficulty) -> Difficulty {
    match difficulty {
        AiDifficulty::Easy => Difficulty::Easy,
        AiDifficulty::Medium => Difficulty::Medium,
        AiDifficulty::Hard => Difficulty::Hard,
    }
}

/// Play a match with an AI on every paddle against a virtual clock.
///
/// Left-side paddles use `left`, right-side paddles use `right`.
pub fn play_ai_match(
    settings: MatchSettings,
    left: Difficulty,
    right: Difficulty,
    seed: u64,
) -> Result<MatchResult> {
    let clock = ManualClock::new(0);
    let mut host = MatchHost::new(settings, seed, Box::new(clock.clone()));

    for &player in settings.topology.players() {
        let difficulty = match player.side() {
            Side::Left => left,
            Side::Right => right,
        };
        host.add_ai(player, AiProfile::for_difficulty(difficulty));
    }

    let outcome: Rc<Cell<Option<MatchResult>>> = Rc::new(Cell::new(None));
    let slot = outcome.clone();
    let _ended = host.on_match_ended(move |result| slot.set(Some(*result)));

    let idle = InputSnapshot::new();
    host.start();
    let mut elapsed = 0;
    while elapsed < MAX_MATCH_MS {
        host.frame(&idle);
        if let Some(result) = outcome.get() {
            debug!(
                "{:?} won {}-{} after {} ticks",
                result.winner,
                result.score_left,
                result.score_right,
                host.engine().tick()
            );
            return Ok(result);
        }
        clock.advance(FRAME_MS);
        elapsed += FRAME_MS;
    }

    warn!("match abandoned at {}-{}", host.score().left, host.score().right);
    Err(HostError::MatchTimedOut { elapsed_ms: elapsed })
}

/// Simulate one bracket pairing. Participant `a` plays the left side.
///
/// Humans cannot be simulated, so they are stood in for by a medium AI.
pub fn play_bracket_match(
    tournament: &Tournament,
    match_id: MatchId,
    settings: MatchSettings,
    seed: u64,
) -> Result<(ParticipantId, MatchScore)> {
    let m = tournament
        .get_match(match_id)
        .ok_or(bracket::BracketError::UnknownMatch(match_id))?;

    let difficulty_of = |id: ParticipantId| {
        tournament
            .participant(id)
            .and_then(|p| p.difficulty())
            .map(to_game_difficulty)
            .unwrap_or_default()
    };

    let result = play_ai_match(settings, difficulty_of(m.a), difficulty_of(m.b), seed)?;
    let winner = match result.winner {
        Side::Left => m.a,
        Side::Right => m.b,
    };
    Ok((
        winner,
        MatchScore::new(result.score_left as u32, result.score_right as u32),
    ))
}

/// Play every remaining match until the bracket has a winner
pub fn run_tournament(
    tournament: &mut Tournament,
    settings: MatchSettings,
    seed: u64,
) -> Result<ParticipantId> {
    if tournament.current_round() == 0 {
        tournament.generate_first_round()?;
    }

    let mut match_seed = seed;
    loop {
        let pending: Vec<MatchId> = tournament.pending_matches().map(|m| m.id).collect();
        for id in pending {
            match_seed = match_seed.wrapping_add(1);
            tournament.begin_match(id)?;
            let (winner, score) = play_bracket_match(tournament, id, settings, match_seed)?;
            tournament.complete_match(id, winner, score)?;
        }

        if tournament.is_tournament_complete() {
            break;
        }
        tournament.generate_next_round()?;
    }

    let champion = tournament
        .winner()
        .ok_or(bracket::BracketError::RoundNotComplete(tournament.current_round()))?;
    info!("'{}' champion: {}", tournament.name(), champion.alias);
    Ok(champion.id)
}
