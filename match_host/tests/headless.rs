use bracket::{AiDifficulty, MatchScore, Tournament, TournamentStatus};
use game_core::{Difficulty, MatchSettings, Topology};
use match_host::{play_ai_match, play_bracket_match, run_tournament};

fn quick_settings() -> MatchSettings {
    MatchSettings {
        win_score: 3,
        ..MatchSettings::default()
    }
}

#[test]
fn test_ai_match_is_reproducible() {
    let a = play_ai_match(quick_settings(), Difficulty::Easy, Difficulty::Hard, 5).unwrap();
    let b = play_ai_match(quick_settings(), Difficulty::Easy, Difficulty::Hard, 5).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.winner_score(), 3);
}

#[test]
fn test_four_player_ai_match_finishes() {
    let settings = MatchSettings {
        topology: Topology::FourPlayer,
        ..quick_settings()
    };
    let result = play_ai_match(settings, Difficulty::Medium, Difficulty::Medium, 9).unwrap();
    assert!(result.loser_score() < result.winner_score());
}

#[test]
fn test_bracket_match_result_is_accepted() {
    let mut t = Tournament::new("cup", 2);
    t.add_ai("left", AiDifficulty::Easy).unwrap();
    t.add_human("right", None).unwrap();
    let id = t.generate_first_round().unwrap()[0].id;

    let (winner, score): (_, MatchScore) = play_bracket_match(&t, id, quick_settings(), 3).unwrap();
    assert_eq!(score.a.max(score.b), 3);
    t.complete_match(id, winner, score).unwrap();
    assert_eq!(t.winner().unwrap().id, winner);
}

#[test]
fn test_whole_tournament_runs() {
    let mut t = Tournament::new("cup", 4);
    for (i, d) in [AiDifficulty::Easy, AiDifficulty::Hard, AiDifficulty::Medium, AiDifficulty::Easy]
        .into_iter()
        .enumerate()
    {
        t.add_ai(format!("bot{i}"), d).unwrap();
    }

    let champion = run_tournament(&mut t, quick_settings(), 17).unwrap();

    assert_eq!(t.status(), TournamentStatus::Completed);
    assert_eq!(t.matches().len(), 3);
    assert_eq!(t.winner().unwrap().id, champion);
    assert_eq!(t.participant(champion).unwrap().wins, 2);
}
