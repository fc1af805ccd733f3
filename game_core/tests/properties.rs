use game_core::*;
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Up), Just(Direction::Down), Just(Direction::Stop)]
}

fn topology() -> impl Strategy<Value = Topology> {
    prop_oneof![Just(Topology::TwoPlayer), Just(Topology::FourPlayer)]
}

fn assert_paddles_in_bounds(engine: &MatchEngine) -> Result<(), TestCaseError> {
    let height = engine.field().height;
    for paddle in engine.snapshot().paddles {
        prop_assert!(paddle.min_y <= paddle.y && paddle.y <= paddle.max_y);
        prop_assert!(paddle.top() >= -1e-3 && paddle.bottom() <= height + 1e-3);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: the ball always travels at its recorded speed, also after
    /// the field is resized mid-match
    #[test]
    fn prop_ball_velocity_matches_speed(
        seed in any::<u64>(),
        topology in topology(),
        inputs in prop::collection::vec((0u8..4, direction()), 1..400),
        resize in prop::option::of((0usize..400, 120.0f32..2000.0, 120.0f32..2000.0))
    ) {
        let settings = MatchSettings { topology, ..MatchSettings::default() };
        let mut engine = MatchEngine::new(&settings, seed);
        engine.start();

        for (i, (slot, dir)) in inputs.into_iter().enumerate() {
            if let Some((at, width, height)) = resize {
                if i == at {
                    engine.resize(width, height);
                }
            }

            let players = engine.players();
            let player = players[slot as usize % players.len()];
            engine.apply_paddle_intent(player, dir);
            engine.step();

            let ball = engine.ball();
            prop_assert!((ball.vel.length() - ball.speed).abs() <= ball.speed * 1e-3 + 1e-3);
            prop_assert!(ball.pos.y >= ball.radius - 1e-3);
            prop_assert!(ball.pos.y <= engine.field().height - ball.radius + 1e-3);
        }
    }

    /// Property: paddles stay inside the field through input and resizes
    #[test]
    fn prop_paddles_stay_in_field(
        seed in any::<u64>(),
        topology in topology(),
        held in prop::collection::vec(direction(), 4),
        ticks in 1usize..300,
        width in 120.0f32..2000.0,
        height in 120.0f32..2000.0
    ) {
        let settings = MatchSettings { topology, ..MatchSettings::default() };
        let mut engine = MatchEngine::new(&settings, seed);
        engine.start();

        for _ in 0..ticks {
            for (player, dir) in engine.players().iter().zip(held.iter()) {
                engine.apply_paddle_intent(*player, *dir);
            }
            engine.step();
        }
        assert_paddles_in_bounds(&engine)?;

        engine.resize(width, height);
        assert_paddles_in_bounds(&engine)?;

        for _ in 0..ticks {
            for (player, dir) in engine.players().iter().zip(held.iter()) {
                engine.apply_paddle_intent(*player, *dir);
            }
            engine.step();
        }
        assert_paddles_in_bounds(&engine)?;
    }

    /// Property: scores only grow and a finished match stays finished
    #[test]
    fn prop_finished_is_terminal(
        seed in any::<u64>(),
        win_score in 3u8..=4,
        inputs in prop::collection::vec(direction(), 1..50)
    ) {
        let settings = MatchSettings { win_score, ..MatchSettings::default() };
        let mut engine = MatchEngine::new(&settings, seed);
        engine.start();

        let mut last = engine.score();
        let mut finished_at: Option<MatchSnapshot> = None;
        for tick in 0..60 * 60 * 5 {
            let dir = inputs[tick % inputs.len()];
            engine.apply_paddle_intent(PlayerId::ONE, dir);
            engine.step();
            engine.resume();
            engine.start();

            let score = engine.score();
            prop_assert!(score.left >= last.left && score.right >= last.right);
            prop_assert!(score.left <= win_score && score.right <= win_score);
            last = score;

            if engine.status() == MatchStatus::Finished {
                let snapshot = engine.snapshot();
                if let Some(frozen) = &finished_at {
                    prop_assert_eq!(&snapshot, frozen);
                }
                finished_at.get_or_insert(snapshot);
                if tick % 7 == 0 {
                    break;
                }
            }
        }
    }
}
