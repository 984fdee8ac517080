use snake_core::{
    round_to_nearest_multiple, Board, Button, Direction, MoveOutcome, Position, PresenterEvent,
    Recorder, Runner, ScriptedInput, SessionConfig, SessionSnapshot, Snake,
};

fn mix_u64(hash: u64, value: u64) -> u64 {
    hash.wrapping_mul(0x0000_0100_0000_01B3) ^ value
}

fn snapshot_fingerprint(snapshots: &[SessionSnapshot]) -> u64 {
    let mut hash = 0xCBF2_9CE4_8422_2325u64;

    for snapshot in snapshots {
        hash = mix_u64(hash, snapshot.ticks);
        hash = mix_u64(hash, snapshot.score as u64);
        hash = mix_u64(hash, snapshot.bonus as u64);
        hash = mix_u64(hash, snapshot.alive as u64);
        hash = mix_u64(hash, snapshot.paused as u64);
        hash = mix_u64(hash, snapshot.direction.index() as u64);
        hash = mix_u64(hash, snapshot.head.x as i64 as u64);
        hash = mix_u64(hash, snapshot.head.y as i64 as u64);
        hash = mix_u64(hash, snapshot.length as u64);
        hash = mix_u64(hash, snapshot.apple.x as i64 as u64);
        hash = mix_u64(hash, snapshot.apple.y as i64 as u64);
    }

    hash
}

fn zigzag_script() -> Vec<ScriptedInput> {
    let mut script = Vec::new();
    for step in 0..40u64 {
        let button = if step % 3 == 0 { Button::Up } else { Button::Down };
        script.push(ScriptedInput {
            at_ms: 250 + step * 730,
            button,
        });
    }
    script
}

/// Replay the script and take a snapshot every second of game time.
fn replay(seed: u32) -> Vec<SessionSnapshot> {
    let mut runner = Runner::new(SessionConfig::default().with_seed(seed), Recorder::new())
        .expect("default config is valid");
    let script = zigzag_script();

    let mut snapshots = vec![runner.session().snapshot()];
    for second in 1..=30u64 {
        let until = second * 1_000;
        let window: Vec<ScriptedInput> = script
            .iter()
            .copied()
            .filter(|input| input.at_ms > until - 1_000 && input.at_ms <= until)
            .collect();
        runner.run_script(&window, until);
        snapshots.push(runner.session().snapshot());
        if runner.is_over() {
            break;
        }
    }
    snapshots
}

#[test]
fn grid_snapping_rounds_up_to_the_apple_grid() {
    assert_eq!(round_to_nearest_multiple(10, 5), 10);
    assert_eq!(round_to_nearest_multiple(11, 5), 15);
    assert_eq!(round_to_nearest_multiple(1, 5), 5);
    assert_eq!(round_to_nearest_multiple(0, 5), 0);
}

#[test]
fn turns_rotate_through_the_compass() {
    assert_eq!(Direction::Right.turned_ccw(), Direction::Up);
    assert_eq!(Direction::Up.turned_cw(), Direction::Right);
    assert_eq!(Direction::Right.turned_cw(), Direction::Down);
    assert_eq!(Direction::Down.turned_ccw(), Direction::Right);
}

#[test]
fn three_segment_snake_steps_right_without_growing() {
    let board = SessionConfig::default().board();
    let mut snake = Snake::from_segments(
        [
            Position::new(5, 5),
            Position::new(-5, 5),
            Position::new(-15, 5),
        ],
        Direction::Right,
    )
    .expect("non-empty");

    assert_eq!(snake.advance(&board), MoveOutcome::Clear);
    assert_eq!(snake.head(), Position::new(15, 5));
    assert_eq!(snake.len(), 3);
}

#[test]
fn head_landing_on_the_body_is_a_collision() {
    let board = Board::new(144, 152);
    let mut snake = Snake::from_segments(
        [
            Position::new(25, 15),
            Position::new(15, 15),
            Position::new(15, 25),
            Position::new(25, 25),
            Position::new(35, 25),
        ],
        Direction::Down,
    )
    .expect("non-empty");

    assert_eq!(snake.advance(&board), MoveOutcome::Collided);
}

#[test]
fn same_seed_and_script_replay_identically() {
    let first = replay(0xDEAD_BEEF);
    let second = replay(0xDEAD_BEEF);
    assert_eq!(first, second);
    assert_eq!(snapshot_fingerprint(&first), snapshot_fingerprint(&second));
}

#[test]
fn different_seeds_place_different_apples() {
    let fingerprints: Vec<u64> = [0xDEAD_BEEF, 0xC0FF_EE11, 0x1234_5678]
        .into_iter()
        .map(|seed| snapshot_fingerprint(&replay(seed)))
        .collect();
    assert_ne!(fingerprints[0], fingerprints[1]);
    assert_ne!(fingerprints[1], fingerprints[2]);
}

#[test]
fn replays_keep_score_and_length_consistent() {
    for seed in [0xDEAD_BEEF, 0xC0FF_EE11, 0x1234_5678, 7] {
        let snapshots = replay(seed);
        for pair in snapshots.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if after.round != before.round {
                continue;
            }
            assert!(after.score >= before.score, "seed={seed:#x}");
            assert!(after.length >= before.length, "seed={seed:#x}");
            assert!(after.bonus as usize <= after.length / 2, "seed={seed:#x}");
        }
    }
}

#[test]
fn script_and_trace_use_snake_case_json() {
    let script: Vec<ScriptedInput> =
        serde_json::from_str(r#"[{"at_ms":100,"button":"up"},{"at_ms":300,"button":"select"}]"#)
            .expect("script parses");
    assert_eq!(script[0].button, Button::Up);
    assert_eq!(script[1].button, Button::Select);

    let mut runner =
        Runner::new(SessionConfig::default(), Recorder::new()).expect("default config is valid");
    runner.run_script(&script, 300);
    assert!(runner.session().state().paused);

    let trace = serde_json::to_value(&runner.presenter().events).expect("trace serializes");
    let last = trace
        .as_array()
        .and_then(|events| events.iter().rev().find(|event| event["event"] == "score_text"))
        .expect("score text recorded");
    assert_eq!(last["text"], "Paused");

    assert_eq!(runner.presenter().renders(), 3);
    assert!(matches!(
        runner.presenter().events.first(),
        Some(PresenterEvent::Render { .. })
    ));
}
