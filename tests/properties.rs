//! Property tests over random input streams

use std::collections::HashSet;

use proptest::prelude::*;

use snake_arcade::platform::FrameInput;
use snake_arcade::renderer::{RecordingTarget, draw_frame};
use snake_arcade::sim::{Direction, GamePhase, Grid, TurnBuffer};
use snake_arcade::{MemoryStore, Session};

fn direction() -> impl Strategy<Value = Direction> {
    (0usize..4).prop_map(|i| Direction::ALL[i])
}

/// One frame of player input plus its frame delta
fn frame() -> impl Strategy<Value = (Option<Direction>, f32)> {
    (proptest::option::weighted(0.3, direction()), 0.001f32..0.1)
}

#[derive(Debug, Clone, Copy)]
enum TurnOp {
    Request(Direction),
    Commit,
}

fn turn_op() -> impl Strategy<Value = TurnOp> {
    prop_oneof![
        3 => direction().prop_map(TurnOp::Request),
        1 => Just(TurnOp::Commit),
    ]
}

fn run(session: &mut Session, store: &mut MemoryStore, frames: &[(Option<Direction>, f32)]) {
    for &(turn, dt) in frames {
        let input = FrameInput {
            turn,
            ..Default::default()
        };
        session.frame(&input, dt, store);
        if session.phase() == GamePhase::GameOver {
            session.frame(&FrameInput::restart(), dt, store);
        }
    }
}

proptest! {
    #[test]
    fn prop_board_invariants_hold(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame(), 1..600),
    ) {
        let mut store = MemoryStore::default();
        let mut session = Session::new(Grid::default(), seed, &store).unwrap();

        for (turn, dt) in frames {
            let input = FrameInput { turn, ..Default::default() };
            session.frame(&input, dt, &mut store);

            let state = &session.state;
            let segments = state.snake.segments();
            let unique: HashSet<_> = segments.iter().copied().collect();
            prop_assert_eq!(unique.len(), segments.len());
            prop_assert!(segments.iter().all(|c| state.grid.in_bounds(*c)));
            prop_assert!(segments.windows(2).all(|w| w[0].manhattan(w[1]) == 1));
            prop_assert!(!state.snake.contains(state.food));
            prop_assert_eq!(state.snake.len(), 3 + (state.score / 10) as usize);
            prop_assert_eq!(session.effects.body.len(), state.snake.len());
            prop_assert!(!state.direction().is_opposite(state.turns.next()));

            if session.phase() == GamePhase::GameOver {
                session.frame(&FrameInput::restart(), dt, &mut store);
                prop_assert_eq!(session.phase(), GamePhase::Playing);
            }
        }
    }

    #[test]
    fn prop_same_seed_same_game(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame(), 1..300),
    ) {
        let mut store_a = MemoryStore::default();
        let mut store_b = MemoryStore::default();
        let mut a = Session::new(Grid::default(), seed, &store_a).unwrap();
        let mut b = Session::new(Grid::default(), seed, &store_b).unwrap();

        run(&mut a, &mut store_a, &frames);
        run(&mut b, &mut store_b, &frames);

        prop_assert_eq!(&a.state.snake, &b.state.snake);
        prop_assert_eq!(a.state.food, b.state.food);
        prop_assert_eq!(a.state.score, b.state.score);
        prop_assert_eq!(a.rounds(), b.rounds());
        prop_assert_eq!(a.high_score(), b.high_score());
    }

    #[test]
    fn prop_reversals_never_change_the_buffer(
        start in direction(),
        ops in prop::collection::vec(turn_op(), 1..64),
    ) {
        let mut turns = TurnBuffer::new(start);
        for op in ops {
            match op {
                TurnOp::Request(dir) => {
                    let before = turns;
                    let changed = turns.request(dir);
                    let reverses_heading =
                        !before.has_pending_turn() && dir.is_opposite(before.direction());
                    if dir.is_opposite(before.next()) || reverses_heading {
                        prop_assert!(!changed);
                        prop_assert_eq!(turns, before);
                    }
                }
                TurnOp::Commit => {
                    let previous = turns.direction();
                    let committed = turns.commit();
                    prop_assert!(!committed.is_opposite(previous));
                }
            }
        }
    }

    #[test]
    fn prop_two_key_combo_lands_on_consecutive_ticks(
        start in direction(),
        left in any::<bool>(),
        u_turn in any::<bool>(),
    ) {
        let first = if left {
            Direction::ALL[(start.index() + 3) % 4]
        } else {
            Direction::ALL[(start.index() + 1) % 4]
        };

        // Second press either straightens out or completes a U-turn
        let second = if u_turn { start.opposite() } else { start };

        let mut turns = TurnBuffer::new(start);
        prop_assert!(turns.request(first));
        prop_assert!(turns.request(second));
        prop_assert_eq!(turns.commit(), first);
        prop_assert_eq!(turns.commit(), second);
        prop_assert_eq!(turns.queued(), None);
    }

    #[test]
    fn prop_frames_always_draw(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame(), 1..200),
    ) {
        let mut store = MemoryStore::default();
        let mut session = Session::new(Grid::default(), seed, &store).unwrap();
        run(&mut session, &mut store, &frames);

        let mut target = RecordingTarget::new();
        draw_frame(&session, &mut target);
        prop_assert!(target.camera().is_some());
        prop_assert!(target.texts().any(|t| t.starts_with("Score: ")));
    }
}
