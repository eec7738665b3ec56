//! Fixed-interval simulation tick
//!
//! `advance` accumulates frame deltas and fires at most one `tick` per call.
//! A long frame never triggers catch-up ticks.

use rand::Rng;
use rand_pcg::Pcg32;

use super::grid::{Cell, Grid, Snake};
use super::state::{CrashCause, GamePhase, GameState, TickOutcome};
use crate::consts::{FOOD_REWARD, MIN_SNAKE_LENGTH, MOVE_INTERVAL};
use crate::error::SimError;

/// Feed one frame's delta into the tick clock.
///
/// Only accumulates while Playing. Returns the outcome of the tick if one
/// fired this frame.
pub fn advance(state: &mut GameState, dt: f32) -> Result<Option<TickOutcome>, SimError> {
    if state.phase != GamePhase::Playing {
        return Ok(None);
    }

    state.play_time += dt;
    state.move_timer += dt;
    if state.move_timer < MOVE_INTERVAL {
        return Ok(None);
    }
    state.move_timer = 0.0;
    tick(state)
}

/// Advance the snake by one cell.
///
/// Returns `Ok(None)` outside Playing. Collisions are not errors; they end
/// the round and are reported as `TickOutcome::Crashed`.
pub fn tick(state: &mut GameState) -> Result<Option<TickOutcome>, SimError> {
    if state.phase != GamePhase::Playing {
        return Ok(None);
    }
    if state.snake.len() < MIN_SNAKE_LENGTH {
        return Err(SimError::SnakeTooShort {
            len: state.snake.len(),
        });
    }

    let direction = state.turns.commit();
    let head = state.snake.head();
    let candidate = head.step(direction);

    if !state.grid.in_bounds(candidate) {
        state.phase = GamePhase::GameOver;
        return Ok(Some(TickOutcome::Crashed {
            head,
            cause: CrashCause::Wall,
        }));
    }
    if state.snake.contains(candidate) {
        state.phase = GamePhase::GameOver;
        return Ok(Some(TickOutcome::Crashed {
            head,
            cause: CrashCause::SelfCollision,
        }));
    }

    state.snake.push_head(candidate);
    state.time_ticks += 1;

    let ate = if candidate == state.food {
        state.score += FOOD_REWARD;
        state.food = place_food(&state.grid, &state.snake, &mut state.rng)?;
        Some(candidate)
    } else {
        state.snake.pop_tail();
        None
    };

    Ok(Some(TickOutcome::Moved {
        old_head: head,
        ate,
    }))
}

/// Pick a uniformly random free cell for food.
///
/// Rejection sampling handles the usual sparse board; after a bounded number
/// of misses the free cells are enumerated and sampled directly, so a nearly
/// full board still terminates. A full board is `SimError::BoardFull`.
pub fn place_food(grid: &Grid, snake: &Snake, rng: &mut Pcg32) -> Result<Cell, SimError> {
    let cells = grid.cell_count();
    if snake.len() >= cells {
        return Err(SimError::BoardFull);
    }

    for _ in 0..cells * 4 {
        let cell = Cell::new(
            rng.random_range(0..grid.width),
            rng.random_range(0..grid.height),
        );
        if !snake.contains(cell) {
            return Ok(cell);
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|c| !snake.contains(*c)).collect();
    if free.is_empty() {
        return Err(SimError::BoardFull);
    }
    Ok(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Direction;
    use rand::SeedableRng;

    fn cells(list: &[(i32, i32)]) -> Vec<Cell> {
        list.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_eat_food_scenario() {
        let mut state = GameState::with_snake(
            Grid::new(20, 20),
            cells(&[(10, 10), (9, 10), (8, 10)]),
            Direction::Right,
            42,
        )
        .unwrap();
        state.food = Cell::new(11, 10);

        let outcome = tick(&mut state).unwrap();
        assert_eq!(
            outcome,
            Some(TickOutcome::Moved {
                old_head: Cell::new(10, 10),
                ate: Some(Cell::new(11, 10)),
            })
        );
        assert_eq!(state.snake.head(), Cell::new(11, 10));
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 4);
        for c in cells(&[(11, 10), (10, 10), (9, 10), (8, 10)]) {
            assert_ne!(state.food, c);
        }
    }

    #[test]
    fn test_move_without_eating_keeps_length() {
        let mut state = GameState::new(Grid::new(20, 20), 5).unwrap();
        state.food = Cell::new(0, 0);
        let before = state.snake.len();
        tick(&mut state).unwrap();
        assert_eq!(state.snake.len(), before);
        assert_eq!(state.snake.head(), Cell::new(11, 10));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_wall_collision_scenario() {
        let mut state = GameState::with_snake(
            Grid::new(20, 20),
            cells(&[(0, 10), (1, 10), (2, 10)]),
            Direction::Left,
            7,
        )
        .unwrap();
        let body_before = state.snake.clone();

        let outcome = tick(&mut state).unwrap();
        assert_eq!(
            outcome,
            Some(TickOutcome::Crashed {
                head: Cell::new(0, 10),
                cause: CrashCause::Wall,
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snake, body_before);

        // Frozen afterwards
        assert_eq!(tick(&mut state).unwrap(), None);
        assert_eq!(state.snake, body_before);
    }

    #[test]
    fn test_self_collision_scenario() {
        // Head at (5,5) turning down into its own body at (5,4)
        let mut state = GameState::with_snake(
            Grid::new(20, 20),
            cells(&[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)]),
            Direction::Down,
            7,
        )
        .unwrap();

        let outcome = tick(&mut state).unwrap();
        assert_eq!(
            outcome,
            Some(TickOutcome::Crashed {
                head: Cell::new(5, 5),
                cause: CrashCause::SelfCollision,
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_queued_turn_commits_on_following_tick() {
        let mut state = GameState::new(Grid::new(20, 20), 9).unwrap();
        state.food = Cell::new(0, 0);
        state.request_turn(Direction::Up);
        state.request_turn(Direction::Right);

        tick(&mut state).unwrap();
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.snake.head(), Cell::new(10, 11));

        tick(&mut state).unwrap();
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.snake.head(), Cell::new(11, 11));
    }

    #[test]
    fn test_advance_fires_at_most_one_tick() {
        let mut state = GameState::new(Grid::new(20, 20), 11).unwrap();
        state.food = Cell::new(0, 0);

        assert_eq!(advance(&mut state, 0.05).unwrap(), None);
        assert_eq!(state.time_ticks, 0);

        // A one-second hitch still produces a single move
        assert!(advance(&mut state, 1.0).unwrap().is_some());
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.move_timer, 0.0);
    }

    #[test]
    fn test_advance_frozen_when_paused() {
        let mut state = GameState::new(Grid::new(20, 20), 11).unwrap();
        state.toggle_pause();
        assert_eq!(advance(&mut state, 1.0).unwrap(), None);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.play_time, 0.0);
    }

    #[test]
    fn test_place_food_nearly_full_board() {
        // 4x1 board, three cells taken: only (3,0) is free
        let grid = Grid::new(4, 1);
        let snake = Snake::horizontal(Cell::new(2, 0), 3);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(place_food(&grid, &snake, &mut rng).unwrap(), Cell::new(3, 0));
        }
    }

    #[test]
    fn test_place_food_full_board() {
        let grid = Grid::new(3, 1);
        let snake = Snake::horizontal(Cell::new(2, 0), 3);
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(matches!(
            place_food(&grid, &snake, &mut rng),
            Err(SimError::BoardFull)
        ));
    }

    #[test]
    fn test_board_fills_up_reports_error() {
        // 4x1: eating the last free cell leaves nowhere for new food
        let mut state = GameState::with_snake(
            Grid::new(4, 1),
            cells(&[(2, 0), (1, 0), (0, 0)]),
            Direction::Right,
            1,
        )
        .unwrap();
        assert_eq!(state.food, Cell::new(3, 0));
        assert!(matches!(tick(&mut state), Err(SimError::BoardFull)));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Grid::default(), 99999).unwrap();
        let mut b = GameState::new(Grid::default(), 99999).unwrap();
        assert_eq!(a.food, b.food);

        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for i in 0..40 {
            if i % 3 == 0 {
                let d = turns[(i / 3) % 4];
                a.request_turn(d);
                b.request_turn(d);
            }
            let oa = tick(&mut a).unwrap();
            let ob = tick(&mut b).unwrap();
            assert_eq!(oa, ob);
        }
        assert_eq!(a.snake, b.snake);
        assert_eq!(a.food, b.food);
        assert_eq!(a.score, b.score);
    }
}
