use crate::food::{BoardFull, Food};
use crate::grid::Grid;
use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::SessionSettings;
use crate::snake::Snake;
use crate::types::{
    CollisionPolicy, CollisionReason, Direction, EndReason, GameStatus, Point,
};

/// What a single tick did, for the driving loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    /// Collision resolved by the reset policy; the session keeps running.
    Collided(CollisionReason),
    /// The session ended this tick.
    GameOver(EndReason),
    /// `step` was called while the session is already over.
    Ignored,
}

/// Read-only view handed to renderers. Owns its data, so the live state
/// stays unreachable through it.
#[derive(Clone, Debug)]
pub struct GameSnapshot {
    pub head: Point,
    /// Ordered segments, head first.
    pub body: Vec<Point>,
    pub food: Point,
    pub score: u32,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub tick: u64,
    pub field_width: i32,
    pub field_height: i32,
}

/// One session: snake, food, score and run status, advanced one tick at a
/// time by the external driver.
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Food,
    score: u32,
    status: GameStatus,
    end_reason: Option<EndReason>,
    tick: u64,
    collision_policy: CollisionPolicy,
    rng: SessionRng,
}

impl GameState {
    pub fn new(settings: &SessionSettings) -> Result<Self, String> {
        settings.validate()?;

        let mut rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_entropy(),
        };
        let grid = Grid::new(settings.field_width, settings.field_height, settings.wrap_mode);
        let snake = Snake::new(grid.center(), rng.random_direction());
        let food = Food::spawn(&grid, snake.occupied_cells(), &mut rng)
            .map_err(|_| "Board has no free cell for food".to_string())?;

        log!(
            "Session started: {}x{} {:?} grid, {:?} policy, seed {}",
            grid.width,
            grid.height,
            grid.wrap_mode,
            settings.collision_policy,
            rng.seed()
        );

        Ok(Self {
            grid,
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            end_reason: None,
            tick: 0,
            collision_policy: settings.collision_policy,
            rng,
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Stages a direction change for the next tick. Ignored once the
    /// session is over.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Over {
            return;
        }
        self.snake.request_direction(direction);
    }

    /// Advances the simulation by one tick: direction arbitration, move,
    /// collision handling, food consumption, respawn.
    pub fn step(&mut self) -> StepOutcome {
        if self.status == GameStatus::Over {
            return StepOutcome::Ignored;
        }

        self.tick += 1;
        self.snake.apply_pending_direction();

        // Flag growth before the move so the consumption tick itself
        // retains the tail, and the collision check treats the retained
        // tail cell as occupied.
        if self.snake.next_head(&self.grid) == Some(self.food.position()) {
            self.snake.mark_growth();
        }

        let grew = match self.snake.advance(&self.grid) {
            Ok(grew) => grew,
            Err(reason) => return self.resolve_collision(reason),
        };

        if !grew {
            return StepOutcome::Moved;
        }

        self.score += 1;
        let head = self.snake.head();
        log!(
            "Ate food at ({}, {}). Score: {}",
            head.x,
            head.y,
            self.score
        );

        match self
            .food
            .respawn(&self.grid, self.snake.occupied_cells(), &mut self.rng)
        {
            Ok(()) => StepOutcome::Ate,
            Err(BoardFull) => {
                // Cannot be resolved by retry; ends the session under
                // either policy.
                self.status = GameStatus::Over;
                self.end_reason = Some(EndReason::BoardFull);
                log!("Board full on tick {}. Final score: {}", self.tick, self.score);
                StepOutcome::GameOver(EndReason::BoardFull)
            }
        }
    }

    fn resolve_collision(&mut self, reason: CollisionReason) -> StepOutcome {
        match self.collision_policy {
            CollisionPolicy::Terminate => {
                let end = EndReason::from(reason);
                self.status = GameStatus::Over;
                self.end_reason = Some(end);
                log!(
                    "{:?} on tick {}. Final score: {}",
                    reason,
                    self.tick,
                    self.score
                );
                StepOutcome::GameOver(end)
            }
            CollisionPolicy::Reset => {
                log!("{:?} on tick {}, restarting", reason, self.tick);
                self.reset();
                StepOutcome::Collided(reason)
            }
        }
    }

    /// Restarts the session in place: single-segment snake at the grid
    /// center with a fresh random direction, relocated food, zero score.
    pub fn reset(&mut self) {
        let direction = self.rng.random_direction();
        self.snake.reset(self.grid.center(), direction);
        self.score = 0;
        self.status = GameStatus::Running;
        self.end_reason = None;
        self.food
            .respawn(&self.grid, self.snake.occupied_cells(), &mut self.rng)
            .expect("a freshly reset board should have a free cell for food");
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            head: self.snake.head(),
            body: self.snake.segments().collect(),
            food: self.food.position(),
            score: self.score,
            status: self.status,
            end_reason: self.end_reason,
            tick: self.tick,
            field_width: self.grid.width,
            field_height: self.grid.height,
        }
    }

    #[cfg(test)]
    fn set_body(&mut self, segments: &[Point], direction: Direction) {
        self.snake = Snake::from_segments(segments, direction);
    }

    #[cfg(test)]
    fn set_food_position(&mut self, position: Point) {
        self.food = Food::at(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WrapMode;

    fn settings(width: i32, height: i32) -> SessionSettings {
        SessionSettings {
            field_width: width,
            field_height: height,
            wrap_mode: WrapMode::Toroidal,
            collision_policy: CollisionPolicy::Terminate,
            seed: Some(42),
            tick_interval_ms: 150,
        }
    }

    fn game_10x10() -> GameState {
        GameState::new(&settings(10, 10)).unwrap()
    }

    #[test]
    fn test_new_starts_centered_with_food_off_body() {
        let game = game_10x10();
        let snapshot = game.snapshot();

        assert_eq!(snapshot.body, vec![Point::new(5, 5)]);
        assert_ne!(snapshot.food, Point::new(5, 5));
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.tick, 0);
    }

    #[test]
    fn test_step_moves_one_cell() {
        let mut game = game_10x10();
        game.set_body(&[Point::new(5, 5)], Direction::Right);
        game.set_food_position(Point::new(0, 0));

        assert_eq!(game.step(), StepOutcome::Moved);
        assert_eq!(game.snapshot().body, vec![Point::new(6, 5)]);
    }

    #[test]
    fn test_reversal_request_is_dropped() {
        let mut game = game_10x10();
        game.set_body(
            &[Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
        );
        game.set_food_position(Point::new(0, 0));

        game.request_direction(Direction::Left);
        game.step();
        assert_eq!(game.snapshot().head, Point::new(7, 5));
    }

    #[test]
    fn test_consumption_grows_scores_and_relocates_food() {
        let mut game = game_10x10();
        game.set_body(
            &[Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
        );
        game.set_food_position(Point::new(7, 5));

        assert_eq!(game.step(), StepOutcome::Ate);

        let snapshot = game.snapshot();
        assert_eq!(
            snapshot.body,
            vec![
                Point::new(7, 5),
                Point::new(6, 5),
                Point::new(5, 5),
                Point::new(4, 5),
            ]
        );
        assert_eq!(snapshot.score, 1);
        assert!(!snapshot.body.contains(&snapshot.food));
    }

    #[test]
    fn test_wrap_collision_with_reset_policy_restarts() {
        let mut cfg = settings(10, 10);
        cfg.collision_policy = CollisionPolicy::Reset;
        let mut game = GameState::new(&cfg).unwrap();
        game.set_body(
            &[Point::new(0, 5), Point::new(9, 5), Point::new(8, 5)],
            Direction::Left,
        );
        game.set_food_position(Point::new(3, 3));

        assert_eq!(
            game.step(),
            StepOutcome::Collided(CollisionReason::SelfCollision)
        );

        let snapshot = game.snapshot();
        assert_eq!(snapshot.body, vec![Point::new(5, 5)]);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.status, GameStatus::Running);
    }

    #[test]
    fn test_collision_with_terminate_policy_ends_session() {
        let mut game = game_10x10();
        game.set_body(
            &[Point::new(0, 5), Point::new(9, 5), Point::new(8, 5)],
            Direction::Left,
        );
        game.set_food_position(Point::new(3, 3));

        assert_eq!(
            game.step(),
            StepOutcome::GameOver(EndReason::SelfCollision)
        );
        assert_eq!(game.status(), GameStatus::Over);
        assert_eq!(game.end_reason(), Some(EndReason::SelfCollision));

        // Further ticks are ignored until an explicit reset.
        assert_eq!(game.step(), StepOutcome::Ignored);
        game.reset();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.snapshot().body, vec![Point::new(5, 5)]);
    }

    #[test]
    fn test_wall_hit_on_bounded_grid_ends_session() {
        let mut cfg = settings(10, 10);
        cfg.wrap_mode = WrapMode::Bounded;
        let mut game = GameState::new(&cfg).unwrap();
        game.set_body(&[Point::new(9, 5), Point::new(8, 5)], Direction::Right);
        game.set_food_position(Point::new(3, 3));

        assert_eq!(game.step(), StepOutcome::GameOver(EndReason::WallHit));
        assert_eq!(game.end_reason(), Some(EndReason::WallHit));
    }

    #[test]
    fn test_full_board_ends_session() {
        // Degenerate 2x1 board: eating the only free cell leaves nowhere
        // to respawn.
        let mut game = GameState::new(&settings(2, 1)).unwrap();
        game.set_body(&[Point::new(0, 0)], Direction::Right);
        game.set_food_position(Point::new(1, 0));

        assert_eq!(game.step(), StepOutcome::GameOver(EndReason::BoardFull));
        assert_eq!(game.status(), GameStatus::Over);
        assert_eq!(game.end_reason(), Some(EndReason::BoardFull));
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_requests_ignored_after_game_over() {
        let mut game = game_10x10();
        game.set_body(
            &[Point::new(0, 5), Point::new(9, 5), Point::new(8, 5)],
            Direction::Left,
        );
        game.set_food_position(Point::new(3, 3));
        game.step();
        assert_eq!(game.status(), GameStatus::Over);

        game.request_direction(Direction::Down);
        assert_eq!(game.step(), StepOutcome::Ignored);
    }

    #[test]
    fn test_seeded_sessions_replay_identically() {
        let mut a = GameState::new(&settings(10, 10)).unwrap();
        let mut b = GameState::new(&settings(10, 10)).unwrap();

        for i in 0..100 {
            if i % 3 == 0 {
                a.request_direction(Direction::Down);
                b.request_direction(Direction::Down);
            } else if i % 7 == 0 {
                a.request_direction(Direction::Right);
                b.request_direction(Direction::Right);
            }
            assert_eq!(a.step(), b.step());
            assert_eq!(a.snapshot().food, b.snapshot().food);
            assert_eq!(
                a.snapshot().body,
                b.snapshot().body
            );
        }
    }

    #[test]
    fn test_invariants_hold_over_many_ticks() {
        let mut cfg = settings(8, 8);
        cfg.collision_policy = CollisionPolicy::Reset;
        let mut game = GameState::new(&cfg).unwrap();
        let mut steer = SessionRng::new(7);

        let mut previous_len = game.snapshot().body.len();
        for _ in 0..500 {
            game.request_direction(steer.random_direction());
            let outcome = game.step();
            let snapshot = game.snapshot();

            // Food never rests on the body.
            assert!(!snapshot.body.contains(&snapshot.food));

            // Length moves by 0 or +1 per tick, +1 exactly on consumption.
            match outcome {
                StepOutcome::Ate => assert_eq!(snapshot.body.len(), previous_len + 1),
                StepOutcome::Moved => assert_eq!(snapshot.body.len(), previous_len),
                StepOutcome::Collided(_) => assert_eq!(snapshot.body.len(), 1),
                StepOutcome::GameOver(_) | StepOutcome::Ignored => {}
            }
            previous_len = snapshot.body.len();

            // Consecutive segments stay one toroidal step apart.
            for pair in snapshot.body.windows(2) {
                let dx = (pair[0].x - pair[1].x).rem_euclid(8);
                let dy = (pair[0].y - pair[1].y).rem_euclid(8);
                let dx = dx.min(8 - dx);
                let dy = dy.min(8 - dy);
                assert_eq!(dx + dy, 1);
            }
        }
    }
}
