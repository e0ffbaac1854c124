use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the head landed on the apple this tick
    pub ate_apple: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// Whether the game is still running; the tick source should stop once
    /// this is false
    pub running: bool,
}

impl TickOutcome {
    fn stopped() -> Self {
        Self {
            ate_apple: false,
            collision: None,
            running: false,
        }
    }
}

impl GameState {
    /// Start a new game with an entropy-seeded apple generator
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a new game whose apple placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        // Head in the top-left cell, the rest trailing off the left edge so
        // the body unfurls onto the board over the first few ticks
        let snake = Snake::new(
            Position::new(0, 0),
            Direction::Right,
            config.initial_body_parts,
            config.cell_size as i32,
        );

        let mut state = Self::from_parts(config, snake, Position::new(0, 0), rng);
        state.spawn_apple();

        info!(
            board_width = state.config.board_width,
            board_height = state.config.board_height,
            cell_size = state.config.cell_size,
            apple_x = state.apple.x,
            apple_y = state.apple.y,
            "game started"
        );

        state
    }

    /// Assemble a running game from an explicit snake and apple
    pub fn from_parts(config: GameConfig, snake: Snake, apple: Position, rng: StdRng) -> Self {
        Self {
            config,
            snake,
            apple,
            score: 0,
            tick_count: 0,
            running: true,
            rng,
        }
    }

    /// Place the apple on a uniformly random cell
    ///
    /// The snake's body is not avoided: the apple may land underneath it.
    pub fn spawn_apple(&mut self) -> Position {
        let cell = self.config.cell_size as i32;
        let col = self.rng.gen_range(0..self.config.grid_width().max(1)) as i32;
        let row = self.rng.gen_range(0..self.config.grid_height().max(1)) as i32;

        self.apple = Position::new(col * cell, row * cell);
        self.apple
    }

    /// Queue a turn for the next tick
    ///
    /// A request to reverse onto the body is ignored. Returns whether the
    /// direction was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.snake.direction.is_opposite(direction) {
            return false;
        }

        self.snake.direction = direction;
        true
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::stopped();
        }

        let cell = self.config.cell_size as i32;
        let next_head = self.snake.head().stepped(self.snake.direction, cell);
        let ate_apple = self.check_apple(next_head);

        self.snake.advance(cell, ate_apple);
        self.tick_count += 1;

        if ate_apple {
            self.score += 1;
            let apple = self.spawn_apple();
            debug!(
                score = self.score,
                length = self.snake.len(),
                apple_x = apple.x,
                apple_y = apple.y,
                "apple eaten"
            );
        }

        let collision = self.check_collisions();
        if let Some(kind) = collision {
            self.running = false;
            info!(
                ?kind,
                score = self.score,
                ticks = self.tick_count,
                "game over"
            );
        }

        TickOutcome {
            ate_apple,
            collision,
            running: self.running,
        }
    }

    fn check_apple(&self, head: Position) -> bool {
        head == self.apple
    }

    fn check_collisions(&self) -> Option<CollisionType> {
        let head = self.snake.head();

        if self.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if !self.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{MAX_BOARD_PIXELS, MAX_GRID_CELLS};

    const SEED: u64 = 7;

    fn game_with(snake: Snake, apple: Position) -> GameState {
        GameState::from_parts(
            GameConfig::small(),
            snake,
            apple,
            StdRng::seed_from_u64(SEED),
        )
    }

    #[test]
    fn test_initialize() {
        let state = GameState::with_seed(GameConfig::default(), SEED);

        assert!(state.is_running());
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_count(), 0);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.snake().len(), 6);
        assert_eq!(state.snake().head(), Position::new(0, 0));

        let apple = state.apple();
        assert_eq!(apple.x % 20, 0);
        assert_eq!(apple.y % 20, 0);
        assert!((0..600).contains(&apple.x));
        assert!((0..600).contains(&apple.y));
    }

    #[test]
    fn test_initial_snake_unfurls_without_dying() {
        let mut state = GameState::with_seed(GameConfig::default(), SEED);
        // keep the apple out of the way so the length stays fixed
        state.apple = Position::new(580, 580);

        for step in 1..=6 {
            let outcome = state.tick();
            assert!(outcome.running);
            assert_eq!(state.snake().head(), Position::new(20 * step, 0));
            assert_eq!(state.snake().len(), 6);
        }

        assert!(state.snake().body.iter().all(|pos| pos.x >= 0));
    }

    #[test]
    fn test_largest_board_plays_normally() {
        let config = GameConfig {
            board_width: MAX_BOARD_PIXELS,
            board_height: MAX_BOARD_PIXELS,
            cell_size: MAX_BOARD_PIXELS / MAX_GRID_CELLS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let mut state = GameState::with_seed(config, 3);
        state.apple = Position::new(0, 5_000);

        let outcome = state.tick();

        assert!(outcome.running);
        assert_eq!(outcome.collision, None);
        assert_eq!(state.snake().head(), Position::new(1_000, 0));
        let apple = state.spawn_apple();
        assert!((0..MAX_BOARD_PIXELS as i32).contains(&apple.x));
        assert!((0..MAX_BOARD_PIXELS as i32).contains(&apple.y));
    }

    #[test]
    fn test_spawn_apple_stays_on_grid() {
        let mut state = GameState::with_seed(GameConfig::new(100, 60), SEED);

        for _ in 0..500 {
            let apple = state.spawn_apple();
            assert_eq!(apple, state.apple());
            assert!((0..100).contains(&apple.x));
            assert!((0..60).contains(&apple.y));
            assert_eq!(apple.x % 20, 0);
            assert_eq!(apple.y % 20, 0);
        }
    }

    #[test]
    fn test_head_moves_one_cell_in_current_direction() {
        let mut state = game_with(
            Snake::new(Position::new(100, 100), Direction::Right, 3, 20),
            Position::new(0, 0),
        );

        for dir in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
            let before = state.snake().head();
            assert!(state.set_direction(dir));

            let outcome = state.tick();

            assert!(outcome.running);
            assert_eq!(state.snake().head(), before.stepped(dir, 20));
        }
    }

    #[test]
    fn test_length_grows_by_one_or_stays() {
        let mut state = GameState::with_seed(GameConfig::default(), SEED);
        let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Right];

        for step in 0..40 {
            if step % 10 == 0 {
                state.set_direction(turns[(step / 10) % turns.len()]);
            }

            let before = state.snake().len();
            let outcome = state.tick();
            if !outcome.running {
                break;
            }

            let expected = if outcome.ate_apple { before + 1 } else { before };
            assert_eq!(state.snake().len(), expected);
        }
    }

    #[test]
    fn test_reverse_turns_are_ignored() {
        for dir in Direction::ALL {
            let mut state = game_with(
                Snake::new(Position::new(100, 100), dir, 3, 20),
                Position::new(0, 0),
            );

            assert!(!state.set_direction(dir.reverse()));
            assert_eq!(state.direction(), dir);
        }
    }

    #[test]
    fn test_perpendicular_and_repeat_turns_are_taken() {
        let mut state = game_with(
            Snake::new(Position::new(100, 100), Direction::Right, 3, 20),
            Position::new(0, 0),
        );

        assert!(state.set_direction(Direction::Right));
        assert!(state.set_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn test_last_turn_before_tick_wins() {
        let mut state = game_with(
            Snake::new(Position::new(100, 100), Direction::Right, 3, 20),
            Position::new(0, 0),
        );

        state.set_direction(Direction::Up);
        state.set_direction(Direction::Down);
        state.set_direction(Direction::Right);
        state.set_direction(Direction::Down);
        state.tick();

        assert_eq!(state.snake().head(), Position::new(100, 120));
    }

    #[test]
    fn test_apple_consumption() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 20);
        let mut state = game_with(snake, Position::new(120, 100));

        let outcome = state.tick();

        assert!(outcome.ate_apple);
        assert!(outcome.running);
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.snake().head(), Position::new(120, 100));

        // the new apple comes from the next two draws of the same generator
        let mut rng = StdRng::seed_from_u64(SEED);
        let col = rng.gen_range(0..config.grid_width()) as i32;
        let row = rng.gen_range(0..config.grid_height()) as i32;
        assert_eq!(state.apple(), Position::new(col * 20, row * 20));
    }

    #[test]
    fn test_apple_may_spawn_on_snake() {
        // a 2x1 board only has cells the snake is already covering
        let config = GameConfig {
            board_width: 40,
            board_height: 20,
            initial_body_parts: 2,
            ..Default::default()
        };
        let snake = Snake::new(Position::new(20, 0), Direction::Right, 2, 20);
        let mut state = GameState::from_parts(
            config,
            snake,
            Position::new(0, 0),
            StdRng::seed_from_u64(SEED),
        );

        let apple = state.spawn_apple();
        assert!(state.snake().body.contains(&apple));
    }

    #[test]
    fn test_wall_collision_left_and_top() {
        let mut state = game_with(
            Snake::new(Position::new(0, 100), Direction::Left, 3, 20),
            Position::new(100, 100),
        );
        let outcome = state.tick();
        assert!(!outcome.running);
        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert!(!state.is_running());

        let mut state = game_with(
            Snake::new(Position::new(100, 0), Direction::Up, 3, 20),
            Position::new(100, 100),
        );
        assert_eq!(state.tick().collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_wall_collision_allows_one_cell_past_right_edge() {
        // small board is 200px wide; last drawable column starts at 180
        let mut state = game_with(
            Snake::new(Position::new(180, 100), Direction::Right, 3, 20),
            Position::new(0, 0),
        );

        let outcome = state.tick();
        assert!(outcome.running);
        assert_eq!(state.snake().head(), Position::new(200, 100));

        let outcome = state.tick();
        assert!(!outcome.running);
        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(state.snake().head(), Position::new(220, 100));
    }

    #[test]
    fn test_wall_collision_allows_one_cell_past_bottom_edge() {
        let mut state = game_with(
            Snake::new(Position::new(100, 180), Direction::Down, 3, 20),
            Position::new(0, 0),
        );

        assert!(state.tick().running);
        let outcome = state.tick();
        assert!(!outcome.running);
        assert_eq!(outcome.collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_self_collision() {
        // Body: (100,100), (80,100), (60,100), (40,100), (20,100)
        let snake = Snake::new(Position::new(100, 100), Direction::Right, 5, 20);
        let mut state = game_with(snake, Position::new(0, 0));

        state.set_direction(Direction::Down);
        assert!(state.tick().running); // (100,120)
        state.set_direction(Direction::Left);
        assert!(state.tick().running); // (80,120)
        state.set_direction(Direction::Up);
        let outcome = state.tick(); // (80,100) is still body

        assert!(!outcome.running);
        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert_eq!(state.snake().head(), Position::new(80, 100));
    }

    #[test]
    fn test_following_tail_is_not_a_collision() {
        // square loop of four: the head moves into the cell the tail leaves
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right, 4, 20);
        snake.body = [
            Position::new(100, 100),
            Position::new(100, 120),
            Position::new(120, 120),
            Position::new(120, 100),
        ]
        .into_iter()
        .collect();
        snake.direction = Direction::Right;
        let mut state = game_with(snake, Position::new(0, 0));

        let outcome = state.tick();
        assert!(outcome.running);
        assert_eq!(outcome.collision, None);
    }

    #[test]
    fn test_stopped_game_does_not_advance() {
        let mut state = game_with(
            Snake::new(Position::new(0, 100), Direction::Left, 3, 20),
            Position::new(100, 100),
        );
        state.tick();
        let frozen = state.snapshot();

        let outcome = state.tick();

        assert_eq!(outcome, TickOutcome::stopped());
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut state = GameState::with_seed(GameConfig::default(), SEED);
        state.tick();

        let first = state.snapshot();
        let second = state.snapshot();

        assert_eq!(first, second);
        assert_eq!(first.snake.len(), state.snake().len());
        assert_eq!(first.head(), Some(state.snake().head()));
        assert_eq!(first.apple, state.apple());
        assert_eq!(first.tick_count, 1);
        assert!(first.running);
    }
}
