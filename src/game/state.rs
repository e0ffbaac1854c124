use std::collections::VecDeque;

use rand::rngs::StdRng;

use super::config::GameConfig;
use super::direction::Direction;

/// A cell's top-left corner on the board, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell of `cell_size` pixels in a direction
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
    /// Direction the next tick moves the head in
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of `length` segments trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let back = direction.reverse();
        let body = std::iter::successors(Some(head), |prev| Some(prev.stepped(back, cell_size)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        // never empty: constructed with at least one segment and only ever
        // pops after pushing a new head
        self.body[0]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Advance one cell in the current direction, keeping the tail if growing
    pub fn advance(&mut self, cell_size: i32, grow: bool) -> Position {
        let new_head = self.head().stepped(self.direction, cell_size);
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }

        new_head
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head ran into its own body
    SelfCollision,
}

/// Complete simulation state
///
/// Only [`GameState::tick`] and [`GameState::set_direction`] mutate it; the
/// renderer reads it through [`GameState::snapshot`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) snake: Snake,
    pub(crate) apple: Position,
    pub(crate) score: u32,
    pub(crate) tick_count: u64,
    pub(crate) running: bool,
    pub(crate) rng: StdRng,
}

/// Read-only copy of everything the renderer needs after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub running: bool,
    /// Head first
    pub snake: Vec<Position>,
    pub apple: Position,
    pub score: u32,
    pub tick_count: u64,
    pub board_width: u32,
    pub board_height: u32,
    pub cell_size: u32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    /// Grid column/row of a position, if it lies on a drawable cell
    pub fn cell_of(&self, pos: Position) -> Option<(u32, u32)> {
        let cell = self.cell_size as i32;
        if cell == 0 || pos.x < 0 || pos.y < 0 {
            return None;
        }

        let (col, row) = ((pos.x / cell) as u32, (pos.y / cell) as u32);
        let (cols, rows) = (self.board_width / self.cell_size, self.board_height / self.cell_size);
        (col < cols && row < rows).then_some((col, row))
    }
}

impl GameState {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn apple(&self) -> Position {
        self.apple
    }

    /// Apples eaten so far
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Check if a position is inside the board, using the raw pixel bounds
    ///
    /// The right and bottom edges are inclusive, so a head sitting exactly on
    /// `board_width` or `board_height` (one cell past the last drawable cell)
    /// still counts as in bounds.
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x <= self.config.board_width as i32
            && pos.y >= 0
            && pos.y <= self.config.board_height as i32
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            running: self.running,
            snake: self.snake.body.iter().copied().collect(),
            apple: self.apple,
            score: self.score,
            tick_count: self.tick_count,
            board_width: self.config.board_width,
            board_height: self.config.board_height,
            cell_size: self.config.cell_size,
        }
    }
}
