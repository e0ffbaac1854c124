//! Core simulation for the snake game
//!
//! Nothing in here touches the terminal or a clock. A front end drives a
//! [`GameState`] by calling [`GameState::set_direction`] on key presses and
//! [`GameState::tick`] on a fixed interval, then draws a [`Snapshot`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::TickOutcome;
pub use state::{CollisionType, GameState, Position, Snake, Snapshot};
