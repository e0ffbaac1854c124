//! Grid Snake - a single-player snake game on a fixed-size board
//!
//! This library provides:
//! - The simulation core (game module), free of any terminal or timer code
//! - Key mapping (input module) and ratatui drawing (render module)
//! - Session bookkeeping across restarts (session module)
//! - The interactive terminal front end (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod session;

pub use error::ConfigError;
