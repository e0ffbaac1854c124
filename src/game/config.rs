use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest board side in pixels; keeps every position, including the trailing
/// initial body and the one-cell overshoot past the edge, well inside `i32`
pub const MAX_BOARD_PIXELS: u32 = 1_000_000;

/// Largest number of cells along one side of the grid
pub const MAX_GRID_CELLS: u32 = 1_000;

/// Board geometry and pacing for a game
///
/// Coordinates in the simulation are pixels; every position is a multiple of
/// `cell_size`, so the playable grid is `board_width / cell_size` by
/// `board_height / cell_size` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub board_width: u32,
    /// Board height in pixels
    pub board_height: u32,
    /// Side length of one grid cell in pixels
    pub cell_size: u32,
    /// Number of body parts the snake starts with
    pub initial_body_parts: usize,
    /// Milliseconds between ticks
    pub tick_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 600,
            board_height: 600,
            cell_size: 20,
            initial_body_parts: 6,
            tick_delay_ms: 90,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size in pixels
    pub fn new(board_width: u32, board_height: u32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Number of columns in the grid
    pub fn grid_width(&self) -> u32 {
        self.board_width / self.cell_size.max(1)
    }

    /// Number of rows in the grid
    pub fn grid_height(&self) -> u32 {
        self.board_height / self.cell_size.max(1)
    }

    /// Upper bound on the snake's length: every cell of the grid
    pub fn max_body_parts(&self) -> usize {
        self.grid_width() as usize * self.grid_height() as usize
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    /// Check that the geometry describes a usable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        for (axis, pixels) in [("width", self.board_width), ("height", self.board_height)] {
            let cells = pixels / self.cell_size;
            if pixels > MAX_BOARD_PIXELS || cells > MAX_GRID_CELLS {
                return Err(ConfigError::OversizedBoard {
                    axis,
                    pixels,
                    cells,
                    max_pixels: MAX_BOARD_PIXELS,
                    max_cells: MAX_GRID_CELLS,
                });
            }

            if pixels == 0 || pixels % self.cell_size != 0 {
                return Err(ConfigError::MisalignedBoard {
                    axis,
                    pixels,
                    cell_size: self.cell_size,
                });
            }
        }

        let max = self.max_body_parts();
        if self.initial_body_parts == 0 || self.initial_body_parts > max {
            return Err(ConfigError::InitialLength {
                length: self.initial_body_parts,
                max,
            });
        }

        if self.tick_delay_ms == 0 {
            return Err(ConfigError::ZeroTickDelay);
        }

        Ok(())
    }
}
