use thiserror::Error;

/// Reasons a [`GameConfig`](crate::game::GameConfig) cannot back a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("board {axis} of {pixels}px is not a positive multiple of the {cell_size}px cell size")]
    MisalignedBoard {
        axis: &'static str,
        pixels: u32,
        cell_size: u32,
    },

    #[error(
        "board {axis} of {pixels}px ({cells} cells) exceeds the limit of {max_pixels}px and {max_cells} cells"
    )]
    OversizedBoard {
        axis: &'static str,
        pixels: u32,
        cells: u32,
        max_pixels: u32,
        max_cells: u32,
    },

    #[error("initial snake length {length} must be between 1 and {max} cells")]
    InitialLength { length: usize, max: usize },

    #[error("tick delay must be greater than zero")]
    ZeroTickDelay,
}
