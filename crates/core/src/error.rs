use crate::types::Coord;

/// Errors reported by the board engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    #[error("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },

    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent { a: Coord, b: Coord },

    #[error("no playable board after {attempts} generation attempts")]
    GenerationExhausted { attempts: u32 },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

impl FieldError {
    pub(crate) fn out_of_bounds(c: Coord, size: usize) -> Self {
        FieldError::OutOfBounds {
            x: c.x,
            y: c.y,
            size,
        }
    }
}
