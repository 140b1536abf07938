use serde::Serialize;

use crate::board::Board;
use crate::types::{Cell, Coord};

/// Owned copy of a field's observable state, for display layers and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSnapshot {
    pub size: usize,
    pub num_elements: u8,
    pub score: u32,
    /// Rows top to bottom; `null` marks an empty cell
    pub cells: Vec<Vec<Cell>>,
}

impl FieldSnapshot {
    pub fn from_board(board: &Board, num_elements: u8, score: u32) -> Self {
        Self {
            size: board.size(),
            num_elements,
            score,
            cells: board.to_rows(),
        }
    }

    pub fn get(&self, c: Coord) -> Option<Cell> {
        self.cells.get(c.y).and_then(|row| row.get(c.x)).copied()
    }

    /// FNV-1a 64-bit hash of the cells, row-major; empty cells hash as 0xff
    pub fn board_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for cell in self.cells.iter().flatten() {
            h ^= u64::from(cell.unwrap_or(0xff));
            h = h.wrapping_mul(0x00000100000001B3);
        }
        h
    }
}
