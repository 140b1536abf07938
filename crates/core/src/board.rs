//! Board module - manages the element grid
//!
//! The board is a square N x N grid where each cell holds an element id or is empty.
//! Uses a flat vector in row-major order for cache locality; the size is fixed at creation.
//! Coordinates: (x, y) where x is the column (left to right) and y the row (top to bottom).
//! Row 0 is the refill edge.

use arrayvec::ArrayVec;

use crate::error::FieldError;
use crate::types::{Cell, Coord, ElementId};

/// The element grid, `size` columns x `size` rows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Flat vector of cells, row-major order (y * size + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with every cell empty
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from explicit rows.
    ///
    /// Rows must form a square grid. Empty cells are allowed here; callers that need a
    /// fully populated grid check [`Board::is_full`].
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, FieldError> {
        let size = rows.len();
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(FieldError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                size
            )));
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, c: Coord) -> Option<usize> {
        c.in_bounds(self.size).then(|| c.y * self.size + c.x)
    }

    /// Edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at `c`. Returns None if out of bounds
    pub fn get(&self, c: Coord) -> Option<Cell> {
        self.index(c).map(|idx| self.cells[idx])
    }

    /// Set cell at `c`. Returns false if out of bounds
    pub fn set(&mut self, c: Coord, cell: Cell) -> bool {
        match self.index(c) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Element at `c`, or None if empty or out of bounds
    pub fn element(&self, c: Coord) -> Option<ElementId> {
        self.get(c).flatten()
    }

    pub fn is_empty_at(&self, c: Coord) -> bool {
        matches!(self.get(c), Some(None))
    }

    /// Exchange two cells. Returns false (and leaves the board untouched) if either is
    /// out of bounds.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(i), Some(j)) => {
                self.cells.swap(i, j);
                true
            }
            _ => false,
        }
    }

    /// In-bounds edge neighbours of `c`: left, right, up, down
    pub fn neighbors(&self, c: Coord) -> ArrayVec<Coord, 4> {
        let mut out = ArrayVec::new();
        if c.x > 0 {
            out.push(Coord::new(c.x - 1, c.y));
        }
        if c.x + 1 < self.size {
            out.push(Coord::new(c.x + 1, c.y));
        }
        if c.y > 0 {
            out.push(Coord::new(c.x, c.y - 1));
        }
        if c.y + 1 < self.size {
            out.push(Coord::new(c.x, c.y + 1));
        }
        out
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Overwrite every cell using `fill`, called once per cell in row-major order
    pub fn fill_with(&mut self, mut fill: impl FnMut(Coord) -> Cell) {
        let size = self.size;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            *cell = fill(Coord::new(idx % size, idx / size));
        }
    }

    /// Convert to nested rows for display or serialization
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl std::fmt::Display for Board {
    /// One line per row; elements as digits (base 36), empty cells as `.`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(e) => match char::from_digit(u32::from(*e), 36) {
                        Some(ch) => write!(f, "{}", ch)?,
                        None => write!(f, "#")?,
                    },
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}
