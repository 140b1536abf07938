//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond geometry helpers, making them
//! usable in any context (board engine, move policies, CLI output).
//!
//! # Coordinates
//!
//! Boards are square. A cell is addressed as `(x, y)`:
//!
//! - **x**: column, `0..size` (left to right)
//! - **y**: row, `0..size` (top to bottom)
//! - Row 0 is the refill edge: new elements enter there and settle downwards.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_SIZE` | 8 | Board is 8x8 |
//! | `DEFAULT_NUM_ELEMENTS` | 5 | Five distinct element kinds |
//! | `MIN_CLUSTER_LEN` | 3 | Shortest run that clears |
//! | `MIN_BOARD_SIZE` | 3 | Smallest board that can hold a cluster |
//! | `MIN_NUM_ELEMENTS` | 2 | Fewer kinds can never produce a stable board |
//! | `DEFAULT_MAX_GENERATION_ATTEMPTS` | 1000 | Retry cap for playable-board generation |
//! | `GENERATION_CASCADE_LIMIT` | 1000 | Cascade cap for one generation attempt |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Cluster, Coord, Orientation};
//!
//! let a = Coord::new(2, 2);
//! assert!(a.is_adjacent(Coord::new(2, 3)));
//! assert!(!a.is_adjacent(Coord::new(3, 3)));
//! assert!(!a.is_adjacent(a));
//!
//! let cluster = Cluster::new(Coord::new(0, 1), 3, Orientation::Horizontal);
//! let cells: Vec<Coord> = cluster.cells().collect();
//! assert_eq!(cells, vec![Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)]);
//! ```

use serde::{Deserialize, Serialize};

/// Default board edge length (8x8)
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Default number of distinct element kinds
pub const DEFAULT_NUM_ELEMENTS: u8 = 5;

/// Minimum run length that forms a cluster
pub const MIN_CLUSTER_LEN: usize = 3;

/// Smallest supported board edge
pub const MIN_BOARD_SIZE: usize = 3;

/// Smallest supported number of element kinds
pub const MIN_NUM_ELEMENTS: u8 = 2;

/// Default cap on board regeneration attempts during construction
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 1000;

/// Clearing waves after the first that a generation attempt may run before it is discarded.
/// Resolving a player's move has no such limit.
pub const GENERATION_CASCADE_LIMIT: u32 = 1000;

/// Element identifier. Only equality is meaningful; colour is a presentation concern.
pub type ElementId = u8;

/// A board cell: `Some(element)` or `None` for an empty cell awaiting refill.
pub type Cell = Option<ElementId>;

/// A cell position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True iff the cells share an edge. Identical and diagonal cells are not adjacent.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Whether this cell lies on a `size`x`size` board.
    pub fn in_bounds(self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Step one cell along `orientation`, or `None` past the board edge.
    pub fn step(self, orientation: Orientation, size: usize) -> Option<Coord> {
        let next = match orientation {
            Orientation::Horizontal => Coord::new(self.x + 1, self.y),
            Orientation::Vertical => Coord::new(self.x, self.y + 1),
        };
        next.in_bounds(size).then_some(next)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Scan direction of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Along a row, left to right
    Horizontal,
    /// Along a column, top to bottom
    Vertical,
}

/// A maximal straight run of at least [`MIN_CLUSTER_LEN`] equal elements.
///
/// Clusters are derived from the board on demand and go stale on the next mutation.
/// A cell that belongs to both a horizontal and a vertical run shows up in two clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cluster {
    /// Leftmost (horizontal) or topmost (vertical) cell of the run
    pub origin: Coord,
    pub len: usize,
    pub orientation: Orientation,
}

impl Cluster {
    pub fn new(origin: Coord, len: usize, orientation: Orientation) -> Self {
        Self {
            origin,
            len,
            orientation,
        }
    }

    /// Cells covered by the run, starting at the origin.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let Cluster {
            origin,
            len,
            orientation,
        } = *self;
        (0..len).map(move |i| match orientation {
            Orientation::Horizontal => Coord::new(origin.x + i, origin.y),
            Orientation::Vertical => Coord::new(origin.x, origin.y + i),
        })
    }
}

/// A pair of adjacent cells whose swap creates at least one cluster.
///
/// `a` is always the left/upper cell of the pair when produced by move search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub a: Coord,
    pub b: Coord,
}

impl Move {
    pub const fn new(a: Coord, b: Coord) -> Self {
        Self { a, b }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

/// Notification that two cells exchanged contents.
///
/// During compaction `from` is the element that moved and `to` is the gap it filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapEvent {
    pub from: Coord,
    pub to: Coord,
}

impl SwapEvent {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}
