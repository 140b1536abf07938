//! Board engine - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: cluster detection, clearing with cascades,
//! column compaction with refill, and exhaustive move search.
//! It has **no dependencies** on rendering, input, timers or I/O, making it:
//!
//! - **Deterministic**: Same element source produces identical games
//! - **Testable**: Scripted sources ([`SequenceSource`]) reproduce any refill sequence
//! - **Portable**: Can sit behind a terminal, a GUI or a headless runner
//!
//! # Module Structure
//!
//! - [`board`]: N x N element grid with flat storage
//! - [`clusters`]: Horizontal and vertical run detection
//! - [`gravity`]: Compaction, refill and swap notifications
//! - [`moves`]: Winning-swap search on a scratch copy
//! - [`field`]: [`GameField`], the engine owning board, score and element source
//! - [`rng`]: Element sources (seeded LCG, scripted sequences, `rand`)
//! - [`snapshot`]: Owned, serializable view of a field
//!
//! # Rules
//!
//! - **Cluster**: 3 or more equal elements in a straight line; rows and columns are scanned
//!   independently, so an L or T shape counts as two clusters
//! - **Scoring**: one point per cell per cluster, for the first clearing wave of a resolve only
//! - **Gravity**: elements fall towards the last row, new elements enter at row 0
//! - **Swaps**: only edge-adjacent cells may be swapped by a player
//!
//! # Example
//!
//! ```
//! use match3_core::types::SwapEvent;
//! use match3_core::{FieldConfig, GameField, MoveOutcome, SimpleRng};
//!
//! // Create a playable 8x8 field with 5 element kinds
//! let mut field = GameField::new(FieldConfig::default(), SimpleRng::new(12345)).unwrap();
//! assert!(field.find_clusters().is_empty());
//!
//! // Play the first available move and collect the compaction shifts
//! let mv = field.find_moves()[0];
//! let mut shifts: Vec<SwapEvent> = Vec::new();
//! let outcome = field.play_move(mv.a, mv.b, &mut shifts).unwrap();
//!
//! assert!(matches!(outcome, MoveOutcome::Resolved(_)));
//! assert!(field.score() >= 3);
//! assert!(field.find_clusters().is_empty());
//! ```

pub mod board;
pub mod clusters;
pub mod error;
pub mod field;
pub mod gravity;
pub mod moves;
pub mod rng;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::FieldError;
pub use field::{FieldConfig, GameField, MoveOutcome, ResolveReport};
pub use gravity::{FnSink, SwapSink};
pub use rng::{ElementSource, SequenceSource, SimpleRng};
pub use snapshot::FieldSnapshot;
