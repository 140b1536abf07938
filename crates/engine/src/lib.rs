//! Automated play on top of the board engine.
//!
//! - [`policy`]: choosing one of the winning swaps (first, greedy, random)
//! - [`autoplay`]: driving a [`GameField`](match3_core::GameField) for a number of moves

pub mod autoplay;
pub mod policy;

pub use autoplay::{autoplay, AutoplayOptions, PlaySummary, StopReason};
pub use policy::{choose_move, score_move, Policy};
