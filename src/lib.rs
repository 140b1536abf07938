//! Match-3 (workspace facade crate).
//!
//! Re-exports the member crates as `match3::{core,engine,types}` and adds the
//! configuration layer used by the `match3` binary.

pub mod config;

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
