//! Move search
//!
//! A move is a swap of two edge-adjacent cells that leaves at least one cluster on the
//! board. Search probes every candidate pair on a scratch copy of the board, so the
//! caller's board is never touched, nothing is scored and no notification fires.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::clusters::{clusters_score, find_clusters, has_cluster};
use crate::types::{Coord, Move};

/// Every winning swap: horizontal pairs in row-major order, then vertical pairs.
pub fn find_moves(board: &Board) -> Vec<Move> {
    let mut scratch = board.clone();
    candidate_pairs(board.size())
        .filter(|&(a, b)| probe(&mut scratch, a, b))
        .map(|(a, b)| Move::new(a, b))
        .collect()
}

/// Whether any winning swap exists. Stops at the first one.
pub fn has_move(board: &Board) -> bool {
    let mut scratch = board.clone();
    candidate_pairs(board.size()).any(|(a, b)| probe(&mut scratch, a, b))
}

/// Winning swaps that involve `cell`, each with the left/upper cell first.
pub fn moves_from(board: &Board, cell: Coord) -> ArrayVec<Move, 4> {
    let mut scratch = board.clone();
    let mut out = ArrayVec::new();
    if !cell.in_bounds(board.size()) {
        return out;
    }
    for other in board.neighbors(cell) {
        if probe(&mut scratch, cell, other) {
            out.push(Move::new(cell.min(other), cell.max(other)));
        }
    }
    out
}

/// Points the first clearing wave of `mv` would earn, or 0 if it is not a winning swap.
pub fn move_gain(board: &Board, mv: Move) -> u32 {
    let mut scratch = board.clone();
    if !scratch.swap(mv.a, mv.b) {
        return 0;
    }
    clusters_score(&find_clusters(&scratch))
}

/// Swap, test, swap back.
fn probe(scratch: &mut Board, a: Coord, b: Coord) -> bool {
    scratch.swap(a, b);
    let hit = has_cluster(scratch);
    scratch.swap(a, b);
    hit
}

fn candidate_pairs(size: usize) -> impl Iterator<Item = (Coord, Coord)> {
    let horizontal = (0..size).flat_map(move |y| {
        (0..size.saturating_sub(1)).map(move |x| (Coord::new(x, y), Coord::new(x + 1, y)))
    });
    let vertical = (0..size.saturating_sub(1)).flat_map(move |y| {
        (0..size).map(move |x| (Coord::new(x, y), Coord::new(x, y + 1)))
    });
    horizontal.chain(vertical)
}
