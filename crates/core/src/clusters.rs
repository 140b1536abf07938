//! Cluster detection
//!
//! Rows are scanned left to right and columns top to bottom as two independent passes.
//! A run grows while consecutive cells hold the same element and closes at a mismatch,
//! an empty cell or the board edge. Runs of [`MIN_CLUSTER_LEN`] or more are reported.
//! Runs crossing at a cell are reported once per axis and never merged.

use std::ops::ControlFlow;

use crate::board::Board;
use crate::types::{Cluster, Coord, ElementId, Orientation, MIN_CLUSTER_LEN};

/// All clusters on the board: horizontal ones row by row, then vertical ones column by column.
pub fn find_clusters(board: &Board) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let flow = visit_clusters(board, |cluster| {
        clusters.push(cluster);
        ControlFlow::Continue(())
    });
    // The visitor never breaks, so every line was scanned
    debug_assert!(flow.is_continue());
    clusters
}

/// Whether at least one cluster exists. Stops at the first one found.
pub fn has_cluster(board: &Board) -> bool {
    visit_clusters(board, |_| ControlFlow::Break(())).is_break()
}

/// Score value of a set of clusters: one point per cell per cluster.
pub fn clusters_score(clusters: &[Cluster]) -> u32 {
    clusters.iter().map(|c| c.len as u32).sum()
}

fn visit_clusters(
    board: &Board,
    mut visit: impl FnMut(Cluster) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let size = board.size();
    for y in 0..size {
        scan_line(board, Coord::new(0, y), Orientation::Horizontal, &mut visit)?;
    }
    for x in 0..size {
        scan_line(board, Coord::new(x, 0), Orientation::Vertical, &mut visit)?;
    }
    ControlFlow::Continue(())
}

fn scan_line(
    board: &Board,
    start: Coord,
    orientation: Orientation,
    visit: &mut impl FnMut(Cluster) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let size = board.size();
    let mut run_start = start;
    let mut run_len = 0usize;
    let mut run_value: Option<ElementId> = None;

    let mut cursor = start.in_bounds(size).then_some(start);
    while let Some(c) = cursor {
        let value = board.element(c);
        match value {
            Some(e) if run_value == Some(e) => run_len += 1,
            _ => {
                close_run(run_start, run_len, orientation, visit)?;
                run_start = c;
                run_len = usize::from(value.is_some());
                run_value = value;
            }
        }
        cursor = c.step(orientation, size);
    }
    close_run(run_start, run_len, orientation, visit)
}

#[inline]
fn close_run(
    origin: Coord,
    len: usize,
    orientation: Orientation,
    visit: &mut impl FnMut(Cluster) -> ControlFlow<()>,
) -> ControlFlow<()> {
    if len >= MIN_CLUSTER_LEN {
        visit(Cluster::new(origin, len, orientation))
    } else {
        ControlFlow::Continue(())
    }
}
