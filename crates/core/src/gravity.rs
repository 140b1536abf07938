//! Gravity module - column compaction and refill
//!
//! Elements settle towards the bottom row; gaps bubble up to row 0 where fresh elements
//! are drawn. Every single shift is reported to a [`SwapSink`] so an animating caller can
//! replay it, in the order the shifts happen.

use crate::board::Board;
use crate::rng::ElementSource;
use crate::types::{Coord, SwapEvent};

/// Receiver of swap notifications.
///
/// Called synchronously while the field is mutably borrowed, so a sink cannot reach back
/// into the engine.
pub trait SwapSink {
    fn on_swap(&mut self, event: SwapEvent);
}

/// Discards every notification
impl SwapSink for () {
    fn on_swap(&mut self, _event: SwapEvent) {}
}

/// Collects notifications in order; drain it after the call
impl SwapSink for Vec<SwapEvent> {
    fn on_swap(&mut self, event: SwapEvent) {
        self.push(event);
    }
}

impl<S: SwapSink + ?Sized> SwapSink for &mut S {
    fn on_swap(&mut self, event: SwapEvent) {
        (**self).on_swap(event);
    }
}

/// Adapts a closure into a [`SwapSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(SwapEvent)> SwapSink for FnSink<F> {
    fn on_swap(&mut self, event: SwapEvent) {
        (self.0)(event);
    }
}

/// One compaction sweep, bottom to top.
///
/// Each element with a run of empty cells directly below it drops into the deepest cell of
/// that run. Returns the number of shifts made; 0 means every column is already packed.
pub fn compact(board: &mut Board, sink: &mut impl SwapSink) -> u32 {
    let size = board.size();
    let mut shifts = 0;
    if size < 2 {
        return 0;
    }

    for y in (0..size - 1).rev() {
        for x in 0..size {
            let here = Coord::new(x, y);
            if board.is_empty_at(here) {
                continue;
            }
            let mut gap = 0;
            while y + gap + 1 < size && board.is_empty_at(Coord::new(x, y + gap + 1)) {
                gap += 1;
            }
            if gap != 0 {
                let target = Coord::new(x, y + gap);
                board.swap(here, target);
                sink.on_swap(SwapEvent::new(here, target));
                shifts += 1;
            }
        }
    }
    shifts
}

/// Draw a fresh element into every empty cell of row 0. Returns the number of cells filled.
pub fn refill_top(board: &mut Board, num_elements: u8, source: &mut impl ElementSource) -> u32 {
    let mut filled = 0;
    for x in 0..board.size() {
        let c = Coord::new(x, 0);
        if board.is_empty_at(c) {
            board.set(c, Some(source.next_element(num_elements)));
            filled += 1;
        }
    }
    filled
}

/// Compact and refill until no empty cell remains. Returns the total number of shifts.
///
/// Every round fills all of row 0, so a column with `k` gaps is settled after at most
/// `k` rounds.
pub fn settle(
    board: &mut Board,
    num_elements: u8,
    source: &mut impl ElementSource,
    sink: &mut impl SwapSink,
) -> u32 {
    let mut shifts = 0;
    loop {
        shifts += compact(board, sink);
        refill_top(board, num_elements, source);
        if board.is_full() {
            return shifts;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::Cell;

    fn column(cells: &[Cell]) -> Board {
        // Single meaningful column at x = 0; the rest is filled with 0
        let size = cells.len();
        let rows = cells
            .iter()
            .map(|&c| {
                let mut row = vec![Some(0); size];
                row[0] = c;
                row
            })
            .collect();
        Board::from_rows(rows).unwrap()
    }

    fn column_values(board: &Board) -> Vec<Cell> {
        (0..board.size())
            .map(|y| board.get(Coord::new(0, y)).flatten())
            .collect()
    }

    #[test]
    fn test_compact_drops_into_deepest_gap() {
        let mut board = column(&[Some(1), Some(2), None, None]);
        let mut events: Vec<SwapEvent> = Vec::new();
        let shifts = compact(&mut board, &mut events);

        assert_eq!(shifts, 2);
        assert_eq!(column_values(&board), vec![None, None, Some(1), Some(2)]);
        assert_eq!(
            events,
            vec![
                SwapEvent::new(Coord::new(0, 1), Coord::new(0, 3)),
                SwapEvent::new(Coord::new(0, 0), Coord::new(0, 2)),
            ]
        );
    }

    #[test]
    fn test_compact_packed_column_is_noop() {
        let mut board = column(&[None, None, Some(3), Some(4)]);
        let before = board.clone();
        let mut events: Vec<SwapEvent> = Vec::new();
        assert_eq!(compact(&mut board, &mut events), 0);
        assert!(events.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_compact_split_gaps() {
        let mut board = column(&[Some(1), None, Some(2), None]);
        let mut events: Vec<SwapEvent> = Vec::new();
        compact(&mut board, &mut events);
        assert_eq!(column_values(&board), vec![None, None, Some(1), Some(2)]);
        for ev in &events {
            assert_eq!(ev.from.x, ev.to.x);
            assert!(ev.to.y > ev.from.y);
        }
    }

    #[test]
    fn test_refill_only_touches_row_zero() {
        let mut board = column(&[None, None, Some(3)]);
        let mut source = SequenceSource::constant(4);
        assert_eq!(refill_top(&mut board, 5, &mut source), 1);
        assert_eq!(column_values(&board), vec![Some(4), None, Some(3)]);
    }

    #[test]
    fn test_settle_fills_every_gap_in_draw_order() {
        let mut board = column(&[None, None, None, Some(3)]);
        let mut source = SequenceSource::new(vec![1, 2, 4]);
        let mut events: Vec<SwapEvent> = Vec::new();
        let shifts = settle(&mut board, 5, &mut source, &mut events);

        assert!(board.is_full());
        // First drawn element falls furthest
        assert_eq!(column_values(&board), vec![Some(4), Some(2), Some(1), Some(3)]);
        assert_eq!(shifts as usize, events.len());
        assert_eq!(shifts, 2);
    }

    #[test]
    fn test_fn_sink_receives_events() {
        let mut board = column(&[Some(1), None, Some(2)]);
        let mut seen = Vec::new();
        compact(&mut board, &mut FnSink(|ev: SwapEvent| seen.push(ev)));
        assert_eq!(seen, vec![SwapEvent::new(Coord::new(0, 0), Coord::new(0, 1))]);
    }
}
