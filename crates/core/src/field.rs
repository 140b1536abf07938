//! Game field module - the board engine
//!
//! This module ties together the board, the element source, cluster detection, gravity
//! and move search. It owns the score and enforces the at-rest guarantees:
//! no cluster on the board and at least one winning swap after construction.

use arrayvec::ArrayVec;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::clusters::{clusters_score, find_clusters, has_cluster};
use crate::error::FieldError;
use crate::gravity::{settle, SwapSink};
use crate::moves::{find_moves, has_move, moves_from};
use crate::rng::ElementSource;
use crate::snapshot::FieldSnapshot;
use crate::types::*;

/// Shape of a new field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Edge length of the square board
    pub size: usize,
    /// Number of distinct elements, ids `0..num_elements`
    pub num_elements: u8,
    /// Give up generating a playable board after this many tries
    pub max_generation_attempts: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            num_elements: DEFAULT_NUM_ELEMENTS,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }
}

impl FieldConfig {
    pub fn new(size: usize, num_elements: u8) -> Self {
        Self {
            size,
            num_elements,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.size < MIN_BOARD_SIZE {
            return Err(FieldError::InvalidConfig(format!(
                "size must be >= {}, got {}",
                MIN_BOARD_SIZE, self.size
            )));
        }
        if self.num_elements < MIN_NUM_ELEMENTS {
            return Err(FieldError::InvalidConfig(format!(
                "num_elements must be >= {}, got {}",
                MIN_NUM_ELEMENTS, self.num_elements
            )));
        }
        if self.max_generation_attempts == 0 {
            return Err(FieldError::InvalidConfig(
                "max_generation_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// What one `resolve_clusters` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResolveReport {
    /// Points added to the score (first wave only)
    pub score_gained: u32,
    /// Clusters found in the first wave
    pub clusters_cleared: u32,
    /// Distinct cells emptied across all waves
    pub cells_cleared: u32,
    /// Clearing waves after the first, caused by refills
    pub cascades: u32,
    /// Compaction shifts reported to the sink
    pub shifts: u32,
}

impl ResolveReport {
    /// True when the board was already stable
    pub fn is_noop(&self) -> bool {
        self.clusters_cleared == 0
    }
}

/// Result of [`GameField::play_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The swap made no cluster and was undone
    Reverted,
    /// The swap made at least one cluster, which was resolved
    Resolved(ResolveReport),
}

impl MoveOutcome {
    pub fn score_gained(&self) -> u32 {
        match self {
            MoveOutcome::Reverted => 0,
            MoveOutcome::Resolved(report) => report.score_gained,
        }
    }
}

/// Cascade count past which a resolve is logged as unusually long
const LONG_CASCADE_WARNING: u32 = 10_000;

/// The board engine: grid state, score and element source
#[derive(Debug, Clone)]
pub struct GameField<R> {
    board: Board,
    num_elements: u8,
    score: u32,
    max_generation_attempts: u32,
    source: R,
}

impl<R: ElementSource> GameField<R> {
    /// Generate a playable field: no clusters on the board and at least one winning swap.
    pub fn new(config: FieldConfig, source: R) -> Result<Self, FieldError> {
        config.validate()?;
        let mut field = Self {
            board: Board::new(config.size),
            num_elements: config.num_elements,
            score: 0,
            max_generation_attempts: config.max_generation_attempts,
            source,
        };
        field.generate()?;
        Ok(field)
    }

    /// Build a field from explicit rows.
    ///
    /// The grid must be square, fully populated, and hold only ids below `num_elements`.
    /// Clusters are allowed and stay on the board until the next resolve.
    /// Later regenerations use the default attempt cap.
    pub fn from_rows(
        rows: Vec<Vec<ElementId>>,
        num_elements: u8,
        source: R,
    ) -> Result<Self, FieldError> {
        let board = Board::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )?;
        let config = FieldConfig::new(board.size(), num_elements);
        config.validate()?;
        if let Some(e) = board.cells().iter().flatten().find(|&&e| e >= num_elements) {
            return Err(FieldError::InvalidGrid(format!(
                "element {} is out of range for {} elements",
                e, num_elements
            )));
        }
        Ok(Self {
            board,
            num_elements,
            score: 0,
            max_generation_attempts: config.max_generation_attempts,
            source,
        })
    }

    /// Throw the board away and generate a new playable one. Score is kept.
    ///
    /// Uses the same attempt cap as construction. Returns the number of attempts it took.
    pub fn regenerate(&mut self) -> Result<u32, FieldError> {
        self.generate()
    }

    fn generate(&mut self) -> Result<u32, FieldError> {
        let max_attempts = self.max_generation_attempts;
        for attempt in 1..=max_attempts {
            let num_elements = self.num_elements;
            let source = &mut self.source;
            self.board
                .fill_with(|_| Some(source.next_element(num_elements)));
            // A draw that keeps cascading is discarded like a dead board
            self.settle_clusters(&mut (), false, Some(GENERATION_CASCADE_LIMIT));

            if !has_cluster(&self.board) && has_move(&self.board) {
                debug!(
                    "generated {}x{} field with {} elements after {} attempt(s)",
                    self.board.size(),
                    self.board.size(),
                    self.num_elements,
                    attempt
                );
                return Ok(attempt);
            }
            trace!("attempt {} produced a dead board, regenerating", attempt);
        }
        Err(FieldError::GenerationExhausted {
            attempts: max_attempts,
        })
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn num_elements(&self) -> u8 {
        self.num_elements
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Read-only view of the grid
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cell at `c`, or None if out of bounds
    pub fn get(&self, c: Coord) -> Option<Cell> {
        self.board.get(c)
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Attempt cap used by [`GameField::regenerate`]
    pub fn max_generation_attempts(&self) -> u32 {
        self.max_generation_attempts
    }

    /// True iff `a` and `b` are distinct in-bounds cells sharing an edge
    pub fn can_swap(&self, a: Coord, b: Coord) -> bool {
        let size = self.board.size();
        a.in_bounds(size) && b.in_bounds(size) && a.is_adjacent(b)
    }

    /// Exchange two cells.
    ///
    /// Adjacency is the caller's business (see [`GameField::can_swap`]); this neither checks
    /// it nor resolves. Out-of-range cells are rejected and leave the board untouched.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), FieldError> {
        let size = self.board.size();
        for c in [a, b] {
            if !c.in_bounds(size) {
                return Err(FieldError::out_of_bounds(c, size));
            }
        }
        self.board.swap(a, b);
        Ok(())
    }

    /// Clusters currently on the board
    pub fn find_clusters(&self) -> Vec<Cluster> {
        find_clusters(&self.board)
    }

    /// Every winning swap on the current board
    pub fn find_moves(&self) -> Vec<Move> {
        find_moves(&self.board)
    }

    /// Winning swaps involving `cell`
    pub fn moves_from(&self, cell: Coord) -> ArrayVec<Move, 4> {
        moves_from(&self.board, cell)
    }

    pub fn has_moves(&self) -> bool {
        has_move(&self.board)
    }

    /// No cluster on the board and no empty cell
    pub fn is_stable(&self) -> bool {
        self.board.is_full() && !has_cluster(&self.board)
    }

    /// Clear, cascade and refill until no cluster remains, discarding notifications.
    pub fn resolve_clusters(&mut self) -> ResolveReport {
        self.resolve_clusters_with(&mut ())
    }

    /// Clear, cascade and refill until no cluster remains.
    ///
    /// Only the first wave of clusters scores. Every compaction shift is reported to `sink`
    /// as it happens. On a stable board this is a no-op.
    ///
    /// There is no cascade limit: this returns once the board is free of clusters, so an
    /// element source that refills clusters forever never returns.
    pub fn resolve_clusters_with(&mut self, sink: &mut impl SwapSink) -> ResolveReport {
        let report = self.settle_clusters(sink, true, None);
        if report.cascades >= LONG_CASCADE_WARNING {
            warn!(
                "resolve took {} cascades before the board settled",
                report.cascades
            );
        }
        if !report.is_noop() {
            debug!(
                "resolved {} cluster(s) for {} point(s), {} cascade(s), {} shift(s); score {}",
                report.clusters_cleared,
                report.score_gained,
                report.cascades,
                report.shifts,
                self.score
            );
        }
        report
    }

    /// Clear and refill until no cluster remains, or until `cascade_limit` extra waves have
    /// run, in which case clusters are left on the board.
    fn settle_clusters(
        &mut self,
        sink: &mut impl SwapSink,
        scoring: bool,
        cascade_limit: Option<u32>,
    ) -> ResolveReport {
        let mut report = ResolveReport::default();
        let mut first = true;
        loop {
            let clusters = find_clusters(&self.board);
            if clusters.is_empty() {
                return report;
            }

            if first {
                report.clusters_cleared = clusters.len() as u32;
                if scoring {
                    report.score_gained = clusters_score(&clusters);
                    self.score = self.score.saturating_add(report.score_gained);
                }
            } else {
                if cascade_limit.is_some_and(|limit| report.cascades >= limit) {
                    return report;
                }
                report.cascades += 1;
                trace!("cascade {}: {} cluster(s)", report.cascades, clusters.len());
            }
            first = false;

            for cell in clusters.iter().flat_map(|c| c.cells()) {
                if !self.board.is_empty_at(cell) {
                    self.board.set(cell, None);
                    report.cells_cleared += 1;
                }
            }

            report.shifts += settle(&mut self.board, self.num_elements, &mut self.source, sink);
        }
    }

    /// Try a player move: swap two adjacent cells and resolve.
    ///
    /// A swap that makes no cluster is swapped back and nothing else changes. Both the swap
    /// and its undo are reported to `sink` before any compaction shifts.
    pub fn play_move(
        &mut self,
        a: Coord,
        b: Coord,
        sink: &mut impl SwapSink,
    ) -> Result<MoveOutcome, FieldError> {
        let size = self.board.size();
        for c in [a, b] {
            if !c.in_bounds(size) {
                return Err(FieldError::out_of_bounds(c, size));
            }
        }
        if !a.is_adjacent(b) {
            return Err(FieldError::NotAdjacent { a, b });
        }

        self.board.swap(a, b);
        sink.on_swap(SwapEvent::new(a, b));

        if !has_cluster(&self.board) {
            self.board.swap(a, b);
            sink.on_swap(SwapEvent::new(b, a));
            trace!("move {} <-> {} made no cluster, reverted", a, b);
            return Ok(MoveOutcome::Reverted);
        }

        Ok(MoveOutcome::Resolved(self.resolve_clusters_with(sink)))
    }

    /// Owned copy of the observable state
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::from_board(&self.board, self.num_elements, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SequenceSource, SimpleRng};

    #[test]
    fn test_config_validation() {
        assert!(FieldConfig::default().validate().is_ok());
        assert!(matches!(
            FieldConfig::new(2, 5).validate(),
            Err(FieldError::InvalidConfig(_))
        ));
        assert!(matches!(
            FieldConfig::new(8, 1).validate(),
            Err(FieldError::InvalidConfig(_))
        ));
        let cfg = FieldConfig {
            max_generation_attempts: 0,
            ..FieldConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_new_field_is_playable() {
        let field = GameField::new(FieldConfig::default(), SimpleRng::new(42)).unwrap();
        assert_eq!(field.size(), 8);
        assert_eq!(field.score(), 0);
        assert!(field.is_stable());
        assert!(field.find_clusters().is_empty());
        assert!(!field.find_moves().is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameField::new(FieldConfig::default(), SimpleRng::new(7)).unwrap();
        let b = GameField::new(FieldConfig::default(), SimpleRng::new(7)).unwrap();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_constant_source_exhausts_generation() {
        // Every fill is one colour; every refill is too, so resolve never leaves a move
        let cfg = FieldConfig {
            max_generation_attempts: 5,
            ..FieldConfig::new(4, 3)
        };
        let err = GameField::new(cfg, SequenceSource::constant(1)).unwrap_err();
        assert_eq!(err, FieldError::GenerationExhausted { attempts: 5 });
    }

    #[test]
    fn test_regeneration_cap_comes_from_config() {
        let cfg = FieldConfig {
            max_generation_attempts: 7,
            ..FieldConfig::new(5, 4)
        };
        let field = GameField::new(cfg, SimpleRng::new(2)).unwrap();
        assert_eq!(field.max_generation_attempts(), 7);

        let rows = vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]];
        let field = GameField::from_rows(rows, 3, SimpleRng::new(1)).unwrap();
        assert_eq!(field.max_generation_attempts(), DEFAULT_MAX_GENERATION_ATTEMPTS);
    }

    #[test]
    fn test_cascades_are_not_capped_outside_generation() {
        // A source that refills this column with 1s keeps clearing it for many waves
        let rows = vec![vec![1, 0, 2], vec![1, 2, 0], vec![1, 0, 2]];
        let mut script = vec![1; 3 * 1500];
        script.extend([0, 2, 0]);
        let mut field = GameField::from_rows(rows, 3, SequenceSource::new(script)).unwrap();

        let report = field.resolve_clusters();
        assert!(report.cascades > GENERATION_CASCADE_LIMIT);
        assert!(field.find_clusters().is_empty());
        assert_eq!(field.score(), 3);
    }

    #[test]
    fn test_from_rows_validates_elements() {
        let rows = vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 5]];
        assert!(matches!(
            GameField::from_rows(rows, 3, SimpleRng::new(1)),
            Err(FieldError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_swap_rejects_out_of_bounds() {
        let mut field = GameField::new(FieldConfig::default(), SimpleRng::new(3)).unwrap();
        let before = field.board().clone();
        let err = field.swap(Coord::new(0, 0), Coord::new(8, 0)).unwrap_err();
        assert_eq!(err, FieldError::OutOfBounds { x: 8, y: 0, size: 8 });
        assert_eq!(field.board(), &before);
    }

    #[test]
    fn test_swap_is_unchecked_for_adjacency() {
        let rows = vec![vec![0, 1, 0], vec![1, 0, 1], vec![2, 2, 0]];
        let mut field = GameField::from_rows(rows, 3, SimpleRng::new(1)).unwrap();
        field.swap(Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        assert_eq!(field.get(Coord::new(0, 0)), Some(Some(0)));
        field.swap(Coord::new(1, 0), Coord::new(0, 2)).unwrap();
        assert_eq!(field.get(Coord::new(1, 0)), Some(Some(2)));
        assert_eq!(field.get(Coord::new(0, 2)), Some(Some(1)));
    }

    #[test]
    fn test_can_swap() {
        let field = GameField::new(FieldConfig::default(), SimpleRng::new(5)).unwrap();
        assert!(field.can_swap(Coord::new(2, 2), Coord::new(2, 3)));
        assert!(!field.can_swap(Coord::new(2, 2), Coord::new(3, 3)));
        assert!(!field.can_swap(Coord::new(2, 2), Coord::new(2, 2)));
        assert!(!field.can_swap(Coord::new(7, 7), Coord::new(8, 7)));
    }
}
