use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use match3_core::{ElementSource, FieldError, GameField, MoveOutcome, SwapSink};

use crate::policy::{choose_move, Policy};

/// Knobs for an automated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoplayOptions {
    /// Stop after this many moves
    pub max_moves: u32,
    pub policy: Policy,
    /// Regenerate a dead board instead of stopping
    pub reshuffle: bool,
}

impl Default for AutoplayOptions {
    fn default() -> Self {
        Self {
            max_moves: 100,
            policy: Policy::default(),
            reshuffle: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    MoveLimit,
    NoMoves,
}

/// Outcome of [`autoplay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaySummary {
    pub moves_played: u32,
    pub score: u32,
    pub cascades: u32,
    pub reshuffles: u32,
    pub stop: StopReason,
}

/// Play moves chosen by `options.policy` until the move limit or a dead board.
///
/// Every swap and compaction shift goes to `sink`, in order. Dead boards are regenerated
/// under the field's own attempt cap.
pub fn autoplay<R: ElementSource>(
    field: &mut GameField<R>,
    options: &AutoplayOptions,
    rng: &mut impl Rng,
    sink: &mut impl SwapSink,
) -> Result<PlaySummary, FieldError> {
    let mut moves_played = 0;
    let mut cascades = 0;
    let mut reshuffles = 0;

    let stop = loop {
        if moves_played >= options.max_moves {
            break StopReason::MoveLimit;
        }

        let Some(mv) = choose_move(field, options.policy, rng) else {
            if options.reshuffle {
                let attempts = field.regenerate()?;
                reshuffles += 1;
                info!(
                    "dead board after {} move(s); regenerated in {} attempt(s)",
                    moves_played, attempts
                );
                continue;
            }
            break StopReason::NoMoves;
        };

        match field.play_move(mv.a, mv.b, sink)? {
            MoveOutcome::Resolved(report) => {
                cascades += report.cascades;
                debug!(
                    "move {}: {} scored {} (cascades {}), total {}",
                    moves_played + 1,
                    mv,
                    report.score_gained,
                    report.cascades,
                    field.score()
                );
            }
            MoveOutcome::Reverted => {
                // Search only yields winning swaps
                debug!("move {}: {} reverted", moves_played + 1, mv);
            }
        }
        moves_played += 1;
    };

    Ok(PlaySummary {
        moves_played,
        score: field.score(),
        cascades,
        reshuffles,
        stop,
    })
}
