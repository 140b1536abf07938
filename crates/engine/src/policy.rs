use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use match3_core::moves::move_gain;
use match3_core::{ElementSource, GameField};
use match3_types::Move;

/// How an automated player picks among the winning swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// First move in search order
    First,
    /// Largest immediate gain; ties go to the earliest move
    #[default]
    Greedy,
    /// Uniformly random winning move
    Random,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::First => "first",
            Policy::Greedy => "greedy",
            Policy::Random => "random",
        }
    }
}

/// Immediate score of `mv`: total length of the clusters the swap creates.
///
/// Cascades never score, so this is exactly what the move adds to the score.
pub fn score_move<R: ElementSource>(field: &GameField<R>, mv: Move) -> u32 {
    move_gain(field.board(), mv)
}

/// Pick a move according to `policy`, or None on a dead board.
pub fn choose_move<R: ElementSource>(
    field: &GameField<R>,
    policy: Policy,
    rng: &mut impl Rng,
) -> Option<Move> {
    let moves = field.find_moves();
    if moves.is_empty() {
        return None;
    }
    match policy {
        Policy::First => moves.first().copied(),
        Policy::Random => Some(moves[rng.gen_range(0..moves.len())]),
        Policy::Greedy => {
            let mut best: Option<(Move, u32)> = None;
            for mv in moves {
                let gain = score_move(field, mv);
                if best.map_or(true, |(_, g)| gain > g) {
                    best = Some((mv, gain));
                }
            }
            best.map(|(mv, _)| mv)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_core::SimpleRng;
    use match3_types::Coord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> GameField<SimpleRng> {
        // Most winning swaps score 3; a few line up two runs at once for 6
        GameField::from_rows(
            vec![
                vec![1, 1, 0, 1, 2],
                vec![2, 0, 2, 0, 1],
                vec![0, 2, 0, 2, 0],
                vec![1, 0, 2, 1, 0],
                vec![2, 2, 0, 2, 2],
            ],
            3,
            SimpleRng::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_policy_names_match_cli_values() {
        for p in Policy::value_variants() {
            assert_eq!(Policy::from_str(p.as_str(), false), Ok(*p));
        }
        assert_eq!(Policy::from_str("GREEDY", true), Ok(Policy::Greedy));
        assert!(Policy::from_str("best", true).is_err());
    }

    #[test]
    fn test_first_policy_takes_search_order() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose_move(&f, Policy::First, &mut rng), f.find_moves().first().copied());
    }

    #[test]
    fn test_greedy_prefers_longer_run() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(0);
        let mv = choose_move(&f, Policy::Greedy, &mut rng).unwrap();
        let best = f.find_moves().into_iter().map(|m| score_move(&f, m)).max().unwrap();
        assert_eq!(score_move(&f, mv), best);
        assert_eq!(best, 6);
        assert_eq!(mv, Move::new(Coord::new(1, 2), Coord::new(2, 2)));
    }

    #[test]
    fn test_random_policy_returns_a_winning_move() {
        let f = field();
        let moves = f.find_moves();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mv = choose_move(&f, Policy::Random, &mut rng).unwrap();
            assert!(moves.contains(&mv));
        }
    }

    #[test]
    fn test_dead_board_has_no_choice() {
        let f = GameField::from_rows(
            vec![vec![0, 1, 2, 0], vec![1, 2, 0, 1], vec![2, 0, 1, 2], vec![0, 1, 2, 0]],
            3,
            SimpleRng::new(1),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose_move(&f, Policy::Greedy, &mut rng), None);
        assert_eq!(choose_move(&f, Policy::First, &mut rng), None);
    }
}
