//! One-ply greedy move choice for the automated side

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Color, Move};
use crate::rules::{all_legal_moves, is_king_in_check};

/// Priority band a chosen move was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Leaves the opposing king in check
    Check,
    /// Lands on an occupied square
    Capture,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub mv: Move,
    pub tier: Tier,
}

/// Picks a legal move for `color`, or `None` if it has none.
pub fn select_move<R: Rng + ?Sized>(board: &mut Board, color: Color, rng: &mut R) -> Option<Selection> {
    let candidates = all_legal_moves(board, color);
    select_from(board, color, &candidates, rng)
}

/// Ranks `candidates` (assumed legal) and draws uniformly within the best
/// non-empty tier: check, then capture, then anything.
pub fn select_from<R: Rng + ?Sized>(
    board: &mut Board,
    color: Color,
    candidates: &[Move],
    rng: &mut R,
) -> Option<Selection> {
    if candidates.is_empty() {
        return None;
    }

    let checking: Vec<Move> = candidates
        .iter()
        .copied()
        .filter(|&mv| gives_check(board, mv, color))
        .collect();
    if let Some(&mv) = checking.choose(rng) {
        debug!(%mv, options = checking.len(), "selected checking move");
        return Some(Selection { mv, tier: Tier::Check });
    }

    let captures: Vec<Move> = candidates
        .iter()
        .copied()
        .filter(|mv| board.get(mv.to).is_some())
        .collect();
    if let Some(&mv) = captures.choose(rng) {
        debug!(%mv, options = captures.len(), "selected capture");
        return Some(Selection { mv, tier: Tier::Capture });
    }

    let mv = *candidates.choose(rng)?;
    debug!(%mv, options = candidates.len(), "selected quiet move");
    Some(Selection { mv, tier: Tier::Quiet })
}

fn gives_check(board: &mut Board, mv: Move, mover: Color) -> bool {
    let sim = board.simulate(mv);
    is_king_in_check(&sim, mover.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_no_moves_selects_nothing() {
        let mut board = Board::from_diagram(
            "
            k.......
            ........
            .Q......
            ........
            ........
            ........
            ........
            .......K
            ",
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_move(&mut board, Color::Black, &mut rng).is_none());
    }

    #[test]
    fn test_check_beats_capture() {
        // a8 rook can slide to e8 and check down the file; a5 knight can take b3
        let mut board = Board::from_diagram(
            "
            r......k
            ........
            ........
            n.......
            ........
            .P......
            ........
            ....K...
            ",
        )
        .unwrap();
        let check = Move::new(sq("a8"), sq("e8"));
        let capture = Move::new(sq("a5"), sq("b3"));
        let before = board.clone();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen = select_from(&mut board, Color::Black, &[capture, check], &mut rng).unwrap();
            assert_eq!(chosen.mv, check);
            assert_eq!(chosen.tier, Tier::Check);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_beats_quiet() {
        let mut board = Board::from_diagram(
            "
            .......k
            ........
            ........
            n.......
            ........
            .P......
            ........
            .......K
            ",
        )
        .unwrap();
        let capture = Move::new(sq("a5"), sq("b3"));
        let quiet = Move::new(sq("a5"), sq("c6"));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen = select_from(&mut board, Color::Black, &[quiet, capture], &mut rng).unwrap();
            assert_eq!(chosen.mv, capture);
            assert_eq!(chosen.tier, Tier::Capture);
        }
    }

    #[test]
    fn test_quiet_draws_from_all_candidates() {
        let mut board = Board::standard();
        let legal = all_legal_moves(&mut board, Color::Black);
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen = select_move(&mut board, Color::Black, &mut rng).unwrap();
            assert_eq!(chosen.tier, Tier::Quiet);
            assert!(legal.contains(&chosen.mv));
            seen.insert(chosen.mv);
        }
        assert!(seen.len() > 1);
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_selection_is_always_legal() {
        let mut board = Board::from_diagram(
            "
            ....r..k
            ........
            ........
            ........
            ........
            ........
            ...Q....
            ....K...
            ",
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let chosen = select_move(&mut board, Color::White, &mut rng).unwrap();
            let mut after = board.clone();
            after.apply(chosen.mv);
            assert!(!is_king_in_check(&after, Color::White));
        }
    }
}
