//! Check, checkmate and stalemate detection

use serde::{Deserialize, Serialize};

use super::legality::has_legal_move;
use super::movegen::pseudo_legal_moves;
use crate::board::{Board, Color};

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

/// True iff some enemy piece's pseudo-legal destinations include the king.
///
/// Attack coverage is built from unfiltered moves; filtering would recurse
/// back into this function. A missing king is never in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_square(color) else {
        return false;
    };

    board
        .pieces_of(color.opponent())
        .any(|(from, _)| pseudo_legal_moves(board, from).contains(&king))
}

pub fn is_checkmate(board: &mut Board, color: Color) -> bool {
    is_king_in_check(board, color) && !has_legal_move(board, color)
}

pub fn is_stalemate(board: &mut Board, color: Color) -> bool {
    !is_king_in_check(board, color) && !has_legal_move(board, color)
}

/// Outcome if `to_move` has no legal moves, `None` while play continues.
pub fn game_outcome(board: &mut Board, to_move: Color) -> Option<Outcome> {
    if has_legal_move(board, to_move) {
        return None;
    }
    if is_king_in_check(board, to_move) {
        Some(Outcome::Checkmate {
            winner: to_move.opponent(),
        })
    } else {
        Some(Outcome::Stalemate)
    }
}
