//! Self-check filtering of pseudo-legal moves

use super::check::is_king_in_check;
use super::movegen::pseudo_legal_moves;
use crate::board::{Board, Color, Move, Square};

/// Keeps the destinations that do not leave the mover's king attacked.
///
/// Each candidate is played on the board, judged, and undone before the next
/// one is tried, so `board` is unchanged on return.
pub fn filter_legal(board: &mut Board, from: Square, candidates: Vec<Square>) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    candidates
        .into_iter()
        .filter(|&to| {
            let sim = board.simulate(Move::new(from, to));
            !is_king_in_check(&sim, piece.color)
        })
        .collect()
}

/// Legal destinations for the piece on `from`.
pub fn legal_moves(board: &mut Board, from: Square) -> Vec<Square> {
    let candidates = pseudo_legal_moves(board, from);
    filter_legal(board, from, candidates)
}

/// Every legal move of `color`, origins in row-major order.
pub fn all_legal_moves(board: &mut Board, color: Color) -> Vec<Move> {
    let origins: Vec<Square> = board.pieces_of(color).map(|(sq, _)| sq).collect();

    let mut moves = Vec::new();
    for from in origins {
        for to in legal_moves(board, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Stops at the first legal move found.
pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
    let origins: Vec<Square> = board.pieces_of(color).map(|(sq, _)| sq).collect();
    origins
        .into_iter()
        .any(|from| !legal_moves(board, from).is_empty())
}
