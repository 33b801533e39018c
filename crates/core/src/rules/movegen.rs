//! Pseudo-legal move generation
//!
//! Destinations follow each piece's movement pattern and ignore whether the
//! mover's own king is left attacked. Colors are taken from the piece on the
//! origin square, so the same generator serves both sides.

use crate::board::{Board, Color, PieceKind, Square};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Pseudo-legal destinations for the piece on `from`. Empty origin yields none.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, &mut moves),
        PieceKind::Knight => step_moves(board, from, piece.color, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => sliding_moves(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => sliding_moves(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => {
            sliding_moves(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves);
            sliding_moves(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves);
        }
        PieceKind::King => step_moves(board, from, piece.color, &KING_OFFSETS, &mut moves),
    }
    moves
}

fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    let dir = color.forward();

    if let Some(one) = from.offset(dir, 0) {
        if board.get(one).is_none() {
            moves.push(one);

            if from.row == color.pawn_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.get(two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        if let Some(target) = from.offset(dir, side) {
            if board.get(target).is_some_and(|p| p.color != color) {
                moves.push(target);
            }
        }
    }
}

/// Single-step pieces: knight and king.
fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(dr, dc) in offsets {
        if let Some(target) = from.offset(dr, dc) {
            match board.get(target) {
                Some(p) if p.color == color => {}
                _ => moves.push(target),
            }
        }
    }
}

/// Casts a ray per direction. Empty squares extend the ray; the first
/// occupied square ends it and is kept only when it holds an enemy.
fn sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match board.get(next) {
                None => moves.push(next),
                Some(p) => {
                    if p.color != color {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}
