//! Chess Duel Core Library
//!
//! Rules engine for a human-versus-computer game: board model, move
//! generation, self-check filtering, check/checkmate detection, a one-ply
//! greedy opponent and the interactive session tying them together.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod opponent;
pub mod rules;

pub use board::{Board, Color, Move, Piece, PieceKind, Square};
pub use config::GameConfig;
pub use error::{Error, Result};
pub use game::{CheckNotice, ClickResult, GameSession, SessionEvent, Status};
pub use rules::Outcome;

/// Basic position information
#[derive(Debug)]
pub struct PositionInfo {
    pub piece_count: u32,
    pub legal_move_count: u32,
    pub side_to_move: Color,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// Analyzes a position from the point of view of `side_to_move`
pub fn analyze_position(board: &Board, side_to_move: Color) -> PositionInfo {
    let mut scratch = board.clone();
    let piece_count = scratch.pieces().count() as u32;
    let legal_move_count = rules::all_legal_moves(&mut scratch, side_to_move).len() as u32;
    let is_check = rules::is_king_in_check(&scratch, side_to_move);

    PositionInfo {
        piece_count,
        legal_move_count,
        side_to_move,
        is_check,
        is_checkmate: is_check && legal_move_count == 0,
        is_stalemate: !is_check && legal_move_count == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

    /// Same position as seen by shakmaty, without castling or en passant.
    fn reference(board: &Board, side: Color) -> Chess {
        let turn = match side {
            Color::White => "w",
            Color::Black => "b",
        };
        let fen: Fen = format!("{} {} - - 0 1", board.placement(), turn)
            .parse()
            .unwrap();
        fen.into_position(CastlingMode::Standard).unwrap()
    }

    fn assert_agrees(board: &Board, side: Color) {
        let ours = analyze_position(board, side);
        let theirs = reference(board, side);
        assert_eq!(ours.legal_move_count as usize, theirs.legal_moves().len(), "{}", board);
        assert_eq!(ours.is_check, theirs.is_check(), "{}", board);
        assert_eq!(ours.is_checkmate, theirs.is_checkmate(), "{}", board);
        assert_eq!(ours.is_stalemate, theirs.is_stalemate(), "{}", board);
    }

    #[test]
    fn test_starting_position() {
        let board = Board::standard();
        let info = analyze_position(&board, Color::White);

        assert_eq!(info.piece_count, 32);
        assert_eq!(info.side_to_move, Color::White);
        // 16 pawn moves + 4 knight moves
        assert_eq!(info.legal_move_count, 20);
        assert!(!info.is_check);
        assert!(!info.is_checkmate);
    }

    #[test]
    fn test_agrees_with_shakmaty() {
        let both = [Color::White, Color::Black];
        let positions: [(&str, &[Color]); 6] = [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", &both),
            ("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR", &both),
            ("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR", &both),
            ("r3k2r/pp1q1ppp/2n1bn2/2bpp3/3PP3/2N1BN2/PPQ2PPP/R3KB1R", &both),
            // white in check, so only white may be the side to move
            ("4k3/8/8/8/8/8/4r3/4K3", &[Color::White]),
            ("k7/8/1Q6/8/8/8/8/7K", &both),
        ];
        for (placement, sides) in positions {
            let board = board_from_placement(placement);
            for &side in sides {
                assert_agrees(&board, side);
            }
        }
    }

    #[test]
    fn test_fools_mate_agrees_with_shakmaty() {
        let mut board = Board::standard();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            board.apply(Move::new(from.parse().unwrap(), to.parse().unwrap()));
        }
        let info = analyze_position(&board, Color::White);
        assert!(info.is_checkmate);
        assert_eq!(info.legal_move_count, 0);
        assert_agrees(&board, Color::White);
    }

    fn board_from_placement(placement: &str) -> Board {
        let mut diagram = String::new();
        for rank in placement.split('/') {
            for c in rank.chars() {
                match c.to_digit(10) {
                    Some(n) => diagram.push_str(&".".repeat(n as usize)),
                    None => diagram.push(c),
                }
            }
            diagram.push('\n');
        }
        let board = Board::from_diagram(&diagram).unwrap();
        assert_eq!(board.placement(), placement);
        board
    }
}
