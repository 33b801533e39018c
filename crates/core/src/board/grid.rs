//! The 8x8 grid and its cell access

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use super::types::{in_bounds, Color, Move, Piece, PieceKind, Square};
use crate::error::{Error, Result};

/// 8x8 grid of optional pieces, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard 32-piece starting layout
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in PieceKind::BACK_RANK.iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(*kind, Color::Black));
            board.cells[7][col] = Some(Piece::new(*kind, Color::White));
        }
        for col in 0..8 {
            board.cells[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.cells[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
        }
        board
    }

    /// Parses eight lines of eight characters, row 0 first.
    ///
    /// FEN letters mark pieces (uppercase for white) and `.` marks an empty
    /// cell. Blank lines and surrounding whitespace are ignored.
    pub fn from_diagram(diagram: &str) -> Result<Self> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if rows.len() != 8 {
            return Err(Error::Diagram(format!("expected 8 rows, found {}", rows.len())));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != 8 {
                return Err(Error::Diagram(format!(
                    "row {} has {} cells",
                    row,
                    chars.len()
                )));
            }
            for (col, c) in chars.into_iter().enumerate() {
                board.cells[row][col] = match c {
                    '.' => None,
                    other => Some(
                        Piece::from_letter(other)
                            .ok_or_else(|| Error::Diagram(format!("unknown piece '{}'", other)))?,
                    ),
                };
            }
        }
        Ok(board)
    }

    pub fn is_in_bounds(row: i32, col: i32) -> bool {
        in_bounds(row, col)
    }

    /// Piece on `square`; off-board squares read as empty.
    pub fn get(&self, square: Square) -> Option<Piece> {
        *self
            .cells
            .get(square.row as usize)?
            .get(square.col as usize)?
    }

    /// Off-board squares are ignored.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(cell) = self
            .cells
            .get_mut(square.row as usize)
            .and_then(|row| row.get_mut(square.col as usize))
        {
            *cell = piece;
        }
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    /// Occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Moves a piece for real and returns what it captured.
    ///
    /// An empty origin is a no-op. Pawns are marked as moved.
    pub fn apply(&mut self, mv: Move) -> Option<Piece> {
        let mut piece = self.get(mv.from)?;
        if piece.kind == PieceKind::Pawn {
            piece.has_moved = true;
        }
        let captured = self.get(mv.to);
        self.set(mv.to, Some(piece));
        self.set(mv.from, None);
        captured
    }

    /// Plays `mv` on the board until the returned guard is dropped.
    ///
    /// Both touched cells are put back exactly as they were when the guard
    /// goes out of scope, including on unwind.
    pub fn simulate(&mut self, mv: Move) -> Simulation<'_> {
        let moved = self.get(mv.from);
        let captured = self.get(mv.to);
        self.set(mv.to, moved);
        self.set(mv.from, None);
        Simulation {
            board: self,
            mv,
            moved,
            captured,
        }
    }

    /// FEN piece-placement field
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in &self.cells {
            for cell in cells {
                let c = cell.map(|p| p.letter()).unwrap_or('.');
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A move held on the board for inspection, undone on drop.
pub struct Simulation<'a> {
    board: &'a mut Board,
    mv: Move,
    moved: Option<Piece>,
    captured: Option<Piece>,
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.set(self.mv.from, self.moved);
        self.board.set(self.mv.to, self.captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_is_in_bounds_edges() {
        assert!(Board::is_in_bounds(0, 0));
        assert!(Board::is_in_bounds(7, 7));
        assert!(Board::is_in_bounds(0, 7));
        assert!(!Board::is_in_bounds(-1, 0));
        assert!(!Board::is_in_bounds(0, 8));
        assert!(!Board::is_in_bounds(8, 3));
    }

    #[test]
    fn test_off_board_square_reads_empty() {
        let mut board = Board::standard();
        let off = Square { row: 9, col: 0 };
        assert_eq!(board.get(off), None);

        board.set(off, Some(Piece::new(PieceKind::Queen, Color::White)));
        assert_eq!(board, Board::standard());
        assert_eq!(board.apply(Move::new(off, sq("e4"))), None);
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.get(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.get(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(
            board.placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_diagram_roundtrip() {
        let diagram = "\
            r...k...
            ........
            ........
            ...p....
            ....P...
            ........
            ........
            ....K..R
        ";
        let board = Board::from_diagram(diagram).unwrap();
        assert_eq!(board.pieces().count(), 6);
        assert_eq!(board.placement(), "r3k3/8/8/3p4/4P3/8/8/4K2R");
        let again = Board::from_diagram(&board.to_string()).unwrap();
        assert_eq!(again, board);
    }

    #[test]
    fn test_bad_diagrams() {
        assert!(Board::from_diagram("........").is_err());
        let bad_piece = "x.......\n".repeat(8);
        assert!(matches!(Board::from_diagram(&bad_piece), Err(Error::Diagram(_))));
    }

    #[test]
    fn test_apply_marks_pawn_and_captures() {
        let mut board = Board::standard();
        assert_eq!(board.apply(Move::new(sq("e2"), sq("e4"))), None);
        let pawn = board.get(sq("e4")).unwrap();
        assert!(pawn.has_moved);
        assert!(board.get(sq("e2")).is_none());

        board.apply(Move::new(sq("d7"), sq("d5")));
        let captured = board.apply(Move::new(sq("e4"), sq("d5")));
        assert_eq!(captured.map(|p| p.color), Some(Color::Black));

        assert_eq!(board.apply(Move::new(sq("e5"), sq("e6"))), None);
        assert!(board.get(sq("e6")).is_none());
    }

    #[test]
    fn test_simulation_restores_capture() {
        let mut board = Board::standard();
        board.apply(Move::new(sq("e2"), sq("e4")));
        board.apply(Move::new(sq("d7"), sq("d5")));
        let before = board.clone();

        {
            let sim = board.simulate(Move::new(sq("e4"), sq("d5")));
            assert_eq!(sim.get(sq("d5")).map(|p| p.color), Some(Color::White));
            assert!(sim.get(sq("e4")).is_none());
        }

        assert_eq!(board, before);
    }
}
