//! Value types shared by the board, the rules and the session

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta a pawn of this color advances by.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row this color's pawns start on.
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Back rank order from column 0 to column 7.
    pub const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Lowercase FEN letter
    pub fn letter(&self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// A piece on the board.
///
/// `has_moved` is flipped on the first real pawn move. No rule reads it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    #[serde(default)]
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    /// FEN letter, uppercase for white
    pub fn letter(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        let kind = PieceKind::from_letter(letter)?;
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(kind, color))
    }

    /// Unicode glyph for rendering
    pub fn symbol(&self) -> char {
        match (self.kind, self.color) {
            (PieceKind::King, Color::White) => '♔',
            (PieceKind::Queen, Color::White) => '♕',
            (PieceKind::Rook, Color::White) => '♖',
            (PieceKind::Bishop, Color::White) => '♗',
            (PieceKind::Knight, Color::White) => '♘',
            (PieceKind::Pawn, Color::White) => '♙',
            (PieceKind::King, Color::Black) => '♚',
            (PieceKind::Queen, Color::Black) => '♛',
            (PieceKind::Rook, Color::Black) => '♜',
            (PieceKind::Bishop, Color::Black) => '♝',
            (PieceKind::Knight, Color::Black) => '♞',
            (PieceKind::Pawn, Color::Black) => '♟',
        }
    }
}

/// A board coordinate. Row 0 is black's back rank, row 7 is white's.
///
/// Deserializing checks bounds, so off-board squares never reach the board
/// from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

/// Unchecked wire form of a [`Square`]
#[derive(Deserialize)]
struct RawSquare {
    row: i32,
    col: i32,
}

impl TryFrom<RawSquare> for Square {
    type Error = Error;

    fn try_from(raw: RawSquare) -> Result<Self> {
        Square::try_new(raw.row, raw.col)
    }
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn try_new(row: i32, col: i32) -> Result<Self> {
        if in_bounds(row, col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(Error::OutOfBounds { row, col })
        }
    }

    /// Square displaced by `(dr, dc)`, or `None` off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i32 + dr as i32;
        let col = self.col as i32 + dc as i32;
        Self::try_new(row, col).ok()
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    pub fn is_light(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

/// True iff both coordinates lie in `0..8`.
pub fn in_bounds(row: i32, col: i32) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = 8 - self.row;
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(Error::SquareName(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(Error::SquareName(s.to_string()));
        }
        Ok(Square {
            row: 8 - (rank - b'0'),
            col: file - b'a',
        })
    }
}

/// A from/to pair. Not kept after it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        let e2: Square = "e2".parse().unwrap();
        assert_eq!(e2, Square { row: 6, col: 4 });
        assert_eq!(e2.to_string(), "e2");

        let a8: Square = "A8".parse().unwrap();
        assert_eq!(a8, Square { row: 0, col: 0 });

        assert!("i1".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(in_bounds(0, 0));
        assert!(in_bounds(7, 7));
        assert!(!in_bounds(-1, 3));
        assert!(!in_bounds(3, 8));
        assert!(Square::new(8, 0).is_none());
        assert!(matches!(
            Square::try_new(2, -1),
            Err(Error::OutOfBounds { row: 2, col: -1 })
        ));
    }

    #[test]
    fn test_square_json_is_bounds_checked() {
        let square: Square = serde_json::from_str(r#"{"row": 7, "col": 0}"#).unwrap();
        assert_eq!(square.to_string(), "a1");

        assert!(serde_json::from_str::<Square>(r#"{"row": 9, "col": 0}"#).is_err());
        assert!(serde_json::from_str::<Square>(r#"{"row": 0, "col": -1}"#).is_err());
        assert!(serde_json::from_str::<Move>(
            r#"{"from": {"row": 6, "col": 4}, "to": {"row": 8, "col": 4}}"#
        )
        .is_err());
    }

    #[test]
    fn test_offset_stops_at_edge() {
        let corner = Square { row: 0, col: 7 };
        assert_eq!(corner.offset(1, -1), Some(Square { row: 1, col: 6 }));
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, 1), None);
    }

    #[test]
    fn test_piece_letters() {
        let knight = Piece::from_letter('N').unwrap();
        assert_eq!(knight.kind, PieceKind::Knight);
        assert_eq!(knight.color, Color::White);
        assert_eq!(knight.letter(), 'N');
        assert_eq!(Piece::from_letter('q').unwrap().color, Color::Black);
        assert!(Piece::from_letter('x').is_none());
    }
}
