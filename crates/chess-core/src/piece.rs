//! Chess piece representation.

use crate::Color;
use std::fmt;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// All piece types in order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Returns the index of this piece type (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the SAN letter for this piece type. Pawns have none.
    pub const fn san_letter(self) -> Option<char> {
        match self {
            PieceType::Pawn => None,
            PieceType::Knight => Some('N'),
            PieceType::Bishop => Some('B'),
            PieceType::Rook => Some('R'),
            PieceType::Queen => Some('Q'),
            PieceType::King => Some('K'),
        }
    }

    /// Parses a SAN piece letter. Pawns have no letter and never match.
    pub const fn from_san_letter(c: char) -> Option<Self> {
        match c {
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Returns true if this piece type slides along rays (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece. Only twelve distinct values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceType,
    color: Color,
}

impl Piece {
    pub const WHITE_PAWN: Piece = Piece::new(PieceType::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceType::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceType::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceType::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceType::Queen, Color::White);
    pub const WHITE_KING: Piece = Piece::new(PieceType::King, Color::White);
    pub const BLACK_PAWN: Piece = Piece::new(PieceType::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceType::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceType::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceType::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceType::Queen, Color::Black);
    pub const BLACK_KING: Piece = Piece::new(PieceType::King, Color::Black);

    /// All twelve pieces, ordered by [`Piece::index`].
    pub const ALL: [Piece; 12] = [
        Piece::WHITE_PAWN,
        Piece::WHITE_KNIGHT,
        Piece::WHITE_BISHOP,
        Piece::WHITE_ROOK,
        Piece::WHITE_QUEEN,
        Piece::WHITE_KING,
        Piece::BLACK_PAWN,
        Piece::BLACK_KNIGHT,
        Piece::BLACK_BISHOP,
        Piece::BLACK_ROOK,
        Piece::BLACK_QUEEN,
        Piece::BLACK_KING,
    ];

    #[inline]
    pub const fn new(kind: PieceType, color: Color) -> Self {
        Piece { kind, color }
    }

    #[inline]
    pub const fn kind(self) -> PieceType {
        self.kind
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Dense index 0-11: white pieces first, then black, each in [`PieceType`] order.
    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * 6 + self.kind.index()
    }

    /// Inverse of [`Piece::index`].
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 12 {
            Some(Piece::ALL[index])
        } else {
            None
        }
    }

    /// Returns true if this piece has the given kind and color.
    #[inline]
    pub fn is(self, kind: PieceType, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// Returns the FEN character (uppercase for White).
    pub const fn to_fen_char(self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_fen() {
        assert_eq!(Piece::WHITE_PAWN.to_fen_char(), 'P');
        assert_eq!(Piece::BLACK_PAWN.to_fen_char(), 'p');
        assert_eq!(Piece::WHITE_KING.to_fen_char(), 'K');
        assert_eq!(Piece::BLACK_KNIGHT.to_fen_char(), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(Piece::from_fen_char('P'), Some(Piece::WHITE_PAWN));
        assert_eq!(Piece::from_fen_char('p'), Some(Piece::BLACK_PAWN));
        assert_eq!(Piece::from_fen_char('K'), Some(Piece::WHITE_KING));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn index_is_dense_and_invertible() {
        for (i, piece) in Piece::ALL.iter().enumerate() {
            assert_eq!(piece.index(), i);
            assert_eq!(Piece::from_index(i), Some(*piece));
        }
        assert_eq!(Piece::from_index(12), None);
    }

    #[test]
    fn san_letters() {
        assert_eq!(PieceType::Pawn.san_letter(), None);
        assert_eq!(PieceType::Knight.san_letter(), Some('N'));
        for kind in PieceType::ALL {
            if let Some(letter) = kind.san_letter() {
                assert_eq!(PieceType::from_san_letter(letter), Some(kind));
            }
        }
        assert_eq!(PieceType::from_san_letter('P'), None);
    }

    #[test]
    fn is_slider() {
        assert!(!PieceType::Pawn.is_slider());
        assert!(!PieceType::Knight.is_slider());
        assert!(PieceType::Bishop.is_slider());
        assert!(PieceType::Rook.is_slider());
        assert!(PieceType::Queen.is_slider());
        assert!(!PieceType::King.is_slider());
    }
}
