//! Move representation.

use crate::{Color, ParseError, Piece, PieceType, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A chess move: the piece moved, its origin and destination, and the piece
/// it captured, if known.
///
/// The captured piece is informational. Equality and hashing use only the
/// moved piece, origin and destination, so a move with capture information
/// equals the same move without it.
#[derive(Clone, Copy)]
pub struct Move {
    piece: Piece,
    from: Square,
    to: Square,
    captured: Option<Piece>,
}

impl Move {
    /// Placeholder value for fixed-size buffers; never a legal move.
    pub const NULL: Move = Move::quiet(Piece::WHITE_PAWN, Square::A1, Square::A1);

    #[inline]
    pub const fn new(piece: Piece, from: Square, to: Square, captured: Option<Piece>) -> Self {
        Move {
            piece,
            from,
            to,
            captured,
        }
    }

    /// Creates a move that carries no capture information.
    #[inline]
    pub const fn quiet(piece: Piece, from: Square, to: Square) -> Self {
        Self::new(piece, from, to, None)
    }

    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    /// Returns true for a king move of two files.
    pub fn is_castling(&self) -> bool {
        self.piece.kind() == PieceType::King
            && self.from.rank() == self.to.rank()
            && (self.from.file().index() as i8 - self.to.file().index() as i8).abs() == 2
    }

    /// Returns true for a pawn move onto its promotion rank.
    pub fn is_promotion(&self) -> bool {
        self.piece.kind() == PieceType::Pawn
            && self.to.rank().index() == self.piece.color().promotion_rank()
    }

    /// Returns true for a pawn advancing two ranks.
    pub fn is_double_step(&self) -> bool {
        self.piece.kind() == PieceType::Pawn
            && (self.from.rank().index() as i8 - self.to.rank().index() as i8).abs() == 2
    }

    /// Compact id built from piece, origin and destination only.
    ///
    /// Layout: bits 12-15 piece index, bits 6-11 origin, bits 0-5 destination.
    #[inline]
    pub const fn to_id(&self) -> u16 {
        ((self.piece.index() as u16) << 12)
            | ((self.from.index() as u16) << 6)
            | self.to.index() as u16
    }

    /// Decodes an id produced by [`Move::to_id`]. The result carries no capture information.
    pub fn from_id(id: u16) -> Result<Self, ParseError> {
        let piece = Piece::from_index((id >> 12) as usize).ok_or(ParseError::InvalidMoveId(id))?;
        let from = Square::ALL[((id >> 6) & 0x3F) as usize];
        let to = Square::ALL[(id & 0x3F) as usize];
        Ok(Move::quiet(piece, from, to))
    }

    /// Coordinate notation (e.g., "e2e4", "e7e8q" for an auto-queen promotion).
    pub fn to_uci(&self) -> String {
        let promo = if self.is_promotion() { "q" } else { "" };
        format!("{}{}{}", self.from, self.to, promo)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece && self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u16(self.to_id());
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.captured {
            Some(captured) => write!(
                f,
                "Move({} {}x{})",
                self.piece.to_fen_char(),
                self.to_uci(),
                captured.to_fen_char()
            ),
            None => write!(f, "Move({} {})", self.piece.to_fen_char(), self.to_uci()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    #[test]
    fn capture_information_is_ignored_by_equality() {
        let plain = Move::quiet(Piece::WHITE_PAWN, sq("e4"), sq("d5"));
        let capture = Move::new(Piece::WHITE_PAWN, sq("e4"), sq("d5"), Some(Piece::BLACK_PAWN));
        assert_eq!(plain, capture);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&capture));

        let other_piece = Move::quiet(Piece::WHITE_QUEEN, sq("e4"), sq("d5"));
        assert_ne!(plain, other_piece);
    }

    #[test]
    fn move_classification() {
        assert!(Move::quiet(Piece::WHITE_KING, Square::E1, Square::G1).is_castling());
        assert!(Move::quiet(Piece::BLACK_KING, Square::E8, Square::C8).is_castling());
        assert!(!Move::quiet(Piece::WHITE_ROOK, Square::E1, Square::G1).is_castling());
        assert!(Move::quiet(Piece::WHITE_PAWN, sq("a7"), sq("a8")).is_promotion());
        assert!(Move::quiet(Piece::BLACK_PAWN, sq("b2"), sq("a1")).is_promotion());
        assert!(!Move::quiet(Piece::BLACK_PAWN, sq("a7"), sq("a8")).is_promotion());
        assert!(Move::quiet(Piece::WHITE_PAWN, sq("e2"), sq("e4")).is_double_step());
    }

    #[test]
    fn uci_text() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(Move::quiet(Piece::WHITE_PAWN, e2, e4).to_uci(), "e2e4");
        assert_eq!(Move::quiet(Piece::WHITE_PAWN, sq("e7"), sq("e8")).to_uci(), "e7e8q");
        assert_eq!(format!("{}", Move::quiet(Piece::WHITE_PAWN, e2, e4)), "e2e4");
    }

    #[test]
    fn invalid_id() {
        assert_eq!(Move::from_id(0xC000), Err(ParseError::InvalidMoveId(0xC000)));
    }

    proptest! {
        #[test]
        fn id_roundtrip(piece in 0usize..12, from in 0u8..64, to in 0u8..64, captured in proptest::option::of(0usize..12)) {
            let m = Move::new(
                Piece::ALL[piece],
                Square::ALL[from as usize],
                Square::ALL[to as usize],
                captured.map(|c| Piece::ALL[c]),
            );
            let decoded = Move::from_id(m.to_id()).unwrap();
            prop_assert_eq!(decoded, m);
            prop_assert_eq!(decoded.to_id(), m.to_id());
        }
    }
}
