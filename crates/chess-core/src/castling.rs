//! Castling rights and castling geometry.

use crate::{Color, Square};

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Short castling (O-O), towards the h-file.
    King,
    /// Long castling (O-O-O), towards the a-file.
    Queen,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// Square the king starts on for either side.
    #[inline]
    pub const fn king_origin(color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    /// Square the king lands on after castling.
    pub const fn king_target(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::King, Color::White) => Square::G1,
            (CastleSide::Queen, Color::White) => Square::C1,
            (CastleSide::King, Color::Black) => Square::G8,
            (CastleSide::Queen, Color::Black) => Square::C8,
        }
    }

    /// Square the king crosses on its way to [`CastleSide::king_target`].
    pub const fn king_passes(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::King, Color::White) => Square::F1,
            (CastleSide::Queen, Color::White) => Square::D1,
            (CastleSide::King, Color::Black) => Square::F8,
            (CastleSide::Queen, Color::Black) => Square::D8,
        }
    }

    /// Square the castling rook starts on.
    pub const fn rook_origin(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::King, Color::White) => Square::H1,
            (CastleSide::Queen, Color::White) => Square::A1,
            (CastleSide::King, Color::Black) => Square::H8,
            (CastleSide::Queen, Color::Black) => Square::A8,
        }
    }

    /// Square the castling rook lands on.
    pub const fn rook_target(self, color: Color) -> Square {
        self.king_passes(color)
    }

    /// Squares strictly between king and rook; all must be empty to castle.
    pub fn between(self, color: Color) -> &'static [Square] {
        const WHITE_SHORT: [Square; 2] = [Square::F1, Square::G1];
        const WHITE_LONG: [Square; 3] = [Square::D1, Square::C1, Square::B1];
        const BLACK_SHORT: [Square; 2] = [Square::F8, Square::G8];
        const BLACK_LONG: [Square; 3] = [Square::D8, Square::C8, Square::B8];
        match (self, color) {
            (CastleSide::King, Color::White) => &WHITE_SHORT,
            (CastleSide::Queen, Color::White) => &WHITE_LONG,
            (CastleSide::King, Color::Black) => &BLACK_SHORT,
            (CastleSide::Queen, Color::Black) => &BLACK_LONG,
        }
    }

    /// Classifies a king move of two files as a castling side.
    pub fn of_king_move(from: Square, to: Square) -> Option<CastleSide> {
        if from.rank() != to.rank() {
            return None;
        }
        match to.file().index() as i8 - from.file().index() as i8 {
            2 => Some(CastleSide::King),
            -2 => Some(CastleSide::Queen),
            _ => None,
        }
    }
}

/// Castling rights flags.
///
/// Bit layout follows [`CastlingRights::index`]: white short, white long,
/// black short, black long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Every (color, side) pair in bit order.
    pub const EACH: [(Color, CastleSide); 4] = [
        (Color::White, CastleSide::King),
        (Color::White, CastleSide::Queen),
        (Color::Black, CastleSide::King),
        (Color::Black, CastleSide::Queen),
    ];

    /// Creates castling rights from raw flags; bits above the low four are dropped.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        CastlingRights(bits & 0b1111)
    }

    /// Bit index (0-3) of a single right.
    #[inline]
    pub const fn index(color: Color, side: CastleSide) -> usize {
        let side = match side {
            CastleSide::King => 0,
            CastleSide::Queen => 1,
        };
        color.index() * 2 + side
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & (1 << Self::index(color, side)) != 0
    }

    /// Returns these rights with one more right granted.
    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> Self {
        CastlingRights(self.0 | (1 << Self::index(color, side)))
    }

    /// Returns these rights with one right revoked.
    #[inline]
    pub const fn without(self, color: Color, side: CastleSide) -> Self {
        CastlingRights(self.0 & !(1 << Self::index(color, side)))
    }

    /// Returns these rights with both rights of `color` revoked.
    #[inline]
    pub const fn without_color(self, color: Color) -> Self {
        self.without(color, CastleSide::King)
            .without(color, CastleSide::Queen)
    }

    /// Rights lost once a move leaves or lands on `square`.
    ///
    /// Vacating a king's or rook's home square, or capturing on a rook's
    /// home square, revokes the rights tied to it.
    pub const fn touched(self, square: Square) -> Self {
        match square.index() {
            4 => self.without_color(Color::White),
            0 => self.without(Color::White, CastleSide::Queen),
            7 => self.without(Color::White, CastleSide::King),
            60 => self.without_color(Color::Black),
            56 => self.without(Color::Black, CastleSide::Queen),
            63 => self.without(Color::Black, CastleSide::King),
            _ => self,
        }
    }

    /// Rights present in `self` but missing from `other`.
    #[inline]
    pub const fn lost_in(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 & !other.0)
    }

    /// Iterates over the rights that are present.
    pub fn iter(self) -> impl Iterator<Item = (Color, CastleSide)> {
        Self::EACH
            .into_iter()
            .filter(move |&(color, side)| self.has(color, side))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke() {
        let rights = CastlingRights::ALL.without(Color::White, CastleSide::King);
        assert!(!rights.has(Color::White, CastleSide::King));
        assert!(rights.has(Color::White, CastleSide::Queen));
        assert!(rights.has(Color::Black, CastleSide::King));

        let rights = rights.without_color(Color::Black);
        assert!(!rights.has(Color::Black, CastleSide::King));
        assert!(!rights.has(Color::Black, CastleSide::Queen));

        let rights = CastlingRights::NONE.with(Color::Black, CastleSide::Queen);
        assert_eq!(rights.bits(), 0b1000);
    }

    #[test]
    fn touching_home_squares() {
        assert_eq!(
            CastlingRights::ALL.touched(Square::E1),
            CastlingRights::ALL.without_color(Color::White)
        );
        assert_eq!(
            CastlingRights::ALL.touched(Square::H8),
            CastlingRights::ALL.without(Color::Black, CastleSide::King)
        );
        assert_eq!(
            CastlingRights::ALL.touched(Square::new(crate::File::E, crate::Rank::R4)),
            CastlingRights::ALL
        );
    }

    #[test]
    fn lost_rights() {
        let after = CastlingRights::ALL.touched(Square::A1);
        let lost: Vec<_> = CastlingRights::ALL.lost_in(after).iter().collect();
        assert_eq!(lost, vec![(Color::White, CastleSide::Queen)]);
    }

    #[test]
    fn castling_geometry() {
        assert_eq!(CastleSide::King.king_target(Color::White), Square::G1);
        assert_eq!(CastleSide::Queen.rook_origin(Color::Black), Square::A8);
        assert_eq!(CastleSide::Queen.rook_target(Color::White), Square::D1);
        assert_eq!(CastleSide::Queen.between(Color::White).len(), 3);
        assert_eq!(
            CastleSide::of_king_move(Square::E8, Square::C8),
            Some(CastleSide::Queen)
        );
        assert_eq!(CastleSide::of_king_move(Square::E1, Square::F1), None);
    }
}
