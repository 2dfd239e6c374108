//! The read-only contract shared by every board representation.

use chess_core::{CastleSide, CastlingRights, Color, Piece, Square};
use std::fmt::Debug;

/// A chess position: piece placement plus the flags and clocks of the game state.
///
/// Positions are immutable values. New positions come from construction,
/// from copying another representation, or from deriving a successor with
/// [`MoveGenerator::derive`](crate::MoveGenerator::derive).
pub trait Position: Debug + Send + Sync {
    /// Returns the piece on `square`, if any.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    fn side_to_move(&self) -> Color;

    fn castling_rights(&self) -> CastlingRights;

    /// Returns true if `color` still holds the right to castle towards `side`.
    fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights().has(color, side)
    }

    /// The square a pawn skipped with its last double step, if the previous
    /// ply was one.
    fn en_passant_target(&self) -> Option<Square>;

    /// Half-moves since the last capture or pawn move.
    fn halfmove_clock(&self) -> u32;

    fn fullmove_number(&self) -> u32;

    /// Cached location of `color`'s king. `None` only on boards set up without one.
    fn king_square(&self, color: Color) -> Option<Square>;

    /// Returns true once `color` has castled in the line leading to this position.
    fn has_castled(&self, color: Color) -> bool;

    /// Zobrist hash of placement, side to move, castling rights and en-passant file.
    fn zobrist_hash(&self) -> u64;
}

/// Compares two positions of any representation.
///
/// Differing hashes short-circuit to `false`; equal hashes are confirmed by
/// comparing placement, side to move, castling rights, en-passant target,
/// clocks and the has-castled flags.
pub fn positions_equal<A, B>(a: &A, b: &B) -> bool
where
    A: Position + ?Sized,
    B: Position + ?Sized,
{
    if a.zobrist_hash() != b.zobrist_hash() {
        return false;
    }
    a.side_to_move() == b.side_to_move()
        && a.castling_rights() == b.castling_rights()
        && a.en_passant_target() == b.en_passant_target()
        && a.halfmove_clock() == b.halfmove_clock()
        && a.fullmove_number() == b.fullmove_number()
        && Color::ALL
            .iter()
            .all(|&c| a.has_castled(c) == b.has_castled(c))
        && Square::ALL.iter().all(|&sq| a.piece_at(sq) == b.piece_at(sq))
}

/// Returns true if `a` and `b` count as the same position for repetition:
/// same placement, side to move, castling rights and en-passant target.
/// Clocks and has-castled flags are ignored.
pub fn is_repetition<A, B>(a: &A, b: &B) -> bool
where
    A: Position + ?Sized,
    B: Position + ?Sized,
{
    a.zobrist_hash() == b.zobrist_hash()
        && a.side_to_move() == b.side_to_move()
        && a.castling_rights() == b.castling_rights()
        && a.en_passant_target() == b.en_passant_target()
        && Square::ALL.iter().all(|&sq| a.piece_at(sq) == b.piece_at(sq))
}

/// Implements cross-representation `PartialEq`, `Eq` and Zobrist-based `Hash`.
macro_rules! impl_position_identity {
    ($board:ty) => {
        impl<P: $crate::Position + ?Sized> PartialEq<P> for $board {
            fn eq(&self, other: &P) -> bool {
                $crate::positions_equal(self, other)
            }
        }

        impl Eq for $board {}

        impl std::hash::Hash for $board {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64($crate::Position::zobrist_hash(self));
            }
        }
    };
}

pub(crate) use impl_position_identity;
