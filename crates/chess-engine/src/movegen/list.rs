//! Fixed-capacity buffers for generated squares and moves.
//!
//! Both lists live on the caller's stack, so move generation never shares
//! scratch space between calls or threads.

use chess_core::{Move, Square};
use std::fmt;

/// Target squares reachable from one origin square.
///
/// A queen reaches at most 27 squares and a king at most 10 (eight steps
/// plus two castling destinations), so 28 slots hold any single piece.
#[derive(Clone, Copy)]
pub struct SquareList {
    squares: [Square; Self::CAPACITY],
    len: usize,
}

impl SquareList {
    pub const CAPACITY: usize = 28;

    #[inline]
    pub const fn new() -> Self {
        SquareList {
            squares: [Square::A1; Self::CAPACITY],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, square: Square) {
        debug_assert!(self.len < Self::CAPACITY);
        self.squares[self.len] = square;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Square> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.as_slice().contains(&square)
    }

    /// Copies the squares out in index order, for order-insensitive comparison.
    pub fn sorted(&self) -> Vec<Square> {
        let mut squares = self.as_slice().to_vec();
        squares.sort_unstable();
        squares
    }
}

impl Default for SquareList {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Square> for SquareList {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        for square in iter {
            self.push(square);
        }
    }
}

impl std::ops::Index<usize> for SquareList {
    type Output = Square;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a SquareList {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for SquareList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Upper bound on the number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    /// Move ids in ascending order, for order-insensitive comparison.
    pub fn sorted_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.iter().map(Move::to_id).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{File, Piece, Rank};

    #[test]
    fn square_list_push_and_sort() {
        let mut list = SquareList::new();
        assert!(list.is_empty());
        list.push(Square::H8);
        list.push(Square::A1);
        list.extend([Square::E1]);
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], Square::H8);
        assert!(list.contains(Square::E1));
        assert_eq!(list.sorted(), vec![Square::A1, Square::E1, Square::H8]);
    }

    #[test]
    fn movelist_push_and_retain() {
        let mut list = MoveList::new();
        let e2 = Square::new(File::E, Rank::R2);
        let e3 = Square::new(File::E, Rank::R3);
        let e4 = Square::new(File::E, Rank::R4);

        list.push(Move::quiet(Piece::WHITE_PAWN, e2, e3));
        list.push(Move::quiet(Piece::WHITE_PAWN, e2, e4));
        list.push(Move::quiet(Piece::WHITE_QUEEN, e3, e4));
        assert_eq!(list.len(), 3);
        assert!(list.contains(&Move::quiet(Piece::WHITE_PAWN, e2, e4)));

        list.retain(|m| m.from() == e2);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].to(), e4);
    }

    #[test]
    fn movelist_sorted_ids() {
        let mut list = MoveList::default();
        let b = Move::quiet(Piece::BLACK_KING, Square::E8, Square::D8);
        let a = Move::quiet(Piece::WHITE_KING, Square::E1, Square::D1);
        list.push(b);
        list.push(a);
        assert_eq!(list.sorted_ids(), vec![a.to_id(), b.to_id()]);
    }
}
