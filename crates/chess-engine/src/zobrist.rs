//! Zobrist hashing for position identification.
//!
//! A position's hash is the XOR of one random key per applicable fact:
//! - each piece on each square (12 pieces x 64 squares = 768 keys)
//! - white to move
//! - each castling right that is still held (4 keys)
//! - the file of the en-passant target, if any (8 keys)
//!
//! Equal hashes only nominate positions as equal; full equality is still
//! decided by comparing state (see [`crate::positions_equal`]).

use crate::Position;
use chess_core::{CastleSide, CastlingRights, Color, Piece, Square};

/// Zobrist hash keys.
///
/// Generated at compile time from a fixed seed, so every process sees the
/// same table and nothing can re-seed it.
pub struct ZobristKeys {
    /// Keys indexed by [`Piece::index`] then [`Square::index`].
    pub piece_square: [[u64; 64]; 12],
    /// XORed in while White is to move.
    pub white_to_move: u64,
    /// Keys indexed by [`CastlingRights::index`].
    pub castle: [u64; 4],
    /// Keys indexed by the en-passant target's file.
    pub en_passant_file: [u64; 8],
}

impl ZobristKeys {
    /// Builds the table with a xorshift64 generator.
    pub const fn new() -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut piece_square = [[0u64; 64]; 12];
        let mut castle = [0u64; 4];
        let mut en_passant_file = [0u64; 8];

        let mut piece = 0;
        while piece < 12 {
            let mut square = 0;
            while square < 64 {
                state = next_random(state);
                piece_square[piece][square] = state;
                square += 1;
            }
            piece += 1;
        }

        state = next_random(state);
        let white_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castle[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant_file[i] = state;
            i += 1;
        }

        ZobristKeys {
            piece_square,
            white_to_move,
            castle,
            en_passant_file,
        }
    }

    #[inline]
    pub const fn piece_key(&self, piece: Piece, square: Square) -> u64 {
        self.piece_square[piece.index()][square.index() as usize]
    }

    #[inline]
    pub const fn castle_key(&self, color: Color, side: CastleSide) -> u64 {
        self.castle[CastlingRights::index(color, side)]
    }

    /// Combined key of every right held in `rights`.
    pub fn castling_key(&self, rights: CastlingRights) -> u64 {
        rights
            .iter()
            .fold(0, |acc, (color, side)| acc ^ self.castle_key(color, side))
    }

    #[inline]
    pub const fn en_passant_key(&self, target: Square) -> u64 {
        self.en_passant_file[target.file().index() as usize]
    }

    #[inline]
    pub const fn side_key(&self, side_to_move: Color) -> u64 {
        match side_to_move {
            Color::White => self.white_to_move,
            Color::Black => 0,
        }
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Computes a position's hash from scratch.
pub fn full_hash<P: Position + ?Sized>(position: &P) -> u64 {
    let mut hash = 0;
    for sq in Square::ALL {
        if let Some(piece) = position.piece_at(sq) {
            hash ^= ZOBRIST.piece_key(piece, sq);
        }
    }
    hash ^= ZOBRIST.side_key(position.side_to_move());
    hash ^= ZOBRIST.castling_key(position.castling_rights());
    if let Some(target) = position.en_passant_target() {
        hash ^= ZOBRIST.en_passant_key(target);
    }
    hash
}
