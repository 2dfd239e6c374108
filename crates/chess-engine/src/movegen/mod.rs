//! Move generation.
//!
//! [`MoveGenerator`] extends [`Position`] with pseudo-legal and legal target
//! generation, attack detection and derivation of successor positions. Each
//! board representation implements the storage-specific parts (per-piece
//! targets, attack scans, derivation); legality filtering and move assembly
//! are shared provided methods so every representation applies identical
//! rules.

mod list;
pub mod perft;

use crate::{Position, Representation};
use chess_core::{CastleSide, Color, Move, Piece, PieceType, Square};

pub use list::{MoveList, SquareList};

/// Knight jumps as (file, rank) deltas.
pub(crate) const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Rook rays as (file, rank) deltas.
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Bishop rays as (file, rank) deltas.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// King steps as (file, rank) deltas.
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// A position that can enumerate moves and derive successor positions.
pub trait MoveGenerator: Position {
    /// Copies any position into this representation.
    fn derive_from<P: Position + ?Sized>(position: &P) -> Self
    where
        Self: Sized;

    /// Applies `mv` and returns the resulting position.
    ///
    /// With `advance_clocks` false the side to move, halfmove clock and
    /// fullmove number are carried over unchanged; every board effect
    /// (captures, castling rook, en passant, promotion, rights, en-passant
    /// target) still applies.
    ///
    /// # Panics
    ///
    /// Panics if `mv.from()` does not hold `mv.piece()`.
    fn derive(&self, mv: &Move, advance_clocks: bool) -> Self
    where
        Self: Sized;

    /// [`derive`](MoveGenerator::derive) for callers holding a trait object.
    fn derive_boxed(&self, mv: &Move, advance_clocks: bool) -> Box<dyn MoveGenerator>;

    /// The storage strategy behind this value.
    fn representation(&self) -> Representation;

    fn pawn_targets(&self, origin: Square) -> SquareList;

    fn knight_targets(&self, origin: Square) -> SquareList;

    fn bishop_targets(&self, origin: Square) -> SquareList;

    fn rook_targets(&self, origin: Square) -> SquareList;

    fn queen_targets(&self, origin: Square) -> SquareList {
        let mut targets = self.rook_targets(origin);
        targets.extend(self.bishop_targets(origin).iter().copied());
        targets
    }

    /// King steps plus castling destinations for which the right is held,
    /// the squares between king and rook are empty and the rook is home.
    /// Whether the king crosses an attacked square is not checked here.
    fn king_targets(&self, origin: Square) -> SquareList;

    /// Squares the piece on `origin` may move to, ignoring checks against its own king.
    fn pseudo_targets(&self, origin: Square) -> SquareList {
        match self.piece_at(origin).map(Piece::kind) {
            Some(PieceType::Pawn) => self.pawn_targets(origin),
            Some(PieceType::Knight) => self.knight_targets(origin),
            Some(PieceType::Bishop) => self.bishop_targets(origin),
            Some(PieceType::Rook) => self.rook_targets(origin),
            Some(PieceType::Queen) => self.queen_targets(origin),
            Some(PieceType::King) => self.king_targets(origin),
            None => SquareList::new(),
        }
    }

    /// Returns true if any piece of color `by` attacks `square`.
    fn is_attacked(&self, square: Square, by: Color) -> bool;

    fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opposite()))
    }

    /// Returns true if playing `mv` would leave its mover's king attacked.
    fn exposes_king(&self, mv: &Move) -> bool;

    /// Builds the move from `origin` to `target`, filling in the captured
    /// piece (including a pawn taken en passant).
    fn build_move(&self, origin: Square, target: Square) -> Option<Move> {
        let piece = self.piece_at(origin)?;
        let captured = self.piece_at(target).or_else(|| {
            let en_passant = piece.kind() == PieceType::Pawn
                && origin.file() != target.file()
                && self.en_passant_target() == Some(target);
            en_passant.then(|| Piece::new(PieceType::Pawn, piece.color().opposite()))
        });
        Some(Move::new(piece, origin, target, captured))
    }

    /// Subset of [`pseudo_targets`](MoveGenerator::pseudo_targets) that keeps the mover's king safe.
    ///
    /// Castling is also dropped while the king is in check or when the
    /// square it crosses is attacked.
    fn legal_targets(&self, origin: Square) -> SquareList {
        let mut legal = SquareList::new();
        let Some(piece) = self.piece_at(origin) else {
            return legal;
        };
        let color = piece.color();
        for &target in self.pseudo_targets(origin).iter() {
            let mv = Move::quiet(piece, origin, target);
            if let Some(side) = mv
                .is_castling()
                .then(|| CastleSide::of_king_move(origin, target))
                .flatten()
            {
                let crossed = side.king_passes(color);
                if self.is_in_check(color) || self.is_attacked(crossed, color.opposite()) {
                    continue;
                }
            }
            if !self.exposes_king(&mv) {
                legal.push(target);
            }
        }
        legal
    }

    /// All legal moves of `color`, with captured pieces filled in.
    fn legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for origin in Square::ALL {
            match self.piece_at(origin) {
                Some(piece) if piece.color() == color => {}
                _ => continue,
            }
            for &target in self.legal_targets(origin).iter() {
                if let Some(mv) = self.build_move(origin, target) {
                    moves.push(mv);
                }
            }
        }
        moves
    }
}

impl PartialEq for dyn MoveGenerator + '_ {
    fn eq(&self, other: &Self) -> bool {
        crate::positions_equal(self, other)
    }
}

impl Eq for dyn MoveGenerator + '_ {}
