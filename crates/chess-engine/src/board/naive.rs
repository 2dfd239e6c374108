//! Reference representation: an 8x8 grid of optional pieces.
//!
//! Every query is answered the most direct way, walking (file, rank)
//! coordinates with explicit bounds checks. The other representations are
//! differential-tested against this one.

use crate::movegen::{DIAGONAL, KING_STEPS, KNIGHT_STEPS, ORTHOGONAL};
use crate::position::impl_position_identity;
use crate::zobrist::full_hash;
use crate::{MoveGenerator, Position, Representation, SquareList};
use chess_core::{CastleSide, CastlingRights, Color, Move, Piece, PieceType, Square};
use once_cell::sync::OnceCell;

/// Naive 2D board. The Zobrist hash is computed on first request and cached.
#[derive(Debug, Clone)]
pub struct NaiveBoard {
    /// Indexed `[rank][file]`.
    grid: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    kings: [Option<Square>; 2],
    castled: [bool; 2],
    hash: OnceCell<u64>,
}

impl NaiveBoard {
    #[inline]
    fn cell(&self, square: Square) -> Option<Piece> {
        self.grid[square.rank().index() as usize][square.file().index() as usize]
    }

    #[inline]
    fn set_cell(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.rank().index() as usize][square.file().index() as usize] = piece;
    }

    fn slide(&self, origin: Square, rays: &[(i8, i8)], color: Color) -> SquareList {
        let mut targets = SquareList::new();
        for &(df, dr) in rays {
            let mut current = origin;
            while let Some(next) = current.offset(df, dr) {
                match self.cell(next) {
                    None => targets.push(next),
                    Some(blocker) => {
                        if blocker.color() != color {
                            targets.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
        targets
    }

    fn step(&self, origin: Square, steps: &[(i8, i8)], color: Color) -> SquareList {
        let mut targets = SquareList::new();
        for &(df, dr) in steps {
            if let Some(next) = origin.offset(df, dr) {
                if self.cell(next).map_or(true, |p| p.color() != color) {
                    targets.push(next);
                }
            }
        }
        targets
    }

    /// Nearest occupant along a ray, if any.
    fn first_along(&self, origin: Square, (df, dr): (i8, i8)) -> Option<Piece> {
        let mut current = origin;
        while let Some(next) = current.offset(df, dr) {
            if let Some(piece) = self.cell(next) {
                return Some(piece);
            }
            current = next;
        }
        None
    }

    fn color_at(&self, origin: Square) -> Color {
        self.cell(origin).map_or(self.side_to_move, Piece::color)
    }
}

impl Position for NaiveBoard {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cell(square)
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    fn has_castled(&self, color: Color) -> bool {
        self.castled[color.index()]
    }

    fn zobrist_hash(&self) -> u64 {
        *self.hash.get_or_init(|| full_hash(self))
    }
}

impl MoveGenerator for NaiveBoard {
    fn derive_from<P: Position + ?Sized>(position: &P) -> Self {
        let mut grid = [[None; 8]; 8];
        let mut kings = [None; 2];
        for sq in Square::ALL {
            let piece = position.piece_at(sq);
            if let Some(p) = piece.filter(|p| p.kind() == PieceType::King) {
                kings[p.color().index()] = Some(sq);
            }
            grid[sq.rank().index() as usize][sq.file().index() as usize] = piece;
        }
        NaiveBoard {
            grid,
            side_to_move: position.side_to_move(),
            castling: position.castling_rights(),
            en_passant: position.en_passant_target(),
            halfmove_clock: position.halfmove_clock(),
            fullmove_number: position.fullmove_number(),
            kings,
            castled: [
                position.has_castled(Color::White),
                position.has_castled(Color::Black),
            ],
            hash: OnceCell::new(),
        }
    }

    fn derive(&self, mv: &Move, advance_clocks: bool) -> Self {
        let piece = mv.piece();
        let (from, to) = (mv.from(), mv.to());
        assert_eq!(
            self.cell(from),
            Some(piece),
            "derive: {:?} does not match the piece on {}",
            mv,
            from
        );
        let color = piece.color();
        let mut next = self.clone();
        next.hash = OnceCell::new();

        let mut captured = next.cell(to).is_some();
        next.set_cell(from, None);

        if piece.kind() == PieceType::Pawn
            && from.file() != to.file()
            && !captured
            && self.en_passant == Some(to)
        {
            let victim = Square::new(to.file(), from.rank());
            next.set_cell(victim, None);
            captured = true;
        }

        let placed = if mv.is_promotion() {
            Piece::new(PieceType::Queen, color)
        } else {
            piece
        };
        next.set_cell(to, Some(placed));

        if piece.kind() == PieceType::King {
            next.kings[color.index()] = Some(to);
            if let Some(side) = CastleSide::of_king_move(from, to) {
                let rook = next.cell(side.rook_origin(color));
                next.set_cell(side.rook_origin(color), None);
                next.set_cell(side.rook_target(color), rook);
                next.castled[color.index()] = true;
            }
            next.castling = next.castling.without_color(color);
        }
        next.castling = next.castling.touched(from).touched(to);

        next.en_passant = if mv.is_double_step() {
            Square::from_coords(from.file().index(), (from.rank().index() + to.rank().index()) / 2)
        } else {
            None
        };

        if advance_clocks {
            if piece.kind() == PieceType::Pawn || captured {
                next.halfmove_clock = 0;
            } else {
                next.halfmove_clock = self.halfmove_clock.saturating_add(1);
            }
            if color == Color::Black {
                next.fullmove_number = self.fullmove_number.saturating_add(1);
            }
            next.side_to_move = color.opposite();
        }
        next
    }

    fn derive_boxed(&self, mv: &Move, advance_clocks: bool) -> Box<dyn MoveGenerator> {
        Box::new(self.derive(mv, advance_clocks))
    }

    fn representation(&self) -> Representation {
        Representation::Naive
    }

    fn pawn_targets(&self, origin: Square) -> SquareList {
        let mut targets = SquareList::new();
        let color = self.color_at(origin);
        let dir = color.pawn_direction();

        if let Some(one) = origin.offset(0, dir).filter(|&sq| self.cell(sq).is_none()) {
            targets.push(one);
            if origin.rank().index() == color.pawn_home_rank() {
                if let Some(two) = one.offset(0, dir).filter(|&sq| self.cell(sq).is_none()) {
                    targets.push(two);
                }
            }
        }

        for df in [-1, 1] {
            let Some(diag) = origin.offset(df, dir) else {
                continue;
            };
            let enemy = self.cell(diag).is_some_and(|p| p.color() != color);
            let en_passant = self.en_passant == Some(diag)
                && diag.rank().index() == color.en_passant_capture_rank();
            if enemy || en_passant {
                targets.push(diag);
            }
        }
        targets
    }

    fn knight_targets(&self, origin: Square) -> SquareList {
        self.step(origin, &KNIGHT_STEPS, self.color_at(origin))
    }

    fn bishop_targets(&self, origin: Square) -> SquareList {
        self.slide(origin, &DIAGONAL, self.color_at(origin))
    }

    fn rook_targets(&self, origin: Square) -> SquareList {
        self.slide(origin, &ORTHOGONAL, self.color_at(origin))
    }

    fn king_targets(&self, origin: Square) -> SquareList {
        let color = self.color_at(origin);
        let mut targets = self.step(origin, &KING_STEPS, color);
        if origin != CastleSide::king_origin(color) {
            return targets;
        }
        for side in CastleSide::ALL {
            let rook_home = self.cell(side.rook_origin(color)) == Some(Piece::new(PieceType::Rook, color));
            let path_clear = side.between(color).iter().all(|&sq| self.cell(sq).is_none());
            if self.castling.has(color, side) && rook_home && path_clear {
                targets.push(side.king_target(color));
            }
        }
        targets
    }

    fn is_attacked(&self, square: Square, by: Color) -> bool {
        for ray in ORTHOGONAL {
            if let Some(p) = self.first_along(square, ray) {
                if p.color() == by && matches!(p.kind(), PieceType::Rook | PieceType::Queen) {
                    return true;
                }
            }
        }
        for ray in DIAGONAL {
            if let Some(p) = self.first_along(square, ray) {
                if p.color() == by && matches!(p.kind(), PieceType::Bishop | PieceType::Queen) {
                    return true;
                }
            }
        }
        let hits = |steps: &[(i8, i8)], kind: PieceType| {
            steps.iter().any(|&(df, dr)| {
                square
                    .offset(df, dr)
                    .is_some_and(|sq| self.cell(sq) == Some(Piece::new(kind, by)))
            })
        };
        if hits(&KNIGHT_STEPS, PieceType::Knight) || hits(&KING_STEPS, PieceType::King) {
            return true;
        }
        // An attacking pawn stands one rank behind the square, from its own point of view.
        let behind = -by.pawn_direction();
        hits(&[(-1, behind), (1, behind)], PieceType::Pawn)
    }

    fn exposes_king(&self, mv: &Move) -> bool {
        self.derive(mv, false).is_in_check(mv.color())
    }
}

impl_position_identity!(NaiveBoard);
