//! Performance representation on a 0x88 board.
//!
//! The board is 128 cells; index = rank * 16 + file. The right half of each
//! 16-cell row is padding, so a single `index & 0x88` test rejects any step
//! that leaves the board. The Zobrist hash is kept up to date incrementally
//! by every mutation in [`X88Board::derive`].

use crate::position::impl_position_identity;
use crate::zobrist::{full_hash, ZOBRIST};
use crate::{MoveGenerator, Position, Representation, SquareList};
use chess_core::{CastleSide, CastlingRights, Color, Move, Piece, PieceType, Square};

const KNIGHT_DELTAS: [i16; 8] = [33, 31, 18, 14, -14, -18, -31, -33];
const KING_DELTAS: [i16; 8] = [1, 16, 15, 17, -1, -16, -15, -17];
const DIAGONAL_DELTAS: [i16; 4] = [15, 17, -15, -17];
const ORTHOGONAL_DELTAS: [i16; 4] = [1, 16, -1, -16];

#[inline]
const fn to_x88(square: Square) -> i16 {
    let index = square.index() as i16;
    (index >> 3) * 16 + (index & 7)
}

/// Maps a 0x88 index back to a square; `None` for padding or out-of-range indices.
#[inline]
const fn from_x88(index: i16) -> Option<Square> {
    if index & 0x88 != 0 || index < 0 {
        None
    } else {
        Square::from_index(((index >> 4) * 8 + (index & 7)) as u8)
    }
}

/// 0x88 board with an incrementally maintained hash.
#[derive(Debug, Clone)]
pub struct X88Board {
    cells: [Option<Piece>; 128],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    kings: [Option<Square>; 2],
    castled: [bool; 2],
    hash: u64,
}

impl X88Board {
    #[inline]
    fn cell(&self, square: Square) -> Option<Piece> {
        self.cells[to_x88(square) as usize]
    }

    fn put(&mut self, square: Square, piece: Piece) {
        self.cells[to_x88(square) as usize] = Some(piece);
        self.hash ^= ZOBRIST.piece_key(piece, square);
    }

    fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.cells[to_x88(square) as usize].take()?;
        self.hash ^= ZOBRIST.piece_key(piece, square);
        Some(piece)
    }

    fn set_en_passant(&mut self, target: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= ZOBRIST.en_passant_key(old);
        }
        if let Some(new) = target {
            self.hash ^= ZOBRIST.en_passant_key(new);
        }
        self.en_passant = target;
    }

    fn set_castling(&mut self, rights: CastlingRights) {
        self.hash ^= ZOBRIST.castling_key(self.castling.lost_in(rights));
        self.castling = rights;
    }

    fn color_at(&self, origin: Square) -> Color {
        self.cell(origin).map_or(self.side_to_move, Piece::color)
    }

    fn slide(&self, origin: Square, deltas: &[i16], color: Color) -> SquareList {
        let mut targets = SquareList::new();
        let start = to_x88(origin);
        for &delta in deltas {
            let mut index = start + delta;
            while let Some(sq) = from_x88(index) {
                match self.cells[index as usize] {
                    None => targets.push(sq),
                    Some(blocker) => {
                        if blocker.color() != color {
                            targets.push(sq);
                        }
                        break;
                    }
                }
                index += delta;
            }
        }
        targets
    }

    fn step(&self, origin: Square, deltas: &[i16], color: Color) -> SquareList {
        let mut targets = SquareList::new();
        let start = to_x88(origin);
        for &delta in deltas {
            if let Some(sq) = from_x88(start + delta) {
                if self.cell(sq).map_or(true, |p| p.color() != color) {
                    targets.push(sq);
                }
            }
        }
        targets
    }

    /// Returns true if the first piece along `delta` from `start` is one of `kinds` owned by `by`.
    fn ray_hits(&self, start: i16, delta: i16, by: Color, kinds: [PieceType; 2]) -> bool {
        let mut index = start + delta;
        while index & 0x88 == 0 {
            if let Some(piece) = self.cells[index as usize] {
                return piece.color() == by && kinds.contains(&piece.kind());
            }
            index += delta;
        }
        false
    }

    fn step_hits(&self, start: i16, deltas: &[i16], piece: Piece) -> bool {
        deltas.iter().any(|&delta| {
            let index = start + delta;
            index & 0x88 == 0 && self.cells[index as usize] == Some(piece)
        })
    }
}

impl Position for X88Board {
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

    #[inline]
    fn zobrist_hash(&self) -> u64 {
        self.hash
    }
}

impl MoveGenerator for X88Board {
    fn derive_from<P: Position + ?Sized>(position: &P) -> Self {
        let mut cells = [None; 128];
        let mut kings = [None; 2];
        for sq in Square::ALL {
            let piece = position.piece_at(sq);
            if let Some(p) = piece.filter(|p| p.kind() == PieceType::King) {
                kings[p.color().index()] = Some(sq);
            }
            cells[to_x88(sq) as usize] = piece;
        }
        X88Board {
            cells,
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
            hash: full_hash(position),
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

        let mut captured = next.take(to).is_some();
        next.take(from);

        if piece.kind() == PieceType::Pawn
            && from.file() != to.file()
            && !captured
            && self.en_passant == Some(to)
        {
            next.take(Square::new(to.file(), from.rank()));
            captured = true;
        }

        if mv.is_promotion() {
            next.put(to, Piece::new(PieceType::Queen, color));
        } else {
            next.put(to, piece);
        }

        let mut rights = self.castling.touched(from).touched(to);
        if piece.kind() == PieceType::King {
            next.kings[color.index()] = Some(to);
            if let Some(side) = CastleSide::of_king_move(from, to) {
                if let Some(rook) = next.take(side.rook_origin(color)) {
                    next.put(side.rook_target(color), rook);
                }
                next.castled[color.index()] = true;
            }
            rights = rights.without_color(color);
        }
        next.set_castling(rights);

        let en_passant = if mv.is_double_step() {
            from.offset(0, color.pawn_direction())
        } else {
            None
        };
        next.set_en_passant(en_passant);

        if advance_clocks {
            next.halfmove_clock = if piece.kind() == PieceType::Pawn || captured {
                0
            } else {
                self.halfmove_clock.saturating_add(1)
            };
            if color == Color::Black {
                next.fullmove_number = self.fullmove_number.saturating_add(1);
            }
            next.side_to_move = color.opposite();
            next.hash ^= ZOBRIST.white_to_move;
        }
        next
    }

    fn derive_boxed(&self, mv: &Move, advance_clocks: bool) -> Box<dyn MoveGenerator> {
        Box::new(self.derive(mv, advance_clocks))
    }

    fn representation(&self) -> Representation {
        Representation::X88
    }

    fn pawn_targets(&self, origin: Square) -> SquareList {
        let mut targets = SquareList::new();
        let color = self.color_at(origin);
        let forward = color.pawn_direction() as i16 * 16;
        let start = to_x88(origin);

        if let Some(one) = from_x88(start + forward).filter(|&sq| self.cell(sq).is_none()) {
            targets.push(one);
            let home = origin.rank().index() == color.pawn_home_rank();
            if let Some(two) = from_x88(start + 2 * forward)
                .filter(|&sq| home && self.cell(sq).is_none())
            {
                targets.push(two);
            }
        }

        for side in [-1, 1] {
            let Some(diag) = from_x88(start + forward + side) else {
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
        self.step(origin, &KNIGHT_DELTAS, self.color_at(origin))
    }

    fn bishop_targets(&self, origin: Square) -> SquareList {
        self.slide(origin, &DIAGONAL_DELTAS, self.color_at(origin))
    }

    fn rook_targets(&self, origin: Square) -> SquareList {
        self.slide(origin, &ORTHOGONAL_DELTAS, self.color_at(origin))
    }

    fn king_targets(&self, origin: Square) -> SquareList {
        let color = self.color_at(origin);
        let mut targets = self.step(origin, &KING_DELTAS, color);
        if origin != CastleSide::king_origin(color) {
            return targets;
        }
        let rook = Piece::new(PieceType::Rook, color);
        for side in CastleSide::ALL {
            if self.castling.has(color, side)
                && self.cell(side.rook_origin(color)) == Some(rook)
                && side.between(color).iter().all(|&sq| self.cell(sq).is_none())
            {
                targets.push(side.king_target(color));
            }
        }
        targets
    }

    fn is_attacked(&self, square: Square, by: Color) -> bool {
        let start = to_x88(square);
        let straight = [PieceType::Rook, PieceType::Queen];
        let diagonal = [PieceType::Bishop, PieceType::Queen];
        if ORTHOGONAL_DELTAS
            .iter()
            .any(|&d| self.ray_hits(start, d, by, straight))
            || DIAGONAL_DELTAS
                .iter()
                .any(|&d| self.ray_hits(start, d, by, diagonal))
        {
            return true;
        }
        if self.step_hits(start, &KNIGHT_DELTAS, Piece::new(PieceType::Knight, by))
            || self.step_hits(start, &KING_DELTAS, Piece::new(PieceType::King, by))
        {
            return true;
        }
        let behind = -(by.pawn_direction() as i16) * 16;
        self.step_hits(start, &[behind - 1, behind + 1], Piece::new(PieceType::Pawn, by))
    }

    fn exposes_king(&self, mv: &Move) -> bool {
        self.derive(mv, false).is_in_check(mv.color())
    }
}

impl_position_identity!(X88Board);
