//! Mailbox representation on a 10x12 board.
//!
//! The 8x8 playing area sits inside a border of sentinel slots two ranks
//! deep and one file wide, so a knight jump from any edge square lands on a
//! sentinel rather than wrapping. Slot index = (rank + 2) * 10 + file + 1.

use crate::position::impl_position_identity;
use crate::zobrist::full_hash;
use crate::{MoveGenerator, Position, Representation, SquareList};
use chess_core::{CastleSide, CastlingRights, Color, Move, Piece, PieceType, Square};

const KNIGHT_OFFSETS: [i8; 8] = [21, 19, 12, 8, -8, -12, -19, -21];
const KING_OFFSETS: [i8; 8] = [1, 10, 9, 11, -1, -10, -9, -11];
const DIAGONAL_OFFSETS: [i8; 4] = [9, 11, -9, -11];
const ORTHOGONAL_OFFSETS: [i8; 4] = [1, 10, -1, -10];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Offboard,
    Empty,
    Piece(Piece),
}

/// Slot index of each square.
const MAILBOX_64: [u8; 64] = {
    let mut table = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        table[i] = ((i / 8 + 2) * 10 + i % 8 + 1) as u8;
        i += 1;
    }
    table
};

/// Square index of each slot, or -1 for sentinels.
const MAILBOX_120: [i8; 120] = {
    let mut table = [-1i8; 120];
    let mut i = 0;
    while i < 64 {
        table[MAILBOX_64[i] as usize] = i as i8;
        i += 1;
    }
    table
};

#[inline]
const fn slot_of(square: Square) -> usize {
    MAILBOX_64[square.index() as usize] as usize
}

#[inline]
fn square_of(slot: usize) -> Option<Square> {
    u8::try_from(MAILBOX_120[slot]).ok().and_then(Square::from_index)
}

/// Mailbox board; the hash is computed once per constructed or derived position.
#[derive(Debug, Clone)]
pub struct MailboxBoard {
    slots: [Slot; 120],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    kings: [Option<Square>; 2],
    castled: [bool; 2],
    hash: u64,
}

impl MailboxBoard {
    #[inline]
    fn get(&self, square: Square) -> Option<Piece> {
        match self.slots[slot_of(square)] {
            Slot::Piece(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.slots[slot_of(square)] = piece.map_or(Slot::Empty, Slot::Piece);
    }

    fn color_at(&self, origin: Square) -> Color {
        self.get(origin).map_or(self.side_to_move, Piece::color)
    }

    /// Slot reached from `slot` by `offset`. The border is deep enough that
    /// every offset used here stays within 0..120.
    #[inline]
    fn neighbour(slot: usize, offset: i8) -> usize {
        (slot as isize + offset as isize) as usize
    }

    fn walk(&self, origin: Square, offsets: &[i8], color: Color, sliding: bool) -> SquareList {
        let mut targets = SquareList::new();
        for &offset in offsets {
            let mut slot = Self::neighbour(slot_of(origin), offset);
            loop {
                match self.slots[slot] {
                    Slot::Offboard => break,
                    Slot::Empty => {
                        if let Some(sq) = square_of(slot) {
                            targets.push(sq);
                        }
                    }
                    Slot::Piece(blocker) => {
                        if blocker.color() != color {
                            if let Some(sq) = square_of(slot) {
                                targets.push(sq);
                            }
                        }
                        break;
                    }
                }
                if !sliding {
                    break;
                }
                slot = Self::neighbour(slot, offset);
            }
        }
        targets
    }

    fn first_piece(&self, from: usize, offset: i8) -> Option<Piece> {
        let mut slot = Self::neighbour(from, offset);
        loop {
            match self.slots[slot] {
                Slot::Offboard => return None,
                Slot::Piece(piece) => return Some(piece),
                Slot::Empty => slot = Self::neighbour(slot, offset),
            }
        }
    }

    fn rehash(mut self) -> Self {
        self.hash = full_hash(&self);
        self
    }
}

impl Position for MailboxBoard {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.get(square)
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
        self.hash
    }
}

impl MoveGenerator for MailboxBoard {
    fn derive_from<P: Position + ?Sized>(position: &P) -> Self {
        let mut board = MailboxBoard {
            slots: [Slot::Offboard; 120],
            side_to_move: position.side_to_move(),
            castling: position.castling_rights(),
            en_passant: position.en_passant_target(),
            halfmove_clock: position.halfmove_clock(),
            fullmove_number: position.fullmove_number(),
            kings: [None; 2],
            castled: [
                position.has_castled(Color::White),
                position.has_castled(Color::Black),
            ],
            hash: 0,
        };
        for sq in Square::ALL {
            let piece = position.piece_at(sq);
            if let Some(p) = piece.filter(|p| p.kind() == PieceType::King) {
                board.kings[p.color().index()] = Some(sq);
            }
            board.set(sq, piece);
        }
        board.rehash()
    }

    fn derive(&self, mv: &Move, advance_clocks: bool) -> Self {
        let piece = mv.piece();
        let (from, to) = (mv.from(), mv.to());
        assert_eq!(
            self.get(from),
            Some(piece),
            "derive: {:?} does not match the piece on {}",
            mv,
            from
        );
        let color = piece.color();
        let mut next = self.clone();

        let mut captured = self.get(to).is_some();
        next.set(from, None);
        if piece.kind() == PieceType::Pawn
            && from.file() != to.file()
            && !captured
            && self.en_passant == Some(to)
        {
            next.set(Square::new(to.file(), from.rank()), None);
            captured = true;
        }

        let placed = if mv.is_promotion() {
            Piece::new(PieceType::Queen, color)
        } else {
            piece
        };
        next.set(to, Some(placed));

        next.castling = self.castling.touched(from).touched(to);
        if piece.kind() == PieceType::King {
            next.kings[color.index()] = Some(to);
            next.castling = next.castling.without_color(color);
            if let Some(side) = CastleSide::of_king_move(from, to) {
                let rook = next.get(side.rook_origin(color));
                next.set(side.rook_origin(color), None);
                next.set(side.rook_target(color), rook);
                next.castled[color.index()] = true;
            }
        }

        next.en_passant = mv
            .is_double_step()
            .then(|| from.offset(0, color.pawn_direction()))
            .flatten();

        if advance_clocks {
            let irreversible = piece.kind() == PieceType::Pawn || captured;
            next.halfmove_clock = if irreversible {
                0
            } else {
                self.halfmove_clock.saturating_add(1)
            };
            next.fullmove_number = self
                .fullmove_number
                .saturating_add(u32::from(color == Color::Black));
            next.side_to_move = color.opposite();
        }
        next.rehash()
    }

    fn derive_boxed(&self, mv: &Move, advance_clocks: bool) -> Box<dyn MoveGenerator> {
        Box::new(self.derive(mv, advance_clocks))
    }

    fn representation(&self) -> Representation {
        Representation::Mailbox
    }

    fn pawn_targets(&self, origin: Square) -> SquareList {
        let mut targets = SquareList::new();
        let color = self.color_at(origin);
        let forward = color.pawn_direction() * 10;
        let slot = slot_of(origin);

        let one = Self::neighbour(slot, forward);
        if self.slots[one] == Slot::Empty {
            targets.extend(square_of(one));
            let two = Self::neighbour(one, forward);
            if origin.rank().index() == color.pawn_home_rank() && self.slots[two] == Slot::Empty {
                targets.extend(square_of(two));
            }
        }

        for side in [-1, 1] {
            let diag = Self::neighbour(slot, forward + side);
            let Some(sq) = square_of(diag) else {
                continue;
            };
            let enemy = matches!(self.slots[diag], Slot::Piece(p) if p.color() != color);
            let en_passant = self.en_passant == Some(sq)
                && sq.rank().index() == color.en_passant_capture_rank();
            if enemy || en_passant {
                targets.push(sq);
            }
        }
        targets
    }

    fn knight_targets(&self, origin: Square) -> SquareList {
        self.walk(origin, &KNIGHT_OFFSETS, self.color_at(origin), false)
    }

    fn bishop_targets(&self, origin: Square) -> SquareList {
        self.walk(origin, &DIAGONAL_OFFSETS, self.color_at(origin), true)
    }

    fn rook_targets(&self, origin: Square) -> SquareList {
        self.walk(origin, &ORTHOGONAL_OFFSETS, self.color_at(origin), true)
    }

    fn king_targets(&self, origin: Square) -> SquareList {
        let color = self.color_at(origin);
        let mut targets = self.walk(origin, &KING_OFFSETS, color, false);
        if origin == CastleSide::king_origin(color) {
            let rook = Piece::new(PieceType::Rook, color);
            for side in CastleSide::ALL {
                let clear = side.between(color).iter().all(|&sq| self.get(sq).is_none());
                if clear
                    && self.castling.has(color, side)
                    && self.get(side.rook_origin(color)) == Some(rook)
                {
                    targets.push(side.king_target(color));
                }
            }
        }
        targets
    }

    fn is_attacked(&self, square: Square, by: Color) -> bool {
        let slot = slot_of(square);
        let is = |s: usize, kind: PieceType| self.slots[s] == Slot::Piece(Piece::new(kind, by));

        if KNIGHT_OFFSETS
            .iter()
            .any(|&o| is(Self::neighbour(slot, o), PieceType::Knight))
            || KING_OFFSETS
                .iter()
                .any(|&o| is(Self::neighbour(slot, o), PieceType::King))
        {
            return true;
        }

        let behind = -by.pawn_direction() * 10;
        if [behind - 1, behind + 1]
            .iter()
            .any(|&o| is(Self::neighbour(slot, o), PieceType::Pawn))
        {
            return true;
        }

        let slides = |offsets: &[i8], kind: PieceType| {
            offsets.iter().any(|&o| {
                self.first_piece(slot, o).is_some_and(|p| {
                    p.color() == by && (p.kind() == kind || p.kind() == PieceType::Queen)
                })
            })
        };
        slides(&ORTHOGONAL_OFFSETS, PieceType::Rook) || slides(&DIAGONAL_OFFSETS, PieceType::Bishop)
    }

    fn exposes_king(&self, mv: &Move) -> bool {
        self.derive(mv, false).is_in_check(mv.color())
    }
}

impl_position_identity!(MailboxBoard);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;
    use crate::X88Board;
    use chess_core::Fen;

    fn board(fen: &str) -> MailboxBoard {
        parse_fen(fen).unwrap()
    }

    #[test]
    fn tables_are_inverse() {
        assert_eq!(slot_of(Square::A1), 21);
        assert_eq!(slot_of(Square::H8), 98);
        for sq in Square::ALL {
            assert_eq!(square_of(slot_of(sq)), Some(sq));
        }
        assert_eq!(MAILBOX_120.iter().filter(|&&i| i >= 0).count(), 64);
    }

    #[test]
    fn border_stops_knights() {
        let b = board("7k/8/8/8/8/8/8/N6K w - - 0 1");
        let targets = b.knight_targets(Square::A1).sorted();
        assert_eq!(
            targets,
            vec![Square::parse("c2").unwrap(), Square::parse("b3").unwrap()]
        );
    }

    #[test]
    fn castling_through_attacked_square_is_illegal() {
        // Black rook on f8 covers f1, which the king crosses on the short side.
        let b = board("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let targets = b.legal_targets(Square::E1);
        assert!(!targets.contains(Square::G1));
        assert!(targets.contains(Square::C1));
    }

    #[test]
    fn cannot_castle_out_of_check() {
        let b = board("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let targets = b.legal_targets(Square::E1);
        assert!(!targets.contains(Square::G1));
        assert!(!targets.contains(Square::C1));
    }

    #[test]
    fn pinned_piece_cannot_leave_line() {
        let b = board("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(b.legal_targets(Square::parse("e2").unwrap()).is_empty());
    }

    #[test]
    fn derived_line_matches_x88() {
        let mut mailbox = board(Fen::STARTPOS);
        let mut x88: X88Board = parse_fen(Fen::STARTPOS).unwrap();
        for ply in 0..12 {
            let moves = mailbox.legal_moves(mailbox.side_to_move());
            assert_eq!(moves.sorted_ids(), x88.legal_moves(x88.side_to_move()).sorted_ids());
            let mv = moves[(ply * 7) % moves.len()];
            mailbox = mailbox.derive(&mv, true);
            x88 = x88.derive(&mv, true);
            assert_eq!(mailbox, x88);
            assert_eq!(mailbox.zobrist_hash(), x88.zobrist_hash());
        }
    }
}
