//! FEN import and export for every representation.
//!
//! The parsed [`Fen`] record is itself a read-only [`Position`], so any
//! representation is built from text with
//! [`derive_from`](MoveGenerator::derive_from). FEN does not record whether a
//! side has castled; positions built from FEN start with both flags cleared.

use crate::zobrist::full_hash;
use crate::{MoveGenerator, Position};
use chess_core::{CastlingRights, Color, Fen, FenError, Piece, PieceType, Square};

impl Position for Fen {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index() as usize]
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
        let king = Piece::new(PieceType::King, color);
        Square::ALL
            .into_iter()
            .find(|&sq| self.board[sq.index() as usize] == Some(king))
    }

    fn has_castled(&self, _color: Color) -> bool {
        false
    }

    fn zobrist_hash(&self) -> u64 {
        full_hash(self)
    }
}

/// Parses a FEN string into representation `G`.
pub fn parse_fen<G: MoveGenerator>(fen: &str) -> Result<G, FenError> {
    let record = Fen::parse(fen)?;
    Ok(G::derive_from(&record))
}

/// Captures any position as a FEN record.
pub fn snapshot<P: Position + ?Sized>(position: &P) -> Fen {
    let mut board = [None; 64];
    for sq in Square::ALL {
        board[sq.index() as usize] = position.piece_at(sq);
    }
    Fen {
        board,
        side_to_move: position.side_to_move(),
        castling: position.castling_rights(),
        en_passant: position.en_passant_target(),
        halfmove_clock: position.halfmove_clock(),
        fullmove_number: position.fullmove_number(),
    }
}

/// Renders any position as a FEN string.
pub fn format_fen<P: Position + ?Sized>(position: &P) -> String {
    snapshot(position).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MailboxBoard, NaiveBoard, X88Board};

    const POSITIONS: [&str; 5] = [
        Fen::STARTPOS,
        Fen::EMPTY,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    ];

    #[test]
    fn round_trips_every_representation() {
        for fen in POSITIONS {
            assert_eq!(format_fen(&parse_fen::<NaiveBoard>(fen).unwrap()), fen);
            assert_eq!(format_fen(&parse_fen::<X88Board>(fen).unwrap()), fen);
            assert_eq!(format_fen(&parse_fen::<MailboxBoard>(fen).unwrap()), fen);
        }
    }

    #[test]
    fn record_is_a_position() {
        let record = Fen::startpos();
        assert_eq!(record.king_square(Color::White), Some(Square::E1));
        assert_eq!(record.king_square(Color::Black), Some(Square::E8));
        let board: X88Board = parse_fen(Fen::STARTPOS).unwrap();
        assert!(board == record);
        assert_eq!(snapshot(&board), record);
    }

    #[test]
    fn malformed_fen_is_an_error() {
        assert!(matches!(
            parse_fen::<NaiveBoard>("8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            parse_fen::<X88Board>("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(parse_fen::<MailboxBoard>("8/8/8/8/8/8/8/8 w - - 0 0").is_err());
    }
}
