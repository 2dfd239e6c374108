//! FEN (Forsyth-Edwards Notation) records.

use crate::{CastleSide, CastlingRights, Color, Piece, PieceType, Rank, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A fully parsed FEN record.
///
/// Representations in `chess-engine` are built from and rendered to this
/// record, which keeps every board layout round-trip compatible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement indexed by [`Square::index`].
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    /// Half-moves since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Starts at 1 and increments after Black's move.
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// A board without pieces.
    pub const EMPTY: &'static str = "8/8/8/8/8/8/8/8 w - - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = Self::parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = match parts[5].parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => return Err(FenError::InvalidFullmoveNumber(parts[5].to_string())),
        };

        Ok(Fen {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = [None; 64];
        let mut counts = [[0u32; 6]; 2];
        for (i, text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if piece.kind() == PieceType::Pawn && (rank == 0 || rank == 7) {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "pawn on rank {}",
                            rank + 1
                        )));
                    }
                    if let Some(sq) = Square::from_coords(file, rank) {
                        board[sq.index() as usize] = Some(piece);
                    }
                    counts[piece.color().index()][piece.kind().index()] += 1;
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                if file > 8 {
                    break;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} does not describe 8 squares",
                    rank + 1
                )));
            }
        }

        for color in Color::ALL {
            Self::check_material(color, &counts[color.index()])?;
        }

        Ok(board)
    }

    /// Rejects material no game can reach: a second king, more than 16
    /// pieces, more than 8 pawns, or more promoted pieces than missing pawns.
    /// This also bounds the number of moves any parsed position can have.
    fn check_material(color: Color, counts: &[u32; 6]) -> Result<(), FenError> {
        let count = |kind: PieceType| counts[kind.index()];
        let invalid = |reason: String| Err(FenError::InvalidPiecePlacement(reason));

        if count(PieceType::King) > 1 {
            return invalid(format!("{} has {} kings", color, count(PieceType::King)));
        }
        let total: u32 = counts.iter().sum();
        if total > 16 {
            return invalid(format!("{} has {} pieces", color, total));
        }
        let pawns = count(PieceType::Pawn);
        if pawns > 8 {
            return invalid(format!("{} has {} pawns", color, pawns));
        }
        let promoted = count(PieceType::Queen).saturating_sub(1)
            + count(PieceType::Rook).saturating_sub(2)
            + count(PieceType::Bishop).saturating_sub(2)
            + count(PieceType::Knight).saturating_sub(2);
        if pawns + promoted > 8 {
            return invalid(format!(
                "{} has {} promoted pieces with {} pawns left",
                color, promoted, pawns
            ));
        }
        Ok(())
    }

    fn parse_castling(castling: &str) -> Result<CastlingRights, FenError> {
        if castling == "-" {
            return Ok(CastlingRights::NONE);
        }

        let mut rights = CastlingRights::NONE;
        for c in castling.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::King),
                'Q' => (Color::White, CastleSide::Queen),
                'k' => (Color::Black, CastleSide::King),
                'q' => (Color::Black, CastleSide::Queen),
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if rights.has(color, side) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate right '{}'",
                    c
                )));
            }
            rights = rights.with(color, side);
        }
        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }
        match Square::parse(ep) {
            Ok(sq) if sq.rank() == Rank::R3 || sq.rank() == Rank::R6 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// The standard starting position as a parsed record.
    pub fn startpos() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }

    /// Returns the piece placement field.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let index = (rank * 8 + file) as usize;
                match self.board[index] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    fn castling_field(&self) -> String {
        if self.castling.is_empty() {
            return "-".to_string();
        }
        self.castling
            .iter()
            .map(|(color, side)| {
                let c = match side {
                    CastleSide::King => 'k',
                    CastleSide::Queen => 'q',
                };
                match color {
                    Color::White => c.to_ascii_uppercase(),
                    Color::Black => c,
                }
            })
            .collect()
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement(),
            side,
            self.castling_field(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}

impl Default for Fen {
    fn default() -> Self {
        Fen {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}
