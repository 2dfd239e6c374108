//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "0-0", "exd6e.p.", "e8=Q", "Nbd2", "R1e1+".
//!
//! Castling is written `0-0`/`0-0-0` (`O-O`/`O-O-O` also parse). Trailing
//! markers are `+` for check, `++` (or `#`) for mate and `(=)` for
//! stalemate; they are accepted but never required when parsing. Promotion
//! always yields a queen, so only `=Q` resolves to a move.

use crate::MoveGenerator;
use chess_core::{CastleSide, Color, File, Move, ParseError, PieceType, Rank, Square};
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for SAN resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanError {
    /// The text does not follow the SAN grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No legal move matches the text.
    #[error("illegal move: {0}")]
    Illegal(String),

    /// More than one legal move matches the text.
    #[error("ambiguous move {san}: {} candidates", candidates.len())]
    Ambiguous { san: String, candidates: Vec<Move> },
}

/// Trailing annotation after the move body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanMarker {
    Check,
    Checkmate,
    Stalemate,
}

impl SanMarker {
    pub const fn as_str(self) -> &'static str {
        match self {
            SanMarker::Check => "+",
            SanMarker::Checkmate => "++",
            SanMarker::Stalemate => "(=)",
        }
    }
}

/// Grammatical components of a SAN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSan {
    pub piece: PieceType,
    pub from_file: Option<File>,
    pub from_rank: Option<Rank>,
    pub to: SanTarget,
    pub capture: bool,
    pub promotion: Option<PieceType>,
    pub en_passant: bool,
    pub marker: Option<SanMarker>,
}

/// Destination of a SAN move. Castling names a side rather than a square
/// because the king's destination depends on who is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanTarget {
    Square(Square),
    Castle(CastleSide),
}

/// Checks `san` against the SAN grammar and splits it into components.
pub fn validate_san(san: &str) -> Result<ParsedSan, ParseError> {
    let text = san.trim();
    if text.is_empty() {
        return Err(ParseError::invalid_san(san, "empty"));
    }
    let (body, marker) = split_marker(text);

    if let Some(side) = castle_side(body) {
        return Ok(ParsedSan {
            piece: PieceType::King,
            from_file: None,
            from_rank: None,
            to: SanTarget::Castle(side),
            capture: false,
            promotion: None,
            en_passant: false,
            marker,
        });
    }

    let mut parsed = match body.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let piece = PieceType::from_san_letter(c).ok_or_else(|| {
                ParseError::invalid_san(san, format!("invalid piece letter '{}'", c))
            })?;
            parse_piece_move(san, piece, &body[1..])?
        }
        Some(c) if File::from_char(c).is_some() => parse_pawn_move(san, body)?,
        _ => return Err(ParseError::invalid_san(san, "expected a piece letter or a file")),
    };
    parsed.marker = marker;
    Ok(parsed)
}

/// Returns true if `san` follows the SAN grammar.
pub fn is_valid_san(san: &str) -> bool {
    validate_san(san).is_ok()
}

fn split_marker(text: &str) -> (&str, Option<SanMarker>) {
    const MARKERS: [(&str, SanMarker); 4] = [
        ("(=)", SanMarker::Stalemate),
        ("++", SanMarker::Checkmate),
        ("#", SanMarker::Checkmate),
        ("+", SanMarker::Check),
    ];
    for (suffix, marker) in MARKERS {
        if let Some(body) = text.strip_suffix(suffix) {
            return (body, Some(marker));
        }
    }
    (text, None)
}

fn castle_side(body: &str) -> Option<CastleSide> {
    match body {
        "0-0" | "O-O" => Some(CastleSide::King),
        "0-0-0" | "O-O-O" => Some(CastleSide::Queen),
        _ => None,
    }
}

fn square_at(san: &str, chars: &[char]) -> Result<Square, ParseError> {
    match chars {
        [f, r] => {
            let file = File::from_char(*f)
                .ok_or_else(|| ParseError::invalid_san(san, format!("invalid file '{}'", f)))?;
            let rank = Rank::from_char(*r)
                .ok_or_else(|| ParseError::invalid_san(san, format!("invalid rank '{}'", r)))?;
            Ok(Square::new(file, rank))
        }
        _ => Err(ParseError::invalid_san(san, "missing destination square")),
    }
}

fn parse_piece_move(san: &str, piece: PieceType, rest: &str) -> Result<ParsedSan, ParseError> {
    let chars: Vec<char> = rest.chars().collect();
    if chars.len() < 2 {
        return Err(ParseError::invalid_san(san, "too short"));
    }
    let (head, dest) = chars.split_at(chars.len() - 2);
    let to = square_at(san, dest)?;

    let (head, capture) = match head.split_last() {
        Some((&'x', head)) => (head, true),
        _ => (head, false),
    };

    let (from_file, from_rank) = match *head {
        [] => (None, None),
        [c] => match (File::from_char(c), Rank::from_char(c)) {
            (Some(f), _) => (Some(f), None),
            (None, Some(r)) => (None, Some(r)),
            (None, None) => {
                let reason = format!("invalid disambiguation '{}'", c);
                return Err(ParseError::invalid_san(san, reason));
            }
        },
        [f, r] => {
            let file = File::from_char(f);
            let rank = Rank::from_char(r);
            if file.is_none() || rank.is_none() {
                return Err(ParseError::invalid_san(san, "invalid disambiguation"));
            }
            (file, rank)
        }
        _ => return Err(ParseError::invalid_san(san, "disambiguation too long")),
    };

    Ok(ParsedSan {
        piece,
        from_file,
        from_rank,
        to: SanTarget::Square(to),
        capture,
        promotion: None,
        en_passant: false,
        marker: None,
    })
}

fn parse_pawn_move(san: &str, body: &str) -> Result<ParsedSan, ParseError> {
    let (body, en_passant) = match body.strip_suffix("e.p.") {
        Some(rest) => (rest.trim_end(), true),
        None => (body, false),
    };

    let (body, promotion) = match body.split_once('=') {
        Some((rest, letter)) => {
            let mut letters = letter.chars();
            let kind = match (letters.next(), letters.next()) {
                (Some(c), None) => PieceType::from_san_letter(c).filter(|&k| k != PieceType::King),
                _ => None,
            };
            let kind = kind.ok_or_else(|| {
                ParseError::invalid_san(san, format!("invalid promotion piece '{}'", letter))
            })?;
            (rest, Some(kind))
        }
        None => (body, None),
    };

    let chars: Vec<char> = body.chars().collect();
    let (from_file, capture, dest) = match chars.as_slice() {
        [f, 'x', dest @ ..] => (*f, true, dest),
        [f, _] => (*f, false, chars.as_slice()),
        _ => return Err(ParseError::invalid_san(san, "malformed pawn move")),
    };
    let from_file = File::from_char(from_file)
        .ok_or_else(|| ParseError::invalid_san(san, format!("invalid file '{}'", from_file)))?;
    let to = square_at(san, dest)?;

    if en_passant && !capture {
        return Err(ParseError::invalid_san(san, "en passant without capture"));
    }
    if en_passant && promotion.is_some() {
        return Err(ParseError::invalid_san(san, "en passant cannot promote"));
    }
    let last_rank = matches!(to.rank(), Rank::R1 | Rank::R8);
    if promotion.is_some() && !last_rank {
        return Err(ParseError::invalid_san(san, "promotion away from the last rank"));
    }

    Ok(ParsedSan {
        piece: PieceType::Pawn,
        from_file: Some(from_file),
        from_rank: None,
        to: SanTarget::Square(to),
        capture,
        promotion,
        en_passant,
        marker: None,
    })
}

/// Resolves `san` to the legal move it names for the side to move.
///
/// Candidates are the legal moves of the named piece type with the same
/// capture flag, narrowed to the destination and then, while more than one
/// remains, to any source file and rank given in the text.
pub fn parse_san<G: MoveGenerator + ?Sized>(position: &G, san: &str) -> Result<Move, SanError> {
    let parsed = validate_san(san)?;
    let color = position.side_to_move();

    let illegal = |reason: &str| {
        debug!(san, reason, "SAN names no legal move");
        SanError::Illegal(san.trim().to_string())
    };

    if parsed.promotion.is_some_and(|k| k != PieceType::Queen) {
        return Err(illegal("only queen promotion is supported"));
    }

    let to = match parsed.to {
        SanTarget::Square(sq) => sq,
        SanTarget::Castle(side) => side.king_target(color),
    };

    let moves = position.legal_moves(color);
    let mut candidates: Vec<Move> = moves
        .iter()
        .filter(|m| m.piece().kind() == parsed.piece && m.is_capture() == parsed.capture)
        .copied()
        .collect();
    trace!(san, count = candidates.len(), "after piece and capture filter");

    candidates.retain(|m| m.to() == to);
    if let SanTarget::Castle(_) = parsed.to {
        candidates.retain(Move::is_castling);
    }
    trace!(san, count = candidates.len(), "after destination filter");

    // Source hints only narrow a choice; a redundant or wrong hint on a
    // unique move is tolerated.
    if candidates.len() > 1 {
        if let Some(file) = parsed.from_file {
            candidates.retain(|m| m.from().file() == file);
        }
    }
    if candidates.len() > 1 {
        if let Some(rank) = parsed.from_rank {
            candidates.retain(|m| m.from().rank() == rank);
        }
    }
    trace!(san, count = candidates.len(), "after disambiguation");

    if parsed.promotion.is_some() {
        candidates.retain(Move::is_promotion);
    }
    if parsed.en_passant {
        candidates.retain(|m| position.piece_at(m.to()).is_none());
    }

    match candidates.as_slice() {
        [] => Err(illegal("no candidate")),
        [mv] => Ok(*mv),
        _ => {
            debug!(san, count = candidates.len(), "SAN is ambiguous");
            Err(SanError::Ambiguous {
                san: san.trim().to_string(),
                candidates,
            })
        }
    }
}

/// Renders a legal move of `position` in SAN.
///
/// The move must be legal in `position`, which is the state before the move.
pub fn format_san<G: MoveGenerator + ?Sized>(position: &G, mv: &Move) -> String {
    let mut san = String::new();

    if let Some(side) = mv
        .is_castling()
        .then(|| CastleSide::of_king_move(mv.from(), mv.to()))
        .flatten()
    {
        san.push_str(match side {
            CastleSide::King => "0-0",
            CastleSide::Queen => "0-0-0",
        });
        push_marker(position, mv, &mut san);
        return san;
    }

    let piece = mv.piece();
    let from = mv.from();
    let is_pawn = piece.kind() == PieceType::Pawn;
    let target_empty = position.piece_at(mv.to()).is_none();
    let capture = !target_empty || (is_pawn && from.file() != mv.to().file());

    if let Some(letter) = piece.kind().san_letter() {
        san.push(letter);
        san.push_str(&disambiguation(position, mv));
    }

    if capture {
        if is_pawn {
            san.push(from.file().to_char());
        }
        san.push('x');
    }
    san.push_str(&mv.to().to_algebraic());

    if is_pawn && capture && target_empty {
        san.push_str("e.p.");
    }
    if mv.is_promotion() {
        san.push_str("=Q");
    }

    push_marker(position, mv, &mut san);
    san
}

/// Minimal source file and/or rank that singles out `mv` among legal moves
/// of the same piece to the same square.
fn disambiguation<G: MoveGenerator + ?Sized>(position: &G, mv: &Move) -> String {
    let moves = position.legal_moves(mv.color());
    let same_dest: Vec<Square> = moves
        .iter()
        .filter(|o| o.piece() == mv.piece() && o.to() == mv.to())
        .map(|o| o.from())
        .collect();

    if same_dest.len() <= 1 {
        return String::new();
    }

    let from = mv.from();
    if same_dest.iter().filter(|sq| sq.file() == from.file()).count() == 1 {
        return from.file().to_char().to_string();
    }
    if same_dest.iter().filter(|sq| sq.rank() == from.rank()).count() == 1 {
        return from.rank().to_char().to_string();
    }
    from.to_algebraic()
}

fn push_marker<G: MoveGenerator + ?Sized>(position: &G, mv: &Move, san: &mut String) {
    let next = position.derive_boxed(mv, true);
    let opponent: Color = mv.color().opposite();
    let in_check = next.is_in_check(opponent);
    let stuck = next.legal_moves(opponent).is_empty();
    let marker = match (in_check, stuck) {
        (true, true) => Some(SanMarker::Checkmate),
        (true, false) => Some(SanMarker::Check),
        (false, true) => Some(SanMarker::Stalemate),
        (false, false) => None,
    };
    if let Some(marker) = marker {
        san.push_str(marker.as_str());
    }
}
