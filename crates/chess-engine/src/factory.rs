//! Building positions by representation kind.

use crate::{MailboxBoard, MoveGenerator, NaiveBoard, Position, X88Board};
use chess_core::{Fen, FenError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Storage strategy of a [`MoveGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// 8x8 grid, the correctness reference.
    Naive,
    /// 0x88 array with an incremental hash.
    #[default]
    X88,
    /// 10x12 array with sentinel border.
    Mailbox,
}

impl Representation {
    pub const ALL: [Representation; 3] = [
        Representation::Naive,
        Representation::X88,
        Representation::Mailbox,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Representation::Naive => "naive",
            Representation::X88 => "x88",
            Representation::Mailbox => "mailbox",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for text that names no [`Representation`] or [`InitialState`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {name}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    fn new(kind: &'static str, name: &str) -> Self {
        UnknownName {
            kind,
            name: name.to_string(),
        }
    }
}

impl FromStr for Representation {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Representation::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownName::new("representation", s))
    }
}

/// Named starting states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialState {
    /// No pieces, White to move, no rights.
    Empty,
    #[default]
    StandardStarting,
}

impl InitialState {
    pub const fn fen(self) -> &'static str {
        match self {
            InitialState::Empty => Fen::EMPTY,
            InitialState::StandardStarting => Fen::STARTPOS,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            InitialState::Empty => "empty",
            InitialState::StandardStarting => "standard_starting",
        }
    }
}

impl fmt::Display for InitialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitialState {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(InitialState::Empty),
            "standard_starting" | "standard" | "startpos" => Ok(InitialState::StandardStarting),
            _ => Err(UnknownName::new("initial state", s)),
        }
    }
}

/// Copies `position` into the storage named by `representation`.
pub fn translate<P: Position + ?Sized>(
    representation: Representation,
    position: &P,
) -> Box<dyn MoveGenerator> {
    debug!(%representation, hash = position.zobrist_hash(), "translating position");
    match representation {
        Representation::Naive => Box::new(NaiveBoard::derive_from(position)),
        Representation::X88 => Box::new(X88Board::derive_from(position)),
        Representation::Mailbox => Box::new(MailboxBoard::derive_from(position)),
    }
}

/// Builds a named initial state in the given representation.
pub fn create(representation: Representation, state: InitialState) -> Box<dyn MoveGenerator> {
    debug!(%representation, %state, "creating position");
    match state {
        InitialState::Empty => translate(representation, &Fen::default()),
        InitialState::StandardStarting => translate(representation, &Fen::startpos()),
    }
}

/// Parses `fen` into the given representation.
pub fn from_fen(
    representation: Representation,
    fen: &str,
) -> Result<Box<dyn MoveGenerator>, FenError> {
    let record = Fen::parse(fen)?;
    Ok(translate(representation, &record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Square};

    #[test]
    fn names_round_trip() {
        for repr in Representation::ALL {
            assert_eq!(repr.to_string().parse::<Representation>(), Ok(repr));
        }
        assert_eq!("X88".parse::<Representation>(), Ok(Representation::X88));
        let err = "bitboard".parse::<Representation>().unwrap_err();
        assert_eq!(err.to_string(), "unknown representation: bitboard");
        assert_eq!("empty".parse::<InitialState>(), Ok(InitialState::Empty));
    }

    #[test]
    fn create_each_representation() {
        for repr in Representation::ALL {
            let start = create(repr, InitialState::StandardStarting);
            assert_eq!(start.representation(), repr);
            assert_eq!(start.legal_moves(Color::White).len(), 20);

            let empty = create(repr, InitialState::Empty);
            assert!(Square::ALL.iter().all(|&sq| empty.piece_at(sq).is_none()));
            assert_eq!(empty.king_square(Color::White), None);
            assert!(!empty.is_in_check(Color::White));
            assert!(empty.legal_moves(Color::White).is_empty());
        }
    }

    #[test]
    fn translated_positions_are_equal() {
        let naive = create(Representation::Naive, InitialState::StandardStarting);
        for repr in Representation::ALL {
            let other = translate(repr, naive.as_ref());
            assert!(*other == *naive);
            assert_eq!(other.zobrist_hash(), naive.zobrist_hash());
        }
    }

    #[test]
    fn from_fen_rejects_malformed_input() {
        assert!(from_fen(Representation::Mailbox, "not a fen").is_err());
        let kiwi = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let pos = from_fen(Representation::X88, kiwi).unwrap();
        assert_eq!(pos.legal_moves(Color::White).len(), 48);
    }
}
