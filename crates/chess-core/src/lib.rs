//! Core value types for chess.
//!
//! This crate provides the immutable building blocks shared by every board
//! representation in `chess-engine`:
//! - [`Color`], [`PieceType`] and [`Piece`] for piece identity
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] with its compact id encoding
//! - [`CastlingRights`] and [`CastleSide`]
//! - [`Fen`] records and their errors

mod castling;
mod color;
mod error;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use error::ParseError;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::{Piece, PieceType};
pub use square::{File, Rank, Square};
