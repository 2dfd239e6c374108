//! Chess positions with interchangeable board representations.
//!
//! This crate provides:
//! - [`Position`] - read-only game state shared by every representation
//! - [`MoveGenerator`] - pseudo-legal and legal move generation, attack
//!   detection and derivation of successor positions
//! - [`NaiveBoard`], [`X88Board`], [`MailboxBoard`] - three storage layouts
//!   behind the same contract
//! - Zobrist hashing, FEN import/export, SAN parsing and generation, perft
//! - [`Game`] - move history with repetition and end-of-game detection
//!
//! # Architecture
//!
//! Positions are immutable values. [`MoveGenerator::derive`] returns a fresh
//! position, so positions can be shared across threads without locking.
//! Legality filtering lives in provided trait methods and is identical for
//! every representation; each representation supplies only storage-specific
//! target generation and attack scans. Positions of different
//! representations compare equal when their state matches.
//!
//! # Example
//!
//! ```
//! use chess_engine::{factory, format_san, parse_san, InitialState, MoveGenerator, Position};
//! use chess_engine::Representation;
//! use chess_core::Color;
//!
//! let start = factory::create(Representation::X88, InitialState::StandardStarting);
//! assert_eq!(start.legal_moves(Color::White).len(), 20);
//!
//! let mv = parse_san(start.as_ref(), "Nf3").unwrap();
//! let next = start.derive_boxed(&mv, true);
//! assert_eq!(next.side_to_move(), Color::Black);
//! assert_eq!(format_san(start.as_ref(), &mv), "Nf3");
//!
//! let naive = factory::translate(Representation::Naive, next.as_ref());
//! assert!(*naive == *next);
//! ```

mod board;
pub mod config;
pub mod factory;
pub mod fen;
mod game;
pub mod movegen;
mod position;
pub mod san;
pub mod zobrist;

pub use board::{MailboxBoard, NaiveBoard, X88Board};
pub use config::{ConfigError, EngineConfig};
pub use factory::{InitialState, Representation};
pub use fen::{format_fen, parse_fen};
pub use game::{Game, GameError, GameStatus, Ply};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{MoveGenerator, MoveList, SquareList};
pub use position::{is_repetition, positions_equal, Position};
pub use san::{format_san, parse_san, validate_san, SanError};
