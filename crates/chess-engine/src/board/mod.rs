//! Concrete board representations.
//!
//! All three store the same state and answer every [`Position`](crate::Position)
//! and [`MoveGenerator`](crate::MoveGenerator) query identically; they differ
//! only in layout and in how the Zobrist hash is kept.

mod mailbox;
mod naive;
mod x88;

pub use mailbox::MailboxBoard;
pub use naive::NaiveBoard;
pub use x88::X88Board;
