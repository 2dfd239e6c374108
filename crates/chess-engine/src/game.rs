//! Game history on top of any representation.
//!
//! [`Game`] plays moves from SAN or from [`Move`] values, records each ply
//! with its SAN text and the hash of the position it was played from, and
//! answers end-of-game and repetition questions.

use crate::position::is_repetition;
use crate::san::{format_san, parse_san, SanError};
use crate::{MoveGenerator, MoveList};
use chess_core::{Color, Fen, FenError, Move};
use thiserror::Error;
use tracing::debug;

/// A recorded ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ply {
    pub mv: Move,
    pub san: String,
    /// Zobrist hash of the position before the move.
    pub hash_before: u64,
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    San(#[from] SanError),

    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("game has already ended")]
    GameOver,
}

/// Whether the side to move can still play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// A game: the current position, the positions before it and the plies between them.
#[derive(Debug, Clone)]
pub struct Game<G> {
    current: G,
    /// `previous[i]` is the position `plies[i]` was played from.
    previous: Vec<G>,
    plies: Vec<Ply>,
}

impl<G: MoveGenerator + Clone> Game<G> {
    /// Starts a game from `position`.
    pub fn new(position: G) -> Self {
        Game {
            current: position,
            previous: Vec::new(),
            plies: Vec::new(),
        }
    }

    /// Starts a game from the standard starting position.
    pub fn standard() -> Self {
        Self::new(G::derive_from(&Fen::startpos()))
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::new(G::derive_from(&Fen::parse(fen)?)))
    }

    /// The current position.
    pub fn position(&self) -> &G {
        &self.current
    }

    pub fn start_position(&self) -> &G {
        self.previous.first().unwrap_or(&self.current)
    }

    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    /// SAN text of every ply played so far.
    pub fn san_history(&self) -> Vec<&str> {
        self.plies.iter().map(|p| p.san.as_str()).collect()
    }

    pub fn legal_moves(&self) -> MoveList {
        let position = self.position();
        position.legal_moves(position.side_to_move())
    }

    pub fn status(&self) -> GameStatus {
        let position = self.position();
        let color = position.side_to_move();
        if !position.legal_moves(color).is_empty() {
            return GameStatus::Ongoing;
        }
        if position.is_in_check(color) {
            GameStatus::Checkmate {
                winner: color.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Plays a move given in SAN and returns it.
    pub fn play_san(&mut self, san: &str) -> Result<Move, GameError> {
        self.ensure_ongoing()?;
        let mv = parse_san(&self.current, san)?;
        self.push(mv);
        Ok(mv)
    }

    /// Plays `mv` if it is legal. The captured piece is taken from the
    /// matching legal move, so a quiet move value is enough.
    pub fn play(&mut self, mv: Move) -> Result<Move, GameError> {
        self.ensure_ongoing()?;
        let legal = self
            .legal_moves()
            .iter()
            .find(|m| m.to_id() == mv.to_id())
            .copied()
            .ok_or_else(|| GameError::IllegalMove(mv.to_uci()))?;
        self.push(legal);
        Ok(legal)
    }

    /// Times the current position has occurred, including now.
    pub fn repetition_count(&self) -> usize {
        let current = &self.current;
        self.previous
            .iter()
            .chain(std::iter::once(current))
            .filter(|p| is_repetition(*p, current))
            .count()
    }

    /// Returns true on threefold repetition or once the halfmove clock reaches 100.
    pub fn can_claim_draw(&self) -> bool {
        self.repetition_count() >= 3 || self.position().halfmove_clock() >= 100
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn push(&mut self, mv: Move) {
        let san = format_san(&self.current, &mv);
        let hash_before = self.current.zobrist_hash();
        let next = self.current.derive(&mv, true);
        debug!(ply = self.plies.len() + 1, %san, "move played");
        self.previous.push(std::mem::replace(&mut self.current, next));
        self.plies.push(Ply {
            mv,
            san,
            hash_before,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MailboxBoard, NaiveBoard, Position, X88Board};
    use chess_core::{Piece, Square};

    #[test]
    fn new_game() {
        let game: Game<X88Board> = Game::standard();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.repetition_count(), 1);
    }

    #[test]
    fn play_san_records_history() {
        let mut game: Game<NaiveBoard> = Game::standard();
        game.play_san("e4").unwrap();
        game.play_san("e5").unwrap();
        game.play_san("Nf3").unwrap();
        assert_eq!(game.san_history(), vec!["e4", "e5", "Nf3"]);
        assert_eq!(game.plies()[0].hash_before, game.start_position().zobrist_hash());
        assert_eq!(game.position().fullmove_number(), 2);
        assert_eq!(game.position().side_to_move(), Color::Black);
    }

    #[test]
    fn play_fills_capture() {
        let mut game: Game<MailboxBoard> =
            Game::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
                .unwrap();
        let e4 = Square::parse("e4").unwrap();
        let d5 = Square::parse("d5").unwrap();
        let played = game.play(Move::quiet(Piece::WHITE_PAWN, e4, d5)).unwrap();
        assert_eq!(played.captured(), Some(Piece::BLACK_PAWN));
        assert_eq!(game.san_history(), vec!["exd5"]);
    }

    #[test]
    fn illegal_move() {
        let mut game: Game<X88Board> = Game::standard();
        let e2 = Square::parse("e2").unwrap();
        let e5 = Square::parse("e5").unwrap();
        let err = game.play(Move::quiet(Piece::WHITE_PAWN, e2, e5)).unwrap_err();
        assert_eq!(err, GameError::IllegalMove("e2e5".to_string()));
        let err = game.play_san("Ke2").unwrap_err();
        assert!(matches!(err, GameError::San(SanError::Illegal(_))));
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game: Game<X88Board> = Game::standard();
        for san in ["f3", "e5", "g4", "Qh4"] {
            game.play_san(san).unwrap();
        }
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(game.san_history().last(), Some(&"Qh4++"));
        assert_eq!(game.play_san("a3"), Err(GameError::GameOver));
    }

    #[test]
    fn stalemate() {
        let game: Game<NaiveBoard> = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn threefold_repetition() {
        let mut game: Game<MailboxBoard> = Game::standard();
        for _ in 0..2 {
            for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
                game.play_san(san).unwrap();
            }
        }
        assert_eq!(game.repetition_count(), 3);
        assert!(game.can_claim_draw());
    }

    #[test]
    fn fifty_move_rule() {
        let game: Game<X88Board> = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
        assert_eq!(game.repetition_count(), 1);
        assert!(game.can_claim_draw());
    }
}
