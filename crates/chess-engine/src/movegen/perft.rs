//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions always produce a queen here, so published counts only apply
//! to positions where no pawn promotes within the searched depth.

use super::MoveGenerator;
use tracing::trace;

/// Counts the number of leaf nodes at the given depth.
pub fn perft<G: MoveGenerator>(position: &G, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves(position.side_to_move());

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&position.derive(m, true), depth - 1))
        .sum()
}

/// Perft with divide: the node count below each root move, sorted by
/// coordinate notation. Useful for locating a generator bug by comparing
/// against another engine's divide output.
pub fn perft_divide<G: MoveGenerator>(position: &G, depth: u32) -> Vec<(String, u64)> {
    let moves = position.legal_moves(position.side_to_move());
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&position.derive(m, true), depth - 1)
            } else {
                1
            };
            trace!(mv = %m.to_uci(), nodes, "perft divide");
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;
    use crate::{MailboxBoard, NaiveBoard, X88Board};
    use chess_core::Fen;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn x88(fen: &str) -> X88Board {
        parse_fen(fen).unwrap()
    }

    #[test]
    fn perft_startpos_shallow() {
        let position = x88(Fen::STARTPOS);
        assert_eq!(perft(&position, 0), 1);
        assert_eq!(perft(&position, 1), 20);
        assert_eq!(perft(&position, 2), 400);
        assert_eq!(perft(&position, 3), 8902);
    }

    #[test]
    fn perft_startpos_depth_4() {
        let position = x88(Fen::STARTPOS);
        assert_eq!(perft(&position, 4), 197281);
    }

    // Kiwipete: castling, en passant and pins, no promotions before depth 4.
    #[test]
    fn perft_kiwipete() {
        let position = x88(KIWIPETE);
        assert_eq!(perft(&position, 1), 48);
        assert_eq!(perft(&position, 2), 2039);
    }

    #[test]
    fn perft_kiwipete_depth_3() {
        let position = x88(KIWIPETE);
        assert_eq!(perft(&position, 3), 97862);
    }

    // Position 3: check evasion and a horizontally pinned en-passant capture.
    #[test]
    fn perft_position3() {
        let position = x88(POSITION_3);
        assert_eq!(perft(&position, 1), 14);
        assert_eq!(perft(&position, 2), 191);
        assert_eq!(perft(&position, 3), 2812);
    }

    #[test]
    fn perft_position4_depth_1() {
        let position = x88("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
        assert_eq!(perft(&position, 1), 6);
    }

    // The published count is 44 with d7xc8 under four promotion pieces; a
    // queen-only generator sees one of them.
    #[test]
    fn perft_position5_auto_queen() {
        let position = x88("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1");
        assert_eq!(perft(&position, 1), 41);
    }

    #[test]
    fn representations_agree() {
        for fen in [Fen::STARTPOS, KIWIPETE, POSITION_3] {
            let expected = perft(&x88(fen), 2);
            assert_eq!(perft(&parse_fen::<NaiveBoard>(fen).unwrap(), 2), expected);
            assert_eq!(perft(&parse_fen::<MailboxBoard>(fen).unwrap(), 2), expected);
        }
    }

    #[test]
    fn perft_divide_works() {
        let position = x88(Fen::STARTPOS);
        let results = perft_divide(&position, 1);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);

        let results = perft_divide(&position, 2);
        assert_eq!(results.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert_eq!(results[0], ("a2a3".to_string(), 20));
    }
}
