//! Invariants that hold along every legal line of play.

use chess_core::{Color, Move, PieceType};
use chess_engine::zobrist::full_hash;
use chess_engine::{
    factory, format_san, is_repetition, parse_san, positions_equal, MoveGenerator, Position,
    Representation,
};
use proptest::prelude::*;
use proptest::sample::{select, Index};

const FENS: [&str; 6] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
];

/// Picks a legal move the same way in every representation.
fn pick(position: &dyn MoveGenerator, choice: &Index) -> Option<Move> {
    let ids = position.legal_moves(position.side_to_move()).sorted_ids();
    if ids.is_empty() {
        return None;
    }
    let id = ids[choice.index(ids.len())];
    position
        .legal_moves(position.side_to_move())
        .iter()
        .copied()
        .find(|m| m.to_id() == id)
}

fn assert_step(before: &dyn MoveGenerator, mv: &Move, after: &dyn MoveGenerator) {
    let mover = before.side_to_move();

    // Hash matches a full recomputation.
    assert_eq!(after.zobrist_hash(), full_hash(after));

    // Castling rights never reappear.
    let prev = before.castling_rights().bits();
    let next = after.castling_rights().bits();
    assert_eq!(next & !prev, 0, "rights grew after {}", mv);

    // Clocks.
    let resets = mv.piece().kind() == PieceType::Pawn || mv.is_capture();
    let halfmove = if resets { 0 } else { before.halfmove_clock() + 1 };
    assert_eq!(after.halfmove_clock(), halfmove, "halfmove after {}", mv);
    let fullmove = before.fullmove_number() + u32::from(mover == Color::Black);
    assert_eq!(after.fullmove_number(), fullmove, "fullmove after {}", mv);
    assert_eq!(after.side_to_move(), mover.opposite());

    // En-passant target only behind a double step.
    if mv.is_double_step() {
        let behind = mv.to().offset(0, if mover == Color::White { -1 } else { 1 });
        assert_eq!(after.en_passant_target(), behind);
    } else {
        assert_eq!(after.en_passant_target(), None);
    }

    // The mover never leaves its own king attacked.
    assert!(!after.is_in_check(mover), "{} left {} in check", mv, mover);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn walks_preserve_invariants(
        fen in select(FENS.to_vec()),
        choices in prop::collection::vec(any::<Index>(), 0..40),
    ) {
        let mut positions: Vec<Box<dyn MoveGenerator>> = Representation::ALL
            .iter()
            .map(|&repr| factory::from_fen(repr, fen).unwrap())
            .collect();

        for choice in &choices {
            let Some(mv) = pick(positions[0].as_ref(), choice) else {
                break;
            };
            let next: Vec<Box<dyn MoveGenerator>> = positions
                .iter()
                .map(|p| p.derive_boxed(&mv, true))
                .collect();

            for (before, after) in positions.iter().zip(&next) {
                assert_step(before.as_ref(), &mv, after.as_ref());
            }
            for pair in next.windows(2) {
                prop_assert_eq!(pair[0].zobrist_hash(), pair[1].zobrist_hash());
                prop_assert!(positions_equal(pair[0].as_ref(), pair[1].as_ref()));
            }
            positions = next;
        }
    }

    #[test]
    fn san_roundtrips_for_every_legal_move(
        fen in select(FENS.to_vec()),
        choices in prop::collection::vec(any::<Index>(), 0..12),
        repr in select(Representation::ALL.to_vec()),
    ) {
        let mut position = factory::from_fen(repr, fen).unwrap();
        for choice in &choices {
            for mv in position.legal_moves(position.side_to_move()).iter() {
                let san = format_san(position.as_ref(), mv);
                let parsed = parse_san(position.as_ref(), &san);
                prop_assert_eq!(parsed.ok(), Some(*mv), "{} in {}", san, fen);
            }
            let Some(mv) = pick(position.as_ref(), choice) else {
                break;
            };
            position = position.derive_boxed(&mv, true);
        }
    }

    #[test]
    fn move_ids_identify_legal_moves(
        fen in select(FENS.to_vec()),
        choices in prop::collection::vec(any::<Index>(), 0..12),
    ) {
        let mut position = factory::from_fen(Representation::X88, fen).unwrap();
        for choice in &choices {
            let moves = position.legal_moves(position.side_to_move());
            let ids = moves.sorted_ids();
            let mut unique = ids.clone();
            unique.dedup();
            prop_assert_eq!(unique.len(), ids.len());
            for mv in moves.iter() {
                let decoded = Move::from_id(mv.to_id()).unwrap();
                prop_assert_eq!(decoded.to_id(), mv.to_id());
                prop_assert_eq!(decoded.from(), mv.from());
                prop_assert_eq!(decoded.to(), mv.to());
                prop_assert_eq!(decoded.piece(), mv.piece());
            }
            let Some(mv) = pick(position.as_ref(), choice) else {
                break;
            };
            position = position.derive_boxed(&mv, true);
        }
    }

    #[test]
    fn equality_implies_equal_hashes(
        fen in select(FENS.to_vec()),
        choices in prop::collection::vec(any::<Index>(), 1..8),
    ) {
        let start = factory::from_fen(Representation::Naive, fen).unwrap();
        let mut position = factory::translate(Representation::Mailbox, start.as_ref());
        for choice in &choices {
            let Some(mv) = pick(position.as_ref(), choice) else {
                break;
            };
            position = position.derive_boxed(&mv, true);
            let copy = factory::translate(Representation::X88, position.as_ref());
            prop_assert!(*copy == *position);
            prop_assert_eq!(copy.zobrist_hash(), position.zobrist_hash());
            prop_assert!(is_repetition(copy.as_ref(), position.as_ref()));
            if *position == *start {
                prop_assert_eq!(position.zobrist_hash(), start.zobrist_hash());
            }
        }
    }
}
