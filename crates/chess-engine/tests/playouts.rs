//! Random playouts checking the invariants that must hold in every
//! reachable position.

use chess_core::Fen;
use chess_engine::GameState;
use proptest::prelude::*;

const STARTS: [&str; 3] = [
    Fen::STARTPOS,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_playout_keeps_invariants(
        start in 0usize..STARTS.len(),
        choices in prop::collection::vec(any::<prop::sample::Index>(), 1..60),
    ) {
        let mut game = GameState::from_fen(STARTS[start]).unwrap();
        let initial = game.clone();

        for choice in &choices {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }
            let m = moves[choice.index(moves.len())];
            let mover = m.color();
            let before = game.clone();

            let played = game.apply_move(m).unwrap();
            prop_assert_eq!(played, m);
            prop_assert!(game.board().is_valid());

            let own_king = game.board().find_king(mover);
            prop_assert!(!game.board().is_attacked(own_king), "{} left the king attacked", m);
            let their_king = game.board().find_king(mover.opposite());
            prop_assert_eq!(m.is_check(), game.board().is_attacked(their_king));
            prop_assert_eq!(game.is_check(), m.is_check());

            let undone = game.undo_last_move().unwrap();
            prop_assert_eq!(undone, m);
            prop_assert_eq!(&game, &before);
            game.apply_move(m).unwrap();
        }

        while game.ply_count() > 0 {
            game.undo_last_move().unwrap();
        }
        prop_assert_eq!(&game, &initial);
    }

    #[test]
    fn hash_follows_placement(
        choices in prop::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let mut a = GameState::new();
        for choice in &choices {
            let moves = a.legal_moves();
            if moves.is_empty() {
                break;
            }
            a.apply_move(moves[choice.index(moves.len())]).unwrap();
        }
        let b = GameState::from_fen(&a.to_fen().to_string()).unwrap();
        prop_assert!(a.board().same_placement(b.board()));
        prop_assert_eq!(a.position_hash(), b.position_hash());
    }
}
