//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth,
//! which can be compared against published values. The walk plays and takes
//! back moves on a single game state, so it also exercises undo.

use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(game: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        game.push_move(m);
        nodes += perft(game, depth - 1);
        take_back(game);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = game.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        game.push_move(m);
        let nodes = if depth > 1 {
            perft(game, depth - 1)
        } else {
            1
        };
        take_back(game);
        results.push((m.to_coordinate(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn take_back(game: &mut GameState) {
    if let Err(err) = game.undo_last_move() {
        panic!("perft could not take back its own move: {}", err);
    }
}
