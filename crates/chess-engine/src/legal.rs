//! Legality filtering.
//!
//! A pseudo-legal move is legal when, after playing it, the mover's own
//! king is not attacked. Each candidate is played on the real board,
//! examined, and taken back, so the board is unchanged when filtering
//! returns. Surviving moves get their check flag set.

use crate::make::{apply, revert};
use crate::movegen::MoveList;
use crate::Board;
use chess_core::Move;
use tracing::trace;

/// Plays `m`, decides whether it is legal, and takes it back.
///
/// Returns the move with its check flag set when the mover's king is safe
/// afterwards, and `None` otherwise.
///
/// # Panics
///
/// Panics if the move cannot be taken back or a king is missing; both mean
/// the board was already corrupt.
pub fn keep_if_safe(board: &mut Board, m: Move) -> Option<Move> {
    // Only reachable from a setup where the side not to move is in check.
    if m.captured().is_some_and(|victim| board.piece(victim).is_king()) {
        trace!(mv = %m, "discarding king capture");
        return None;
    }

    apply(board, m);
    let own_king = board.find_king(m.color());
    let exposed = board.is_attacked(own_king);
    let gives_check = !exposed && board.is_attacked(board.find_king(m.color().opposite()));
    if let Err(err) = revert(board, m) {
        panic!("failed to take back {} while filtering: {}", m, err);
    }

    if exposed {
        trace!(mv = %m, "discarding move that leaves the king attacked");
        None
    } else {
        Some(m.with_check(gives_check))
    }
}

/// Filters pseudo-legal moves down to the legal ones, in their original
/// order.
pub fn filter_legal(board: &mut Board, moves: MoveList) -> MoveList {
    moves
        .into_iter()
        .filter_map(|m| keep_if_safe(board, m))
        .collect()
}
