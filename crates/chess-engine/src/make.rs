//! Applying and reverting moves on a board.
//!
//! `apply` and `revert` are exact inverses for every move the generator
//! produces: after `apply(b, m)` then `revert(b, m)` the board compares
//! equal to what it was, arena included. The legality filter and undo both
//! depend on that.

use crate::game::UndoError;
use crate::movegen::CastleSide;
use crate::Board;
use chess_core::Move;

/// Plays `m` on the board: removes the captured piece (for en passant, the
/// pawn beside the origin), relocates the mover, substitutes the promotion
/// kind, and moves the rook when castling.
pub(crate) fn apply(board: &mut Board, m: Move) {
    if let Some(victim) = m.captured() {
        board.lift(victim);
    }

    board.set_piece_at(m.from(), None);
    board.set_piece_at(m.to(), Some(m.mover()));

    if let Some(kind) = m.promotion() {
        board.set_kind(m.mover(), kind);
    }

    if let Some(side) = CastleSide::from_flag(m.flag()) {
        let (rook_from, rook_to) = side.rook_squares(m.color());
        if let Some(rook) = board.piece_id_at(rook_from) {
            board.set_piece_at(rook_from, None);
            board.set_piece_at(rook_to, Some(rook));
        }
    }
}

/// Takes `m` back. Every precondition is checked before the board is
/// touched, so on error the board is unchanged.
pub(crate) fn revert(board: &mut Board, m: Move) -> Result<(), UndoError> {
    if board.piece_id_at(m.to()) != Some(m.mover()) {
        return Err(UndoError::MoverMissing {
            square: m.to(),
            notation: m.to_string(),
        });
    }
    if board.piece_id_at(m.from()).is_some() {
        return Err(UndoError::OriginOccupied { square: m.from() });
    }

    let castle = CastleSide::from_flag(m.flag()).map(|side| side.rook_squares(m.color()));
    if let Some((rook_from, rook_to)) = castle {
        let rook_home = board.piece_id_at(rook_to).is_some() && board.piece_id_at(rook_from).is_none();
        if !rook_home {
            return Err(UndoError::RookMissing { square: rook_to });
        }
    }

    let restore = match (m.captured(), m.capture_square()) {
        (Some(victim), Some(square)) => {
            if !board.piece(victim).is_captured() {
                return Err(UndoError::CapturedOnBoard { square });
            }
            if square != m.to() && board.piece_id_at(square).is_some() {
                return Err(UndoError::OriginOccupied { square });
            }
            Some((victim, square))
        }
        _ => None,
    };

    if let Some((rook_from, rook_to)) = castle {
        let rook = board.piece_id_at(rook_to);
        board.set_piece_at(rook_to, None);
        board.set_piece_at(rook_from, rook);
    }

    board.set_piece_at(m.to(), None);
    board.set_piece_at(m.from(), Some(m.mover()));
    board.set_kind(m.mover(), m.piece());

    if let Some((victim, square)) = restore {
        board.set_piece_at(square, Some(victim));
    }

    Ok(())
}
