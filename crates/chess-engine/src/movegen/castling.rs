//! Castling rights and castling move synthesis.
//!
//! Rights are not stored. They are recomputed from the move history on
//! every query: a side keeps the right to castle on one wing while its king
//! and that wing's rook stand on their home squares and neither piece
//! appears as the mover of any move in the history. Undoing a move therefore
//! restores the rights with no extra bookkeeping.

use super::MoveList;
use crate::Board;
use chess_core::{Color, File, Move, MoveFlag, PieceId, PieceKind, Square};

/// The two wings a king can castle towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Returns the move flag for castling to this side.
    pub const fn flag(self) -> MoveFlag {
        match self {
            CastleSide::Kingside => MoveFlag::CastleKingside,
            CastleSide::Queenside => MoveFlag::CastleQueenside,
        }
    }

    /// Returns the side a castling flag refers to.
    pub const fn from_flag(flag: MoveFlag) -> Option<Self> {
        match flag {
            MoveFlag::CastleKingside => Some(CastleSide::Kingside),
            MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// File of the rook's home square.
    pub const fn rook_file(self) -> File {
        match self {
            CastleSide::Kingside => File::H,
            CastleSide::Queenside => File::A,
        }
    }

    /// File the king lands on.
    pub const fn king_target_file(self) -> File {
        match self {
            CastleSide::Kingside => File::G,
            CastleSide::Queenside => File::C,
        }
    }

    /// File the rook lands on.
    pub const fn rook_target_file(self) -> File {
        match self {
            CastleSide::Kingside => File::F,
            CastleSide::Queenside => File::D,
        }
    }

    /// Files strictly between king and rook; all must be empty.
    const fn between(self) -> &'static [File] {
        match self {
            CastleSide::Kingside => &[File::F, File::G],
            CastleSide::Queenside => &[File::B, File::C, File::D],
        }
    }

    /// Files the king passes over and lands on; none may be attacked.
    const fn king_path(self) -> [File; 2] {
        match self {
            CastleSide::Kingside => [File::F, File::G],
            CastleSide::Queenside => [File::D, File::C],
        }
    }

    /// Rook origin and destination for `color` castling to this side.
    pub const fn rook_squares(self, color: Color) -> (Square, Square) {
        let rank = color.home_rank();
        (
            Square::new(self.rook_file(), rank),
            Square::new(self.rook_target_file(), rank),
        )
    }
}

/// File of the king's home square.
pub const KING_FILE: File = File::E;

/// Which wings a side may still castle to, ignoring the current path and
/// attack conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    kingside: bool,
    queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        kingside: false,
        queenside: false,
    };

    pub const BOTH: CastlingRights = CastlingRights {
        kingside: true,
        queenside: true,
    };

    #[inline]
    pub const fn can_castle(self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }

    #[inline]
    pub const fn can_castle_kingside(self) -> bool {
        self.kingside
    }

    #[inline]
    pub const fn can_castle_queenside(self) -> bool {
        self.queenside
    }
}

fn has_moved(history: &[Move], id: PieceId) -> bool {
    history.iter().any(|m| m.mover() == id)
}

fn unmoved(board: &Board, history: &[Move], square: Square, kind: PieceKind, color: Color) -> bool {
    board.piece_id_at(square).is_some_and(|id| {
        let p = board.piece(id);
        p.kind == kind && p.color == color && !has_moved(history, id)
    })
}

/// Derives the castling rights of `color` from the board and the history.
pub fn castling_rights(board: &Board, history: &[Move], color: Color) -> CastlingRights {
    let rank = color.home_rank();
    if !unmoved(board, history, Square::new(KING_FILE, rank), PieceKind::King, color) {
        return CastlingRights::NONE;
    }
    let rook_ready = |side: CastleSide| {
        unmoved(
            board,
            history,
            Square::new(side.rook_file(), rank),
            PieceKind::Rook,
            color,
        )
    };
    CastlingRights {
        kingside: rook_ready(CastleSide::Kingside),
        queenside: rook_ready(CastleSide::Queenside),
    }
}

/// Adds the castling moves available to `king`.
///
/// A castle is offered when the rights hold, the squares between king and
/// rook are empty, and neither the king's square nor the two squares it
/// crosses are attacked. The rook's relocation is part of applying the
/// king's move.
pub fn castling_moves(board: &Board, history: &[Move], king: PieceId, moves: &mut MoveList) {
    let piece = board.piece(king);
    let Some(from) = piece.square else {
        return;
    };
    let color = piece.color;
    let rights = castling_rights(board, history, color);
    if rights == CastlingRights::NONE {
        return;
    }

    let rank = color.home_rank();
    let them = color.opposite();
    if board.position_attacked_by(from, them) {
        return;
    }

    for side in CastleSide::BOTH {
        if !rights.can_castle(side) {
            continue;
        }
        let path_clear = side
            .between()
            .iter()
            .all(|&file| board.piece_id_at(Square::new(file, rank)).is_none());
        if !path_clear {
            continue;
        }
        let path_safe = side
            .king_path()
            .iter()
            .all(|&file| !board.position_attacked_by(Square::new(file, rank), them));
        if !path_safe {
            continue;
        }
        let to = Square::new(side.king_target_file(), rank);
        moves.push(Move::new(
            king,
            PieceKind::King,
            color,
            from,
            to,
            side.flag(),
        ));
    }
}
