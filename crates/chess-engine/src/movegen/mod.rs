//! Pseudo-legal move generation.
//!
//! Generation works one piece at a time and dispatches on [`PieceKind`]:
//! fixed offsets for knights and kings, rays for bishops, rooks and queens,
//! and the pawn's forward, double-step, capture and en passant rules.
//! Moves produced here may still leave the mover's king attacked; the
//! [`legal`](crate::legal) filter removes those.

mod attacks;
mod castling;
pub mod perft;

use crate::Board;
use chess_core::{Color, Move, MoveFlag, PieceId, PieceKind, Square};

pub use attacks::{
    pawn_attack_squares, ray_targets, step_targets, valid_target, BISHOP_DIRECTIONS,
    KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};
pub use castling::{castling_moves, castling_rights, CastleSide, CastlingRights, KING_FILE};

/// A growable list of moves.
///
/// Chess positions have at most 218 legal moves; the backing vector is
/// allocated once with room for that many.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Capacity reserved up front.
    pub const TYPICAL_CAPACITY: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::TYPICAL_CAPACITY),
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }

    /// Returns the moves rendered in move notation.
    pub fn to_strings(&self) -> Vec<String> {
        self.moves.iter().map(|m| m.to_string()).collect()
    }

    /// Returns true if the list holds a move with this rendering.
    pub fn contains_notation(&self, text: &str) -> bool {
        self.moves.iter().any(|m| m.to_string() == text)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.moves.iter()).finish()
    }
}

/// Returns the squares a piece could move to or capture on, by its movement
/// pattern alone.
///
/// Castling and en passant are not included, and pawn diagonals appear only
/// when they hold an enemy piece. Captured pieces have no targets.
pub fn targets(board: &Board, id: PieceId) -> Vec<Square> {
    let piece = board.piece(id);
    let mut out = Vec::new();
    let Some(from) = piece.square else {
        return out;
    };
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, from, color, &mut out),
        PieceKind::Knight => step_targets(board, from, color, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => ray_targets(board, from, color, &BISHOP_DIRECTIONS, &mut out),
        PieceKind::Rook => ray_targets(board, from, color, &ROOK_DIRECTIONS, &mut out),
        PieceKind::Queen => ray_targets(board, from, color, &QUEEN_DIRECTIONS, &mut out),
        PieceKind::King => step_targets(board, from, color, &KING_OFFSETS, &mut out),
    }
    out
}

fn pawn_targets(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    let forward = color.pawn_direction();
    if let Some(one) = from.relative(0, forward) {
        if board.piece_id_at(one).is_none() {
            out.push(one);
            if from.rank() == color.pawn_rank() {
                if let Some(two) = from.relative(0, 2 * forward) {
                    if board.piece_id_at(two).is_none() {
                        out.push(two);
                    }
                }
            }
        }
    }
    for to in pawn_attack_squares(from, color) {
        if board.piece_at(to).is_some_and(|p| p.color != color) {
            out.push(to);
        }
    }
}

/// Adds the pseudo-legal moves of one piece to `moves`.
///
/// `history` is the game so far; the last entry decides en passant and the
/// whole of it decides castling rights.
pub fn pseudo_legal_moves(board: &Board, history: &[Move], id: PieceId, moves: &mut MoveList) {
    let piece = *board.piece(id);
    let Some(from) = piece.square else {
        return;
    };

    if piece.kind == PieceKind::Pawn {
        pawn_moves(board, history, id, from, piece.color, moves);
        return;
    }

    for to in targets(board, id) {
        let m = Move::new(id, piece.kind, piece.color, from, to, MoveFlag::Normal);
        moves.push(match board.piece_id_at(to) {
            Some(victim) => m.capturing(victim),
            None => m,
        });
    }

    if piece.kind == PieceKind::King {
        castling_moves(board, history, id, moves);
    }
}

fn pawn_moves(
    board: &Board,
    history: &[Move],
    id: PieceId,
    from: Square,
    color: Color,
    moves: &mut MoveList,
) {
    for to in targets(board, id) {
        let flag = if to.rank().index().abs_diff(from.rank().index()) == 2 {
            MoveFlag::DoublePush
        } else {
            MoveFlag::Normal
        };
        let m = Move::new(id, PieceKind::Pawn, color, from, to, flag);
        let m = match board.piece_id_at(to) {
            Some(victim) => m.capturing(victim),
            None => m,
        };
        push_pawn_move(m, moves);
    }

    if let Some(m) = en_passant(board, history, id, from, color) {
        moves.push(m);
    }
}

/// Expands a pawn move onto the last rank into the four promotions.
fn push_pawn_move(m: Move, moves: &mut MoveList) {
    if m.to().rank() != m.color().promotion_rank() {
        moves.push(m);
        return;
    }
    for kind in PieceKind::PROMOTIONS {
        if let Some(flag) = MoveFlag::promote_to(kind) {
            moves.push(m.with_flag(flag));
        }
    }
}

/// The en passant capture open to this pawn, if the previous move was an
/// enemy double step that landed right beside it.
fn en_passant(
    board: &Board,
    history: &[Move],
    id: PieceId,
    from: Square,
    color: Color,
) -> Option<Move> {
    let last = history.last()?;
    if !last.is_double_push() || last.color() == color {
        return None;
    }
    let victim_square = last.to();
    if victim_square.rank() != from.rank()
        || victim_square.file().index().abs_diff(from.file().index()) != 1
    {
        return None;
    }
    if board.piece_id_at(victim_square) != Some(last.mover()) {
        return None;
    }
    let d_file = victim_square.file().index() as i8 - from.file().index() as i8;
    let to = from.relative(d_file, color.pawn_direction())?;
    Some(Move::new(id, PieceKind::Pawn, color, from, to, MoveFlag::EnPassant).capturing(last.mover()))
}

/// Generates the pseudo-legal moves of every piece of `color`.
pub fn generate_pseudo_legal(board: &Board, history: &[Move], color: Color) -> MoveList {
    let mut moves = MoveList::new();
    let ids: Vec<PieceId> = board.pieces_of(color).map(|(id, _)| id).collect();
    for id in ids {
        pseudo_legal_moves(board, history, id, &mut moves);
    }
    moves
}
