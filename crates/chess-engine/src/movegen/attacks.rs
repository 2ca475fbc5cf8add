//! Movement patterns: fixed offsets for knights and kings, rays for sliders.

use crate::Board;
use chess_core::{Color, Square};

/// Knight jumps as (file, rank) offsets.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King steps as (file, rank) offsets.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Diagonal ray directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Orthogonal ray directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Queen rays: bishop and rook directions together.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
];

/// Returns true if a piece of `color` may land on `square`: the square is
/// empty or holds an opposing piece.
#[inline]
pub fn valid_target(board: &Board, square: Square, color: Color) -> bool {
    board
        .piece_at(square)
        .map_or(true, |occupant| occupant.color != color)
}

/// Collects the valid targets one offset away from `from`.
pub fn step_targets(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in offsets {
        if let Some(to) = from.relative(d_file, d_rank) {
            if valid_target(board, to, color) {
                out.push(to);
            }
        }
    }
}

/// Walks each ray from `from` until it leaves the board or hits a piece.
/// An opposing piece's square is included, a friendly one is not.
pub fn ray_targets(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in directions {
        let mut current = from;
        while let Some(to) = current.relative(d_file, d_rank) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(occupant) => {
                    if occupant.color != color {
                        out.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// The two squares diagonally in front of a pawn, whether occupied or not.
pub fn pawn_attack_squares(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let forward = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |d_file| from.relative(d_file, forward))
}
