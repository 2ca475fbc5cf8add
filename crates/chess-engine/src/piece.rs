//! Pieces as stored in a board's arena.

use chess_core::{Color, PieceKind, Square};

/// A piece with its kind, color and current square.
///
/// `square` is `None` once the piece has been captured. The entry stays in
/// the arena so that moves in the history can still refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Option<Square>,
}

impl Piece {
    /// Creates a piece standing on `square`.
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square: Some(square),
        }
    }

    #[inline]
    pub const fn is_captured(&self) -> bool {
        self.square.is_none()
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    #[inline]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns the FEN character of this piece.
    pub const fn fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_piece_is_on_board() {
        let knight = Piece::new(PieceKind::Knight, Color::Black, Square::B8);
        assert!(!knight.is_captured());
        assert!(!knight.is_king());
        assert_eq!(knight.fen_char(), 'n');
    }

    #[test]
    fn captured_piece_has_no_square() {
        let mut pawn = Piece::new(PieceKind::Pawn, Color::White, Square::A1);
        pawn.square = None;
        assert!(pawn.is_captured());
        assert!(pawn.is_pawn());
    }
}
