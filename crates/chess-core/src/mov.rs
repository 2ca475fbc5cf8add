//! Move representation.

use crate::{Color, PieceId, PieceKind, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move (no special action).
    Normal = 0,
    /// Pawn double push from starting rank.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture. The destination is the square the victim passed over.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the flag promoting to `kind`, if a pawn can promote to it.
    #[inline]
    pub const fn promote_to(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Knight => Some(MoveFlag::PromoteKnight),
            PieceKind::Bishop => Some(MoveFlag::PromoteBishop),
            PieceKind::Rook => Some(MoveFlag::PromoteRook),
            PieceKind::Queen => Some(MoveFlag::PromoteQueen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A chess move.
///
/// A move names the piece that makes it by handle, together with the kind
/// and color that piece had before moving, so that undo can restore a
/// promoted pawn. `captured` is the handle of the removed piece, which for
/// en passant is not on the destination square.
///
/// The check flag is filled in by the legality filter after generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    mover: PieceId,
    piece: PieceKind,
    color: Color,
    from: Square,
    to: Square,
    flag: MoveFlag,
    captured: Option<PieceId>,
    check: bool,
}

impl Move {
    /// Creates a new non-capturing move.
    #[inline]
    pub const fn new(
        mover: PieceId,
        piece: PieceKind,
        color: Color,
        from: Square,
        to: Square,
        flag: MoveFlag,
    ) -> Self {
        Move {
            mover,
            piece,
            color,
            from,
            to,
            flag,
            captured: None,
            check: false,
        }
    }

    /// Returns a copy of this move that captures `victim`.
    #[inline]
    pub const fn capturing(self, victim: PieceId) -> Self {
        Move {
            captured: Some(victim),
            ..self
        }
    }

    /// Returns a copy of this move with the check flag set to `check`.
    #[inline]
    pub const fn with_check(self, check: bool) -> Self {
        Move { check, ..self }
    }

    /// Returns a copy of this move with a different flag.
    #[inline]
    pub const fn with_flag(self, flag: MoveFlag) -> Self {
        Move { flag, ..self }
    }

    /// Returns the handle of the moving piece.
    #[inline]
    pub const fn mover(self) -> PieceId {
        self.mover
    }

    /// Returns the kind of the moving piece before the move.
    #[inline]
    pub const fn piece(self) -> PieceKind {
        self.piece
    }

    /// Returns the color of the moving side.
    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    /// Returns the handle of the captured piece, if any.
    #[inline]
    pub const fn captured(self) -> Option<PieceId> {
        self.captured
    }

    /// Returns the kind the pawn promotes to, if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.flag.promotion_piece()
    }

    /// Returns true if this move gives check.
    #[inline]
    pub const fn is_check(self) -> bool {
        self.check
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        self.flag.is_castling()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag, MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.flag, MoveFlag::DoublePush)
    }

    /// Returns the square the captured piece stood on.
    ///
    /// For en passant that is the square beside the origin, on the
    /// destination's file.
    pub fn capture_square(self) -> Option<Square> {
        self.captured?;
        if self.is_en_passant() {
            Some(Square::new(self.to.file(), self.from.rank()))
        } else {
            Some(self.to)
        }
    }

    /// Returns true if both moves go from the same square to the same square
    /// with the same promotion. Handles and the check flag are ignored.
    pub fn same_action(self, other: Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion() == other.promotion()
    }

    /// Returns the coordinate form of this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(self) -> String {
        match self.promotion() {
            Some(kind) => format!(
                "{}{}{}",
                self.from,
                self.to,
                kind.letter().to_ascii_lowercase()
            ),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {} {})", self.color, self.piece, self)
    }
}

/// Renders `e2-e4`, `e4xd5`, `O-O`, `O-O-O`, `a7-a8Q`, with a trailing `+`
/// when the move gives check.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flag {
            MoveFlag::CastleKingside => write!(f, "O-O")?,
            MoveFlag::CastleQueenside => write!(f, "O-O-O")?,
            _ => {
                let sep = if self.is_capture() { 'x' } else { '-' };
                write!(f, "{}{}{}", self.from, sep, self.to)?;
                if let Some(kind) = self.promotion() {
                    write!(f, "{}", kind.letter())?;
                }
            }
        }
        if self.check {
            write!(f, "+")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn pawn_move(from: &str, to: &str, flag: MoveFlag) -> Move {
        Move::new(
            PieceId::new(8),
            PieceKind::Pawn,
            Color::White,
            sq(from),
            sq(to),
            flag,
        )
    }

    #[test]
    fn move_accessors() {
        let m = pawn_move("e2", "e4", MoveFlag::DoublePush);
        assert_eq!(m.mover(), PieceId::new(8));
        assert_eq!(m.piece(), PieceKind::Pawn);
        assert_eq!(m.color(), Color::White);
        assert_eq!(m.from(), sq("e2"));
        assert_eq!(m.to(), sq("e4"));
        assert!(m.is_double_push());
        assert!(!m.is_capture());
        assert!(!m.is_check());
    }

    #[test]
    fn quiet_and_capture_notation() {
        assert_eq!(pawn_move("e2", "e4", MoveFlag::DoublePush).to_string(), "e2-e4");
        let capture = pawn_move("e4", "d5", MoveFlag::Normal).capturing(PieceId::new(27));
        assert_eq!(capture.to_string(), "e4xd5");
        assert_eq!(capture.with_check(true).to_string(), "e4xd5+");
    }

    #[test]
    fn promotion_notation() {
        let m = pawn_move("a7", "a8", MoveFlag::PromoteQueen);
        assert_eq!(m.to_string(), "a7-a8Q");
        assert_eq!(m.promotion(), Some(PieceKind::Queen));
        let m = pawn_move("a7", "b8", MoveFlag::PromoteKnight)
            .capturing(PieceId::new(30))
            .with_check(true);
        assert_eq!(m.to_string(), "a7xb8N+");
    }

    #[test]
    fn castling_notation() {
        let king = |to: &str, flag| {
            Move::new(
                PieceId::new(4),
                PieceKind::King,
                Color::White,
                sq("e1"),
                sq(to),
                flag,
            )
        };
        assert_eq!(king("g1", MoveFlag::CastleKingside).to_string(), "O-O");
        assert_eq!(king("c1", MoveFlag::CastleQueenside).to_string(), "O-O-O");
        assert_eq!(
            king("g1", MoveFlag::CastleKingside)
                .with_check(true)
                .to_string(),
            "O-O+"
        );
        assert!(king("g1", MoveFlag::CastleKingside).is_castling());
    }

    #[test]
    fn en_passant_capture_square() {
        let m = pawn_move("e5", "d6", MoveFlag::EnPassant).capturing(PieceId::new(19));
        assert!(m.is_en_passant());
        assert_eq!(m.capture_square(), Some(sq("d5")));
        assert_eq!(m.to_string(), "e5xd6");

        let plain = pawn_move("e5", "d6", MoveFlag::Normal).capturing(PieceId::new(19));
        assert_eq!(plain.capture_square(), Some(sq("d6")));
        assert_eq!(pawn_move("e5", "e6", MoveFlag::Normal).capture_square(), None);
    }

    #[test]
    fn same_action_ignores_check_and_handles() {
        let a = pawn_move("a7", "a8", MoveFlag::PromoteRook);
        let b = Move::new(
            PieceId::new(0),
            PieceKind::Pawn,
            Color::White,
            sq("a7"),
            sq("a8"),
            MoveFlag::PromoteRook,
        )
        .with_check(true);
        assert!(a.same_action(b));
        assert!(!a.same_action(a.with_flag(MoveFlag::PromoteQueen)));
    }

    #[test]
    fn coordinate_form() {
        assert_eq!(pawn_move("e2", "e4", MoveFlag::DoublePush).to_coordinate(), "e2e4");
        assert_eq!(
            pawn_move("e7", "e8", MoveFlag::PromoteKnight).to_coordinate(),
            "e7e8n"
        );
    }

    #[test]
    fn move_flag_promotion_piece() {
        assert_eq!(MoveFlag::Normal.promotion_piece(), None);
        assert_eq!(MoveFlag::EnPassant.promotion_piece(), None);
        for kind in PieceKind::PROMOTIONS {
            let flag = MoveFlag::promote_to(kind).unwrap();
            assert!(flag.is_promotion());
            assert_eq!(flag.promotion_piece(), Some(kind));
        }
        assert_eq!(MoveFlag::promote_to(PieceKind::King), None);
        assert_eq!(MoveFlag::promote_to(PieceKind::Pawn), None);
    }

    #[test]
    fn move_flag_is_castling() {
        assert!(!MoveFlag::Normal.is_castling());
        assert!(!MoveFlag::DoublePush.is_castling());
        assert!(MoveFlag::CastleKingside.is_castling());
        assert!(MoveFlag::CastleQueenside.is_castling());
        assert!(!MoveFlag::EnPassant.is_castling());
        assert!(!MoveFlag::PromoteQueen.is_castling());
    }
}
