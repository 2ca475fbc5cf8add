//! Mailbox board with a piece arena.
//!
//! The grid maps each of the 64 squares to an optional [`PieceId`]; the
//! arena holds every piece ever placed on this board, captured ones
//! included. Move application and undo go through the crate-private
//! mutation primitives at the bottom of this file.

use crate::movegen::{pawn_attack_squares, targets};
use crate::setup::SetupError;
use crate::Piece;
use chess_core::{Color, File, PieceId, PieceKind, Rank, Square};
use std::fmt;
use thiserror::Error;

/// Internal invariant violations.
///
/// These mean the board was corrupted by misuse of the apply/undo protocol
/// or by bypassing setup validation. They are not recoverable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineFault {
    #[error("cannot find the {0} king on the board")]
    KingNotFound(Color),
}

/// An 8x8 board of piece handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<PieceId>; 64],
    pieces: Vec<Piece>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            pieces: Vec::new(),
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (color, back, pawns) in [
            (Color::White, Rank::R1, Rank::R2),
            (Color::Black, Rank::R8, Rank::R7),
        ] {
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                board.place(kind, color, Square::new(file, back));
            }
            for file in File::ALL {
                board.place(PieceKind::Pawn, color, Square::new(file, pawns));
            }
        }
        board
    }

    /// Adds a new piece to the arena and puts it on `square`.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        color: Color,
        square: Square,
    ) -> Result<PieceId, SetupError> {
        if self.squares[square.index() as usize].is_some() {
            return Err(SetupError::Occupied(square));
        }
        Ok(self.place(kind, color, square))
    }

    fn place(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        // At most one arena entry per square, so 64 entries fit in a u8 handle.
        let id = PieceId::new(self.pieces.len() as u8);
        self.pieces.push(Piece::new(kind, color, square));
        self.squares[square.index() as usize] = Some(id);
        id
    }

    /// Returns the arena entry for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this board (or by the board it was
    /// cloned from).
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Returns the handle of the piece on `square`, if any.
    #[inline]
    pub fn piece_id_at(&self, square: Square) -> Option<PieceId> {
        self.squares[square.index() as usize]
    }

    /// Returns the piece on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.piece_id_at(square).map(|id| self.piece(id))
    }

    /// Iterates the pieces on the board, rank 1 to 8, file a to h.
    pub fn all_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.squares
            .iter()
            .filter_map(move |slot| slot.map(|id| (id, self.piece(id))))
    }

    /// Iterates the pieces of one color that are on the board.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.all_pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the number of arena entries, captured pieces included.
    pub fn arena_len(&self) -> usize {
        self.pieces.len()
    }

    /// Locates the king of `color`.
    pub fn try_find_king(&self, color: Color) -> Result<PieceId, EngineFault> {
        self.pieces_of(color)
            .find(|(_, p)| p.is_king())
            .map(|(id, _)| id)
            .ok_or(EngineFault::KingNotFound(color))
    }

    /// Locates the king of `color`.
    ///
    /// # Panics
    ///
    /// Panics with [`EngineFault::KingNotFound`] if there is none; a valid
    /// position always has one.
    pub fn find_king(&self, color: Color) -> PieceId {
        match self.try_find_king(color) {
            Ok(id) => id,
            Err(fault) => panic!("{}", fault),
        }
    }

    /// Counts the kings of each color, White first.
    pub fn king_counts(&self) -> (usize, usize) {
        self.all_pieces()
            .filter(|(_, p)| p.is_king())
            .fold((0, 0), |(white, black), (_, p)| match p.color {
                Color::White => (white + 1, black),
                Color::Black => (white, black + 1),
            })
    }

    /// Returns true iff there is exactly one king of each color.
    pub fn is_valid(&self) -> bool {
        self.king_counts() == (1, 1)
    }

    /// Returns true if any piece of `by` could move to or capture on `square`.
    ///
    /// Pawns are tested on their two forward diagonals regardless of
    /// occupancy, since their move list only contains diagonals holding an
    /// enemy piece.
    pub fn position_attacked_by(&self, square: Square, by: Color) -> bool {
        self.pieces_of(by).any(|(id, piece)| match (piece.kind, piece.square) {
            (PieceKind::Pawn, Some(from)) => pawn_attack_squares(from, by).any(|sq| sq == square),
            _ => targets(self, id).contains(&square),
        })
    }

    /// Returns true if the piece stands on a square attacked by the other color.
    pub fn is_attacked(&self, id: PieceId) -> bool {
        let piece = self.piece(id);
        piece
            .square
            .is_some_and(|sq| self.position_attacked_by(sq, piece.color.opposite()))
    }

    /// Returns true if both boards have the same kind and color of piece on
    /// every square, whatever their handles.
    pub fn same_placement(&self, other: &Board) -> bool {
        (0..64u8).filter_map(Square::from_index).all(|sq| {
            let ours = self.piece_at(sq).map(|p| (p.kind, p.color));
            let theirs = other.piece_at(sq).map(|p| (p.kind, p.color));
            ours == theirs
        })
    }

    /// Hash of the placement: the sum of `(square + 1) * weight` over the
    /// occupied squares, with one prime weight per kind and color.
    ///
    /// Boards with the same placement hash equal; the distribution is not
    /// tuned for hash tables.
    pub fn position_hash(&self) -> u64 {
        self.all_pieces()
            .filter_map(|(_, p)| p.square.map(|sq| (sq, p)))
            .map(|(sq, p)| (sq.index() as u64 + 1) * placement_weight(p.kind, p.color))
            .sum()
    }

    // Mutation primitives. No validation: callers keep the grid and the
    // arena consistent.

    /// Points `square` at `id` (or clears it) and records the new square on
    /// the piece. Clearing does not touch the previous occupant.
    pub(crate) fn set_piece_at(&mut self, square: Square, id: Option<PieceId>) {
        self.squares[square.index() as usize] = id;
        if let Some(id) = id {
            self.pieces[id.index()].square = Some(square);
        }
    }

    /// Takes a piece off the board, leaving it in the arena as captured.
    pub(crate) fn lift(&mut self, id: PieceId) {
        if let Some(square) = self.pieces[id.index()].square.take() {
            if self.squares[square.index() as usize] == Some(id) {
                self.squares[square.index() as usize] = None;
            }
        }
    }

    pub(crate) fn set_kind(&mut self, id: PieceId, kind: PieceKind) {
        self.pieces[id.index()].kind = kind;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

fn placement_weight(kind: PieceKind, color: Color) -> u64 {
    match (color, kind) {
        (Color::White, PieceKind::Pawn) => 7,
        (Color::White, PieceKind::Rook) => 11,
        (Color::White, PieceKind::Knight) => 13,
        (Color::White, PieceKind::Bishop) => 17,
        (Color::White, PieceKind::Queen) => 23,
        (Color::White, PieceKind::King) => 29,
        (Color::Black, PieceKind::Pawn) => 31,
        (Color::Black, PieceKind::Rook) => 37,
        (Color::Black, PieceKind::Knight) => 41,
        (Color::Black, PieceKind::Bishop) => 43,
        (Color::Black, PieceKind::Queen) => 47,
        (Color::Black, PieceKind::King) => 53,
    }
}

/// Text diagram, rank 8 at the top: `>` marks White pieces, `<` Black ones,
/// `--` an empty square.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, " {} ", rank)?;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(p) => {
                        let marker = match p.color {
                            Color::White => '>',
                            Color::Black => '<',
                        };
                        write!(f, "{}{} ", marker, p.kind.letter())?;
                    }
                    None => write!(f, "-- ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "    A  B  C  D  E  F  G  H")
    }
}
