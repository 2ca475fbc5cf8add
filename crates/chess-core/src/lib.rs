//! Core value types for the chess rules engine.
//!
//! This crate provides the fundamental types shared by the engine and its
//! collaborators:
//! - [`PieceKind`], [`PieceId`] and [`Color`] for pieces
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] and [`MoveFlag`] for moves and their notation
//! - [`Fen`] for reading and writing piece placements

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError, PlacedPiece};
pub use mov::{Move, MoveFlag};
pub use piece::{PieceId, PieceKind};
pub use square::{File, Rank, Square, SquareError};
