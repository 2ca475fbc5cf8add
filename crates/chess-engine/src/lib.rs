//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - mailbox board over an arena of [`Piece`]s
//! - [`GameState`] - board plus move history, with legal move generation,
//!   apply and undo
//! - [`Setup`] - starting positions from code, TOML files or FEN
//! - Pseudo-legal move generation and the legality filter
//! - Perft for validating the generator
//!
//! # Architecture
//!
//! Pieces are addressed by [`PieceId`](chess_core::PieceId) handles into the
//! board's arena, so a move can name the piece it captured and undo can put
//! that same piece back. Castling rights and en passant are never stored;
//! they are derived from the history on demand. Legality is decided by
//! playing each candidate on the board and taking it back.
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//!
//! let mut game = GameState::new();
//! game.apply_notation("e2-e4").unwrap();
//! game.apply_notation("e7e5").unwrap();
//! assert_eq!(game.legal_moves().len(), 29);
//!
//! game.undo_last_move().unwrap();
//! assert_eq!(game.ply_count(), 1);
//! ```

mod board;
mod game;
pub mod legal;
mod make;
pub mod movegen;
pub mod notation;
mod piece;
mod setup;

pub use board::{Board, EngineFault};
pub use game::{GameError, GameState, UndoError};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{CastleSide, CastlingRights, MoveList};
pub use notation::{parse_move_text, MoveRequest, NotationError};
pub use piece::Piece;
pub use setup::{Placement, Setup, SetupError};
