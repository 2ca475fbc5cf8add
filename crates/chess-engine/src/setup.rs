//! Describing starting positions.
//!
//! A [`Setup`] lists pieces and the side to move. It can be built in code,
//! read from a TOML file, or read from the placement and active-color
//! fields of a FEN string. A setup file looks like this:
//!
//! ```toml
//! side_to_move = "black"
//!
//! [[pieces]]
//! kind = "king"
//! color = "white"
//! square = "e1"
//!
//! [[pieces]]
//! kind = "king"
//! color = "black"
//! square = "e8"
//! ```

use crate::Board;
use chess_core::{Color, Fen, FenError, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading or validating a setup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read setup file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse setup: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("two pieces placed on {0}")]
    Occupied(Square),

    #[error("a position needs one king per side, found {white_kings} white and {black_kings} black")]
    InvalidPosition {
        white_kings: usize,
        black_kings: usize,
    },
}

/// One piece of a setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

/// A starting position: the pieces and which side moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    #[serde(default = "default_side")]
    pub side_to_move: Color,
    #[serde(default)]
    pub pieces: Vec<Placement>,
}

fn default_side() -> Color {
    Color::White
}

impl Setup {
    /// An empty setup with `side_to_move` to play.
    pub fn new(side_to_move: Color) -> Self {
        Setup {
            side_to_move,
            pieces: Vec::new(),
        }
    }

    /// Adds a piece.
    pub fn place(mut self, kind: PieceKind, color: Color, square: Square) -> Self {
        self.pieces.push(Placement {
            kind,
            color,
            square,
        });
        self
    }

    /// The standard starting position, White to move.
    pub fn standard() -> Self {
        let board = Board::standard();
        let pieces = board
            .all_pieces()
            .filter_map(|(_, p)| {
                p.square.map(|square| Placement {
                    kind: p.kind,
                    color: p.color,
                    square,
                })
            })
            .collect();
        Setup {
            side_to_move: Color::White,
            pieces,
        }
    }

    /// Parses a TOML setup.
    pub fn from_toml(text: &str) -> Result<Self, SetupError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a TOML setup file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Reads the placement and active-color fields of a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parsed = Fen::parse(fen)?;
        let pieces = parsed
            .pieces
            .into_iter()
            .map(|p| Placement {
                kind: p.kind,
                color: p.color,
                square: p.square,
            })
            .collect();
        Ok(Setup {
            side_to_move: parsed.side_to_move,
            pieces,
        })
    }

    /// Builds the board, rejecting doubly occupied squares and positions
    /// without exactly one king per side.
    pub fn into_board(self) -> Result<Board, SetupError> {
        let mut board = Board::empty();
        for p in &self.pieces {
            board.add_piece(p.kind, p.color, p.square)?;
        }
        let (white_kings, black_kings) = board.king_counts();
        if !board.is_valid() {
            return Err(SetupError::InvalidPosition {
                white_kings,
                black_kings,
            });
        }
        Ok(board)
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::standard()
    }
}
