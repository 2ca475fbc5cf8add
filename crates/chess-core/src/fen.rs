//! Reading and writing the placement part of FEN.
//!
//! Only the piece placement and active color fields are used. Castling
//! availability and the en passant square are derived from move history by
//! the engine, so those fields are accepted but ignored, and so are the
//! clocks.

use crate::{Color, PieceKind, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),
}

/// A piece standing on a square, as read from a placement string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// Parsed placement and side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Pieces in placement order: rank 8 to 1, file a to h.
    pub pieces: Vec<PlacedPiece>,
    pub side_to_move: Color,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    /// Parses a FEN string. A missing active color means White.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.is_empty() || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let pieces = Self::parse_placement(parts[0])?;

        let side_to_move = match parts.get(1).copied() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        Ok(Fen {
            pieces,
            side_to_move,
        })
    }

    fn parse_placement(placement: &str) -> Result<Vec<PlacedPiece>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::new();
        for (i, rank) in ranks.iter().enumerate() {
            let rank_index = 7 - i as u8;
            let mut file = 0u32;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    let square = (file < 8)
                        .then(|| Square::from_index(rank_index * 8 + file as u8))
                        .flatten()
                        .ok_or_else(|| {
                            FenError::InvalidPiecePlacement(format!(
                                "rank {} has more than 8 squares",
                                rank_index + 1
                            ))
                        })?;
                    pieces.push(PlacedPiece {
                        square,
                        kind,
                        color,
                    });
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank_index + 1
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank_index + 1,
                    file
                )));
            }
        }

        Ok(pieces)
    }

    /// Looks up the piece on a square.
    pub fn piece_at(&self, square: Square) -> Option<(PieceKind, Color)> {
        self.pieces
            .iter()
            .find(|p| p.square == square)
            .map(|p| (p.kind, p.color))
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty_count = 0;
            for file in 0..8u8 {
                let piece = Square::from_index(rank * 8 + file).and_then(|sq| self.piece_at(sq));
                match piece {
                    Some((kind, color)) => {
                        if empty_count > 0 {
                            write!(f, "{}", empty_count)?;
                            empty_count = 0;
                        }
                        write!(f, "{}", kind.to_fen_char(color))?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{}", empty_count)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, " {}", side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.pieces.len(), 32);
        assert_eq!(
            fen.piece_at(Square::E1),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(
            fen.piece_at(Square::D8),
            Some((PieceKind::Queen, Color::Black))
        );
    }

    #[test]
    fn trailing_fields_are_ignored() {
        let fen =
            Fen::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 3").unwrap();
        assert_eq!(fen.side_to_move, Color::Black);
        assert_eq!(fen.pieces.len(), 32);
    }

    #[test]
    fn missing_color_means_white() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.pieces.len(), 2);
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b";
        let parsed = Fen::parse(original).unwrap();
        assert_eq!(parsed.to_string(), original);
        assert_eq!(Fen::parse(Fen::STARTPOS).unwrap().to_string(), Fen::STARTPOS);
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(Fen::parse(""), Err(FenError::InvalidPartCount(0))));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::InvalidPartCount(7))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_rank_count() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8 w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_invalid_char() {
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_wrong_squares() {
        assert!(matches!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("7/8/8/8/8/8/8/8 w"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(9);
        assert!(format!("{}", err).contains('9'));

        let err = FenError::InvalidActiveColor("x".to_string());
        assert!(format!("{}", err).contains('x'));

        let err = FenError::InvalidPiecePlacement("bad".to_string());
        assert!(format!("{}", err).contains("bad"));
    }
}
