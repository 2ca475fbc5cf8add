//! Reading move text.
//!
//! Accepts the engine's own rendering (`e2-e4`, `e4xd5`, `O-O`, `O-O-O`,
//! `a7-a8Q`, with an optional trailing `+`) and the bare coordinate form
//! (`e2e4`, `a7a8q`). The text is parsed into a [`MoveRequest`], which is
//! then matched against the legal moves of a position.

use crate::movegen::CastleSide;
use chess_core::{Move, PieceKind, Square};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("empty move text")]
    Empty,

    #[error("invalid move text: {0}")]
    InvalidFormat(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),
}

/// A move as written, before it is matched against a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    Castle(CastleSide),
    Coordinates {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

impl MoveRequest {
    /// Returns true if `m` is the move this request describes.
    ///
    /// A coordinate request without a promotion piece never matches a
    /// promoting move.
    pub fn matches(&self, m: &Move) -> bool {
        match *self {
            MoveRequest::Castle(side) => m.flag() == side.flag(),
            MoveRequest::Coordinates {
                from,
                to,
                promotion,
            } => m.from() == from && m.to() == to && m.promotion() == promotion,
        }
    }
}

/// Parses move text into a request.
pub fn parse_move_text(text: &str) -> Result<MoveRequest, NotationError> {
    let body = text.trim().trim_end_matches(['+', '#']);
    if body.is_empty() {
        return Err(NotationError::Empty);
    }

    match body.to_ascii_uppercase().replace('0', "O").as_str() {
        "O-O" => return Ok(MoveRequest::Castle(CastleSide::Kingside)),
        "O-O-O" => return Ok(MoveRequest::Castle(CastleSide::Queenside)),
        _ => {}
    }

    let invalid = || NotationError::InvalidFormat(text.to_string());

    let from = body
        .get(0..2)
        .and_then(Square::from_algebraic)
        .ok_or_else(invalid)?;
    let mut rest = &body[2..];
    if let Some(stripped) = rest.strip_prefix(['-', 'x']) {
        rest = stripped;
    }
    let to = rest
        .get(0..2)
        .and_then(Square::from_algebraic)
        .ok_or_else(invalid)?;
    rest = &rest[2..];
    if let Some(stripped) = rest.strip_prefix('=') {
        rest = stripped;
    }

    let mut chars = rest.chars();
    let promotion = match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(c), None) => match PieceKind::from_letter(c.to_ascii_uppercase()) {
            Some(kind) if kind.is_promotion_target() => Some(kind),
            _ => return Err(NotationError::InvalidPromotion(c)),
        },
        _ => return Err(invalid()),
    };

    Ok(MoveRequest::Coordinates {
        from,
        to,
        promotion,
    })
}
