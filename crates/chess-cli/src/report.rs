//! JSON report of a position and its legal moves.

use chess_core::{Color, Square};
use chess_engine::GameState;
use serde::Serialize;

/// One legal move.
#[derive(Debug, Serialize)]
pub struct MoveEntry {
    /// Engine notation, e.g. `e4xd5+`.
    pub notation: String,
    /// Coordinate form, e.g. `e4d5`.
    pub coordinate: String,
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub check: bool,
}

/// The side to move, its status and its legal moves.
#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub fen: String,
    pub side_to_move: Color,
    pub in_check: bool,
    pub game_over: bool,
    pub moves: Vec<MoveEntry>,
}

impl PositionReport {
    pub fn new(game: &mut GameState) -> Self {
        let moves = game
            .legal_moves()
            .iter()
            .map(|m| MoveEntry {
                notation: m.to_string(),
                coordinate: m.to_coordinate(),
                from: m.from(),
                to: m.to(),
                capture: m.is_capture(),
                check: m.is_check(),
            })
            .collect();
        PositionReport {
            fen: game.to_fen().to_string(),
            side_to_move: game.side_to_move(),
            in_check: game.is_check(),
            game_over: game.is_game_over(),
            moves,
        }
    }
}
