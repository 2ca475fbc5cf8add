//! Game state: a board, the moves played on it, and who started.
//!
//! Nothing beyond the board and the history is stored. The side to move,
//! castling rights and the en passant file are all recomputed from the
//! history, so undoing a move restores them for free.

use crate::legal::filter_legal;
use crate::make::{apply, revert};
use crate::movegen::{castling_rights, generate_pseudo_legal, CastlingRights, MoveList};
use crate::notation::{parse_move_text, NotationError};
use crate::setup::{Setup, SetupError};
use crate::Board;
use chess_core::{Color, Fen, File, Move, PlacedPiece, Rank, Square};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned when a move request cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Errors returned when the last move cannot be taken back.
///
/// Apart from [`UndoError::NothingToUndo`], these mean the board no longer
/// matches the history; the board is left untouched when they are raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("no move to undo")]
    NothingToUndo,

    #[error("cannot undo {notation}: the moving piece is not on {square}")]
    MoverMissing { square: Square, notation: String },

    #[error("cannot undo: {square} is occupied")]
    OriginOccupied { square: Square },

    #[error("cannot undo castling: no rook on {square}")]
    RookMissing { square: Square },

    #[error("cannot undo: the piece captured on {square} is still on the board")]
    CapturedOnBoard { square: Square },
}

/// A game in progress.
///
/// [`GameState::legal_moves`] takes `&mut self` because legality is decided
/// by playing each candidate on the board and taking it back. Clone the
/// state to examine positions from several threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    history: Vec<Move>,
    starting_side: Color,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        GameState {
            board: Board::standard(),
            history: Vec::new(),
            starting_side: Color::White,
        }
    }

    /// Creates a game from a setup, rejecting invalid positions.
    pub fn from_setup(setup: Setup) -> Result<Self, SetupError> {
        let starting_side = setup.side_to_move;
        let board = setup.into_board().inspect_err(|err| {
            warn!(error = %err, "rejected setup");
        })?;
        Ok(GameState {
            board,
            history: Vec::new(),
            starting_side,
        })
    }

    /// Creates a game from the placement and active-color fields of a FEN
    /// string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        Self::from_setup(Setup::from_fen(fen)?)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves played so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// The side that moved first.
    #[inline]
    pub fn starting_side(&self) -> Color {
        self.starting_side
    }

    pub fn side_to_move(&self) -> Color {
        if self.history.len() % 2 == 0 {
            self.starting_side
        } else {
            self.starting_side.opposite()
        }
    }

    /// Castling rights of `color`, derived from the history.
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        castling_rights(&self.board, &self.history, color)
    }

    /// File of the pawn that just made a double step, if the last move was
    /// one.
    pub fn en_passant_file(&self) -> Option<File> {
        self.history
            .last()
            .filter(|m| m.is_double_push())
            .map(|m| m.to().file())
    }

    /// All legal moves of the side to move, check flags set.
    pub fn legal_moves(&mut self) -> MoveList {
        let pseudo = generate_pseudo_legal(&self.board, &self.history, self.side_to_move());
        filter_legal(&mut self.board, pseudo)
    }

    /// Legal moves of the piece on `square`. Empty when the square is empty
    /// or holds a piece of the side not to move.
    pub fn legal_moves_from(&mut self, square: Square) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|m| m.from() == square);
        moves
    }

    /// Plays the legal move that matches `m` by origin, destination and
    /// promotion, returning the move as played.
    pub fn apply_move(&mut self, m: Move) -> Result<Move, GameError> {
        let played = self
            .legal_moves()
            .into_iter()
            .find(|legal| legal.same_action(m))
            .ok_or_else(|| GameError::IllegalMove(m.to_string()))?;
        self.push_move(played);
        Ok(played)
    }

    /// Parses `text` and plays the matching legal move.
    pub fn apply_notation(&mut self, text: &str) -> Result<Move, GameError> {
        let request = parse_move_text(text)?;
        let played = self
            .legal_moves()
            .into_iter()
            .find(|m| request.matches(m))
            .ok_or_else(|| GameError::IllegalMove(text.to_string()))?;
        self.push_move(played);
        Ok(played)
    }

    /// Plays a move known to be legal.
    pub(crate) fn push_move(&mut self, m: Move) {
        apply(&mut self.board, m);
        self.history.push(m);
        debug!(ply = self.history.len(), mv = %m, "applied move");
    }

    /// Takes back the last move.
    pub fn undo_last_move(&mut self) -> Result<Move, UndoError> {
        let m = self.history.pop().ok_or(UndoError::NothingToUndo)?;
        if let Err(err) = revert(&mut self.board, m) {
            self.history.push(m);
            return Err(err);
        }
        debug!(ply = self.history.len(), mv = %m, "undid move");
        Ok(m)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        let king = self.board.find_king(self.side_to_move());
        self.board.is_attacked(king)
    }

    /// Returns true if the last move gave check and left no legal reply.
    ///
    /// Stalemate and the draw rules are not detected.
    pub fn is_game_over(&mut self) -> bool {
        self.history.last().is_some_and(|m| m.is_check()) && self.legal_moves().is_empty()
    }

    /// The side that delivered mate, once the game is over.
    pub fn winner(&mut self) -> Option<Color> {
        self.is_game_over()
            .then(|| self.side_to_move().opposite())
    }

    pub fn position_hash(&self) -> u64 {
        self.board.position_hash()
    }

    /// Placement and side to move in FEN form.
    pub fn to_fen(&self) -> Fen {
        let pieces = Rank::ALL
            .into_iter()
            .rev()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Square::new(file, rank)))
            .filter_map(|square| {
                self.board.piece_at(square).map(|p| PlacedPiece {
                    square,
                    kind: p.kind,
                    color: p.color,
                })
            })
            .collect();
        Fen {
            pieces,
            side_to_move: self.side_to_move(),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", self.side_to_move())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{MoveFlag, PieceKind};

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn play(game: &mut GameState, moves: &[&str]) {
        for text in moves {
            game.apply_notation(text).unwrap();
        }
    }

    #[test]
    fn new_game() {
        let mut game = GameState::new();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.legal_moves().len(), 20);
        assert!(!game.is_check());
        assert!(!game.is_game_over());
        assert_eq!(game.to_fen().to_string(), Fen::STARTPOS);
    }

    #[test]
    fn side_to_move_follows_history() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        play(&mut game, &["e8-d8"]);
        assert_eq!(game.side_to_move(), Color::White);
        game.undo_last_move().unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn apply_move_matches_by_action() {
        let mut game = GameState::new();
        let pawn = game.board().piece_id_at(sq("e2")).unwrap();
        // Wrong flag: the played move is the generator's version.
        let request = Move::new(
            pawn,
            PieceKind::Pawn,
            Color::White,
            sq("e2"),
            sq("e4"),
            MoveFlag::Normal,
        );
        let played = game.apply_move(request).unwrap();
        assert!(played.is_double_push());
        assert_eq!(game.en_passant_file(), Some(File::E));
        assert_eq!(game.history(), &[played]);
    }

    #[test]
    fn illegal_requests_are_rejected() {
        let mut game = GameState::new();
        assert_eq!(
            game.apply_notation("e2-e5"),
            Err(GameError::IllegalMove("e2-e5".to_string()))
        );
        assert!(matches!(
            game.apply_notation("Ke2"),
            Err(GameError::Notation(_))
        ));
        // Black cannot move first.
        assert!(game.apply_notation("e7-e5").is_err());
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn legal_moves_from_square() {
        let mut game = GameState::new();
        let mut knight = game.legal_moves_from(Square::G1).to_strings();
        knight.sort();
        assert_eq!(knight, vec!["g1-f3", "g1-h3"]);
        assert!(game.legal_moves_from(sq("e7")).is_empty());
        assert!(game.legal_moves_from(sq("e4")).is_empty());
    }

    #[test]
    fn undo_on_empty_history() {
        let mut game = GameState::new();
        assert_eq!(game.undo_last_move(), Err(UndoError::NothingToUndo));
    }

    #[test]
    fn undo_restores_everything() {
        let mut game = GameState::new();
        let start = game.clone();
        play(&mut game, &["e2-e4", "d7-d5", "e4xd5", "d8xd5"]);
        for _ in 0..4 {
            game.undo_last_move().unwrap();
        }
        assert_eq!(game, start);
    }

    #[test]
    fn fools_mate() {
        let mut game = GameState::new();
        play(&mut game, &["f2-f3", "e7-e5", "g2-g4"]);
        let mate = game.apply_notation("d8-h4").unwrap();
        assert_eq!(mate.to_string(), "d8-h4+");
        assert!(game.is_check());
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::Black));
    }

    #[test]
    fn check_is_not_mate() {
        let mut game = GameState::new();
        play(&mut game, &["e2-e4", "f7-f6", "d1-h5+"]);
        assert!(game.is_check());
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.legal_moves().to_strings(), vec!["g7-g6"]);
    }

    #[test]
    fn stalemate_is_not_game_over() {
        let mut game = GameState::from_fen("k7/8/1Q6/8/8/8/8/7K b").unwrap();
        assert!(game.legal_moves().is_empty());
        assert!(!game.is_check());
        assert!(!game.is_game_over());
    }

    #[test]
    fn castling_rights_are_derived() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
        assert_eq!(game.castling_rights(Color::White), CastlingRights::BOTH);
        play(&mut game, &["h1-h2", "a8-a7"]);
        let white = game.castling_rights(Color::White);
        assert!(!white.can_castle_kingside());
        assert!(white.can_castle_queenside());
        assert!(!game.castling_rights(Color::Black).can_castle_queenside());
        game.undo_last_move().unwrap();
        game.undo_last_move().unwrap();
        assert_eq!(game.castling_rights(Color::White), CastlingRights::BOTH);
    }

    #[test]
    fn rejected_setup() {
        let err = GameState::from_fen("4k3/8/8/8/8/8/8/8 w").unwrap_err();
        assert!(matches!(
            err,
            SetupError::InvalidPosition {
                white_kings: 0,
                black_kings: 1
            }
        ));
    }

    #[test]
    fn fen_and_display() {
        let mut game = GameState::new();
        play(&mut game, &["e2-e4"]);
        assert_eq!(
            game.to_fen().to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"
        );
        let text = game.to_string();
        assert!(text.contains(" 4 -- -- -- -- >P -- -- -- "));
        assert!(text.ends_with("Black to move\n"));
    }

    #[test]
    fn position_hash_tracks_placement() {
        let mut game = GameState::new();
        let start = game.position_hash();
        play(&mut game, &["g1-f3", "g8-f6", "f3-g1", "f6-g8"]);
        assert_eq!(game.position_hash(), start);
        play(&mut game, &["e2-e4"]);
        assert_ne!(game.position_hash(), start);
    }
}
