//! The rules engine contract.

use crate::{Color, MoveError, PieceKind};

/// Contract between the move-selection core and an external chess rules
/// implementation.
///
/// The core treats `Position` and `Move` as opaque values: positions are
/// queried through the methods here and transformed only by [`apply`],
/// which returns a fresh position and never mutates its input. Because
/// positions are immutable values, a search frame that derives a child
/// position simply drops it when done; there is no undo protocol.
///
/// Determinism of search results across runs depends on
/// [`legal_moves`](RulesEngine::legal_moves) producing a stable enumeration
/// order for a given position.
///
/// [`apply`]: RulesEngine::apply
pub trait RulesEngine {
    /// An opaque board state.
    type Position: Clone;

    /// An opaque legal transition between two positions.
    type Move: Clone + PartialEq;

    /// Returns the side to move in the given position.
    fn side_to_move(&self, position: &Self::Position) -> Color;

    /// Returns true if the game is over in the given position
    /// (checkmate, stalemate, or any other terminal condition).
    fn is_game_over(&self, position: &Self::Position) -> bool;

    /// Returns true if the side to move is checkmated.
    fn is_checkmate(&self, position: &Self::Position) -> bool;

    /// Enumerates the legal moves in the given position.
    fn legal_moves(&self, position: &Self::Position) -> Vec<Self::Move>;

    /// Applies a legal move, returning the resulting position.
    ///
    /// The input position is not modified.
    fn apply(&self, position: &Self::Position, mv: &Self::Move) -> Self::Position;

    /// Returns the number of pieces of the given kind and color on the board.
    fn piece_count(&self, position: &Self::Position, kind: PieceKind, color: Color) -> u32;

    /// Serializes the position to a FEN string for external lookups.
    fn to_fen(&self, position: &Self::Position) -> String;

    /// Parses a UCI move string and validates it against the position.
    ///
    /// Fails with [`MoveError::InvalidFormat`] when the string is not move
    /// notation at all, and with [`MoveError::Illegal`] when it parses but
    /// is not in the legal-move set.
    fn parse_move(&self, position: &Self::Position, uci: &str) -> Result<Self::Move, MoveError>;

    /// Returns the UCI notation for a move.
    fn move_to_uci(&self, mv: &Self::Move) -> String;
}
