//! Move entry errors.

use thiserror::Error;

/// Errors produced when parsing and validating a move string against a
/// position.
///
/// The two variants are deliberately distinct so that callers can tell a
/// typo from a move that parses but is not playable; both leave the
/// position untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The string is not valid move notation.
    #[error("invalid move format: {0:?}")]
    InvalidFormat(String),

    /// The move is well-formed but not legal in the current position.
    #[error("illegal move: {0}")]
    Illegal(String),
}
