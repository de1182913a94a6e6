//! Opening book lookup for the gambit move selector.
//!
//! A book maps positions (keyed by FEN) to weighted candidate moves and
//! answers with a weighted-random pick. The [`OpeningBook`] trait keeps the
//! storage format opaque to the rest of the system; [`JsonBook`] is the
//! bundled JSON-backed implementation. Binary book formats can plug in
//! behind the same trait.

mod store;

use rand::RngCore;
use thiserror::Error;

pub use store::{BookMove, JsonBook};

/// Errors that can occur when querying an opening book.
#[derive(Debug, Error)]
pub enum BookError {
    /// The position has no entry in this book.
    #[error("position not found in book")]
    NotFound,

    /// Failed to read the book from disk.
    #[error("failed to read opening book: {0}")]
    Io(#[from] std::io::Error),

    /// The book contents could not be parsed.
    #[error("failed to parse opening book: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of pre-built opening moves, keyed by FEN.
pub trait OpeningBook {
    /// Identifier used in diagnostics, typically the source path.
    fn name(&self) -> &str;

    /// Picks a weighted-random candidate move for the position.
    ///
    /// Returns the move in UCI notation; the caller is expected to validate
    /// it against the rules engine before playing it.
    fn pick_move(&self, fen: &str, rng: &mut dyn RngCore) -> Result<String, BookError>;
}
