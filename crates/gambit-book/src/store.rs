//! JSON-backed book storage and weighted selection.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{BookError, OpeningBook};

/// A single candidate move with its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMove {
    /// The move in UCI notation (e.g. "e2e4").
    pub uci: String,
    /// Relative frequency of this move; higher is more common.
    pub weight: u32,
}

impl BookMove {
    /// Creates a new candidate move.
    #[must_use]
    pub fn new(uci: impl Into<String>, weight: u32) -> Self {
        BookMove {
            uci: uci.into(),
            weight,
        }
    }
}

/// An opening book stored as a JSON map from FEN to candidate moves.
///
/// The file format is the map itself:
///
/// ```json
/// {
///   "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1": [
///     { "uci": "e2e4", "weight": 120 },
///     { "uci": "d2d4", "weight": 90 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonBook {
    name: String,
    positions: HashMap<String, Vec<BookMove>>,
}

impl JsonBook {
    /// Creates an empty in-memory book with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        JsonBook {
            name: name.into(),
            positions: HashMap::new(),
        }
    }

    /// Loads a book from a JSON file; the path becomes the book's name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let positions: HashMap<String, Vec<BookMove>> = serde_json::from_str(&contents)?;
        Ok(JsonBook {
            name: path.display().to_string(),
            positions,
        })
    }

    /// Returns true if the book has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the number of positions in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Adds a position with its candidate moves.
    pub fn add_position(&mut self, fen: impl Into<String>, moves: Vec<BookMove>) {
        self.positions.insert(fen.into(), moves);
    }

    /// Looks up the candidate moves for a position.
    #[must_use]
    pub fn lookup(&self, fen: &str) -> Option<&[BookMove]> {
        self.positions.get(fen).map(|moves| moves.as_slice())
    }

    /// Selects a candidate at random, weighted by move weights.
    fn weighted_pick<'a>(moves: &'a [BookMove], rng: &mut dyn RngCore) -> Option<&'a BookMove> {
        if moves.is_empty() {
            return None;
        }

        let total_weight: u32 = moves.iter().map(|m| m.weight).sum();
        if total_weight == 0 {
            // All weights zero: select uniformly.
            return moves.choose(rng);
        }

        let mut choice = rng.gen_range(0..total_weight);
        for mv in moves {
            if choice < mv.weight {
                return Some(mv);
            }
            choice -= mv.weight;
        }

        // Unreachable: choice < total_weight always lands in a bucket.
        moves.last()
    }
}

impl OpeningBook for JsonBook {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick_move(&self, fen: &str, rng: &mut dyn RngCore) -> Result<String, BookError> {
        let moves = self.lookup(fen).ok_or(BookError::NotFound)?;
        let pick = Self::weighted_pick(moves, rng).ok_or(BookError::NotFound)?;
        Ok(pick.uci.clone())
    }
}
