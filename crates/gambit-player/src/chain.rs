//! The prioritized move source chain.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use gambit_book::{BookError, JsonBook, OpeningBook};
use gambit_rules::{Color, RulesEngine};
use gambit_search::{select_by_search, SelectError};
use gambit_tablebase::{TablebaseClient, TablebaseError};
use thiserror::Error;

use crate::PlayerConfig;

/// Which source produced a move. Diagnostics only; selection never looks
/// at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Remote tablebase lookup.
    Tablebase,
    /// Opening book at the given configured index.
    Book(usize),
    /// Alpha-beta search fallback.
    Search,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Tablebase => write!(f, "tablebase"),
            Provenance::Book(index) => write!(f, "book:{}", index),
            Provenance::Search => write!(f, "search"),
        }
    }
}

/// A chosen move tagged with its provenance.
#[derive(Debug, Clone)]
pub struct SelectedMove<M> {
    pub mv: M,
    pub provenance: Provenance,
}

/// Errors from assembling a chain out of configuration.
#[derive(Debug, Error)]
pub enum ChainBuildError {
    /// The tablebase HTTP client could not be constructed.
    #[error(transparent)]
    Tablebase(#[from] TablebaseError),

    /// An opening book file could not be loaded.
    #[error("failed to open opening book {}: {source}", .path.display())]
    Book {
        path: PathBuf,
        source: BookError,
    },
}

/// Ordered move sources for the engine's turn: tablebase, then books in
/// configured order, then search.
///
/// Each source fails softly: any tablebase or book error, and any returned
/// move the rules engine rejects, is logged and the next source is tried.
/// Search terminates the chain and always produces a move, so a source
/// failure is never surfaced to the caller.
pub struct MoveSourceChain {
    tablebase: Option<TablebaseClient>,
    books: Vec<Box<dyn OpeningBook>>,
    search_depth: u8,
}

impl std::fmt::Debug for MoveSourceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveSourceChain")
            .field("tablebase", &self.tablebase.is_some())
            .field("books", &self.books.iter().map(|b| b.name()).collect::<Vec<_>>())
            .field("search_depth", &self.search_depth)
            .finish()
    }
}

impl MoveSourceChain {
    /// Creates a chain with only the search fallback.
    #[must_use]
    pub fn new(search_depth: u8) -> Self {
        MoveSourceChain {
            tablebase: None,
            books: Vec::new(),
            search_depth,
        }
    }

    /// Adds a tablebase client as the highest-priority source.
    #[must_use]
    pub fn with_tablebase(mut self, client: TablebaseClient) -> Self {
        self.tablebase = Some(client);
        self
    }

    /// Appends an opening book after any already configured.
    #[must_use]
    pub fn with_book(mut self, book: Box<dyn OpeningBook>) -> Self {
        self.books.push(book);
        self
    }

    /// Assembles a chain from configuration, opening every book file.
    pub fn from_config(config: &PlayerConfig) -> Result<Self, ChainBuildError> {
        let mut chain = MoveSourceChain::new(config.search_depth);

        if let Some(tablebase) = &config.tablebase {
            let client = TablebaseClient::with_timeout(
                tablebase.endpoint.clone(),
                Duration::from_millis(tablebase.timeout_ms),
            )?;
            chain = chain.with_tablebase(client);
        }

        for path in &config.books {
            let book = JsonBook::open(path).map_err(|source| ChainBuildError::Book {
                path: path.clone(),
                source,
            })?;
            chain = chain.with_book(Box::new(book));
        }

        Ok(chain)
    }

    /// Returns the configured search depth in plies.
    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    /// Returns the number of configured opening books.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Decides the engine's move for the given position.
    ///
    /// Invoked once per engine turn. Only queries; the caller commits the
    /// returned move to the game state.
    pub fn next_move<R: RulesEngine>(
        &self,
        rules: &R,
        position: &R::Position,
        engine_color: Color,
    ) -> Result<SelectedMove<R::Move>, SelectError> {
        let fen = rules.to_fen(position);

        if let Some(client) = &self.tablebase {
            match client.best_move(&fen) {
                Ok(uci) => match rules.parse_move(position, &uci) {
                    Ok(mv) => {
                        tracing::info!(mv = %uci, "tablebase move");
                        return Ok(SelectedMove {
                            mv,
                            provenance: Provenance::Tablebase,
                        });
                    }
                    Err(error) => {
                        tracing::debug!(mv = %uci, %error, "tablebase move rejected");
                    }
                },
                Err(error) => {
                    tracing::debug!(%error, "tablebase lookup failed");
                }
            }
        }

        let mut rng = rand::thread_rng();
        for (index, book) in self.books.iter().enumerate() {
            match book.pick_move(&fen, &mut rng) {
                Ok(uci) => match rules.parse_move(position, &uci) {
                    Ok(mv) => {
                        tracing::info!(book = book.name(), mv = %uci, "book move");
                        return Ok(SelectedMove {
                            mv,
                            provenance: Provenance::Book(index),
                        });
                    }
                    Err(error) => {
                        tracing::debug!(book = book.name(), mv = %uci, %error, "book move rejected");
                    }
                },
                Err(error) => {
                    tracing::debug!(book = book.name(), %error, "book lookup failed");
                }
            }
        }

        let mv = select_by_search(rules, position, self.search_depth, engine_color)?;
        tracing::info!(mv = %rules.move_to_uci(&mv), "search move");
        Ok(SelectedMove {
            mv,
            provenance: Provenance::Search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn provenance_display() {
        assert_eq!(Provenance::Tablebase.to_string(), "tablebase");
        assert_eq!(Provenance::Book(0).to_string(), "book:0");
        assert_eq!(Provenance::Book(2).to_string(), "book:2");
        assert_eq!(Provenance::Search.to_string(), "search");
    }

    #[test]
    fn from_default_config_is_search_only() {
        let chain = MoveSourceChain::from_config(&PlayerConfig::default()).unwrap();
        assert_eq!(chain.search_depth(), 5);
        assert_eq!(chain.book_count(), 0);
        assert!(chain.tablebase.is_none());
    }

    #[test]
    fn from_config_opens_books_in_order() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        write!(first, "{{}}").unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        write!(second, "{{}}").unwrap();

        let config = PlayerConfig {
            books: vec![first.path().to_path_buf(), second.path().to_path_buf()],
            ..PlayerConfig::default()
        };

        let chain = MoveSourceChain::from_config(&config).unwrap();
        assert_eq!(chain.book_count(), 2);
        assert_eq!(
            chain.books[0].name(),
            first.path().display().to_string()
        );
    }

    #[test]
    fn from_config_fails_on_missing_book() {
        let config = PlayerConfig {
            books: vec![PathBuf::from("/nonexistent/book.json")],
            ..PlayerConfig::default()
        };

        let err = MoveSourceChain::from_config(&config).unwrap_err();
        assert!(matches!(err, ChainBuildError::Book { .. }));
    }
}
