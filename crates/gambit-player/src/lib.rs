//! The gambit automated chess player.
//!
//! Ties the move-selection pieces together:
//! - [`MoveSourceChain`] - per-turn move decision: remote tablebase, then
//!   opening books in configured order, then alpha-beta search; every
//!   source failure falls through softly and search always answers
//! - [`GameSession`] - explicit game context (rules engine, position,
//!   engine color, chain) with human-move entry and engine turn dispatch
//! - [`PlayerConfig`] - TOML configuration for depth, tablebase endpoint,
//!   and book paths
//!
//! The chain only decides; committing a move to the game state is the
//! session's job.

mod chain;
mod config;
mod session;

pub use chain::{ChainBuildError, MoveSourceChain, Provenance, SelectedMove};
pub use config::{ConfigError, PlayerConfig, TablebaseConfig};
pub use session::{GameSession, TurnError};
