//! Game session context.

use gambit_rules::{Color, MoveError, RulesEngine, Score};
use gambit_search::{evaluate, SelectError};
use thiserror::Error;

use crate::chain::{MoveSourceChain, SelectedMove};

/// Errors from dispatching an engine turn.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The game is already over; there is no move to make.
    #[error("game is already over")]
    GameOver,

    /// The rules engine violated its contract during selection.
    #[error(transparent)]
    Select(#[from] SelectError),
}

/// Everything one game needs: the rules engine, the current position, the
/// engine's assigned color, and the move source chain.
///
/// Human moves enter through [`play_human_move`]; the engine's turns run
/// through [`play_engine_turn`], which queries the chain once and commits
/// the returned move.
///
/// [`play_human_move`]: GameSession::play_human_move
/// [`play_engine_turn`]: GameSession::play_engine_turn
pub struct GameSession<R: RulesEngine> {
    rules: R,
    position: R::Position,
    engine_color: Color,
    chain: MoveSourceChain,
}

impl<R: RulesEngine> GameSession<R> {
    /// Creates a session starting from the given position.
    pub fn new(rules: R, position: R::Position, engine_color: Color, chain: MoveSourceChain) -> Self {
        GameSession {
            rules,
            position,
            engine_color,
            chain,
        }
    }

    /// Returns the current position.
    pub fn position(&self) -> &R::Position {
        &self.position
    }

    /// Returns the engine's assigned color.
    pub fn engine_color(&self) -> Color {
        self.engine_color
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.rules.side_to_move(&self.position)
    }

    /// Returns true when it is the engine's turn.
    pub fn engine_to_move(&self) -> bool {
        self.side_to_move() == self.engine_color
    }

    /// Returns true if the game is over.
    pub fn is_game_over(&self) -> bool {
        self.rules.is_game_over(&self.position)
    }

    /// Current material score from White's perspective.
    pub fn material_score(&self) -> Score {
        evaluate(&self.rules, &self.position)
    }

    /// UCI strings of the current legal moves, in enumeration order.
    pub fn legal_moves(&self) -> Vec<String> {
        self.rules
            .legal_moves(&self.position)
            .iter()
            .map(|mv| self.rules.move_to_uci(mv))
            .collect()
    }

    /// Plays a move entered as a UCI string.
    ///
    /// On error nothing changes: the caller can report the problem and
    /// prompt again.
    pub fn play_human_move(&mut self, uci: &str) -> Result<(), MoveError> {
        let mv = self.rules.parse_move(&self.position, uci)?;
        self.position = self.rules.apply(&self.position, &mv);
        Ok(())
    }

    /// Runs the engine's turn: decides a move through the source chain and
    /// commits it.
    pub fn play_engine_turn(&mut self) -> Result<SelectedMove<R::Move>, TurnError> {
        if self.is_game_over() {
            return Err(TurnError::GameOver);
        }

        let selected = self
            .chain
            .next_move(&self.rules, &self.position, self.engine_color)?;
        self.position = self.rules.apply(&self.position, &selected.mv);

        tracing::info!(
            provenance = %selected.provenance,
            mv = %self.rules.move_to_uci(&selected.mv),
            "engine move"
        );
        Ok(selected)
    }
}
