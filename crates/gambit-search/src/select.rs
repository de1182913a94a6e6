//! Root move selection.

use gambit_rules::{Color, RulesEngine, Score, SCORE_MAX, SCORE_MIN};
use thiserror::Error;

use crate::search::search;

/// Errors from root move selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The rules engine enumerated no legal moves for a position it did not
    /// report as game over. The caller only invokes selection on live
    /// positions, so this indicates a broken rules engine.
    #[error("rules engine enumerated no legal moves for a live position")]
    NoLegalMoves,
}

/// Picks a move for the engine by scoring every legal root move.
///
/// Each candidate is applied and scored with
/// `search(child, depth - 1, -inf, +inf, maximizing = false, engine_color)`.
/// The aggregation direction follows the side to move at the root, not the
/// engine color: with White to move the candidate with the strictly
/// greatest score wins, with Black to move the strictly least score wins.
/// The tie-break is asymmetric on purpose: White's running best starts at
/// the `-inf` sentinel and only a strictly greater score replaces it, while
/// Black's first candidate always seeds the running best. In both
/// directions the first of equally scored moves is kept.
pub fn select_by_search<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    depth: u8,
    engine_color: Color,
) -> Result<R::Move, SelectError> {
    let moves = rules.legal_moves(position);
    if moves.is_empty() {
        return Err(SelectError::NoLegalMoves);
    }

    let white_to_move = rules.side_to_move(position) == Color::White;
    let mut best_move: Option<&R::Move> = None;
    let mut best_score: Score = if white_to_move { SCORE_MIN } else { SCORE_MAX };

    for mv in &moves {
        let child = rules.apply(position, mv);
        let score = search(
            rules,
            &child,
            depth.saturating_sub(1),
            SCORE_MIN,
            SCORE_MAX,
            false,
            engine_color,
        );

        let improves = if white_to_move {
            score > best_score
        } else {
            best_move.is_none() || score < best_score
        };
        if improves {
            best_score = score;
            best_move = Some(mv);
        }
    }

    // White's strict bound never clears when every line scores the -inf
    // sentinel; the first enumerated move stands in.
    Ok(best_move.unwrap_or(&moves[0]).clone())
}
