//! Depth-bounded minimax with alpha-beta pruning.

use gambit_rules::{Color, RulesEngine, Score, SCORE_MAX, SCORE_MIN};

use crate::eval::evaluate;

/// Scores a position by minimax search to the given depth.
///
/// The returned score is always expressed as goodness for the engine: for a
/// Black engine the evaluator's White-perspective score is negated at every
/// leaf, not just at the root. `alpha` and `beta` are the usual running
/// bounds; a node stops iterating its remaining children as soon as
/// `beta <= alpha`. Pruning changes how many nodes are visited, never the
/// returned score.
///
/// Children are visited in the order the rules engine enumerates them; no
/// reordering is applied.
pub fn search<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    engine_color: Color,
) -> Score {
    if depth == 0 || rules.is_game_over(position) {
        let raw = evaluate(rules, position);
        return match engine_color {
            Color::White => raw,
            Color::Black => -raw,
        };
    }

    if maximizing {
        let mut best = SCORE_MIN;
        for mv in rules.legal_moves(position) {
            let child = rules.apply(position, &mv);
            let score = search(rules, &child, depth - 1, alpha, beta, false, engine_color);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = SCORE_MAX;
        for mv in rules.legal_moves(position) {
            let child = rules.apply(position, &mv);
            let score = search(rules, &child, depth - 1, alpha, beta, true, engine_color);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
