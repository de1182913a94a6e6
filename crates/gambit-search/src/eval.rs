//! Static material evaluation.

use gambit_rules::{mated_score, Color, PieceKind, RulesEngine, Score};

/// Scores a position from White's perspective.
///
/// A checkmated side dominates everything else: if the position is
/// checkmate the corresponding sentinel is returned and material is not
/// counted. Otherwise the score is White's material minus Black's, in pawn
/// units. Stalemate and other draws get no special treatment and score as
/// plain material.
pub fn evaluate<R: RulesEngine>(rules: &R, position: &R::Position) -> Score {
    if rules.is_checkmate(position) {
        return mated_score(rules.side_to_move(position));
    }

    let mut score: Score = 0;
    for kind in PieceKind::ALL {
        let value = kind.material_value();
        score += value * rules.piece_count(position, kind, Color::White) as Score;
        score -= value * rules.piece_count(position, kind, Color::Black) as Score;
    }
    score
}
