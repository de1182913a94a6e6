//! Position scores and mate sentinels.

use crate::Color;

/// A position score in material units, from White's perspective.
///
/// Ordinary values are signed material balances. The two sentinels
/// [`SCORE_MAX`] and [`SCORE_MIN`] stand for "Black is checkmated" and
/// "White is checkmated" respectively and take precedence over material.
pub type Score = i32;

/// Sentinel for a position where Black is checkmated.
pub const SCORE_MAX: Score = i32::MAX;

/// Sentinel for a position where White is checkmated.
///
/// Symmetric with [`SCORE_MAX`] so that negating either sentinel yields the
/// other without overflow (`-i32::MIN` does not fit in an `i32`).
pub const SCORE_MIN: Score = -i32::MAX;

/// Returns the score of a checkmate position given the side that is to move
/// (and therefore mated).
#[inline]
pub const fn mated_score(side_to_move: Color) -> Score {
    match side_to_move {
        Color::White => SCORE_MIN,
        Color::Black => SCORE_MAX,
    }
}
