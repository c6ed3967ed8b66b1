//! Score constants and display helpers
//!
//! Heuristic scores stay strictly inside `±(MATE - MATE_BUFFER)`, so a mate
//! score always compares beyond any positional score.

/// Evaluation weights and score bands
pub struct Score;

impl Score {
    // Terminal band
    /// Won position; mates found deeper in the tree score `MATE - ply`
    pub const MATE: i32 = 1_000_000;
    /// Width of the band reserved for ply-adjusted mate scores
    pub const MATE_BUFFER: i32 = 1_000;
    /// Largest magnitude a heuristic score may take
    pub const MAX_HEURISTIC: i32 = Self::MATE - Self::MATE_BUFFER - 1;

    // Per-tower terms
    /// Per row already travelled toward the goal
    pub const PROGRESS: i32 = 10;
    /// Goal lies straight ahead or on an exact diagonal
    pub const ALIGNMENT: i32 = 15;
    /// Goal needs more sideways than forward travel
    pub const UNREACHABLE: i32 = 20;
    /// Tower sits on the goal row in the wrong column and can never arrive
    pub const BLOCKED: i32 = 60;
    /// Per available destination
    pub const MOBILITY: i32 = 1;

    // Forced tower of the side to move
    /// Mobility at or above which the forced tower is not penalised
    pub const LOW_MOBILITY_MOVES: i32 = 4;
    /// Per missing destination below `LOW_MOBILITY_MOVES`
    pub const FORCED_LOW_MOBILITY: i32 = 8;
    /// Forced tower has no move and must pass
    pub const FORCED_STUCK: i32 = 60;

    /// Scale used to squash positional scores into `[-1, 1]`
    pub const DISPLAY_SCALE: f32 = 500.0;
    /// Centipawn-like divisor for textual scores
    pub const DISPLAY_UNIT: f32 = 100.0;
}

/// Score of a decided game `ply` plies from the search root.
#[inline]
#[must_use]
pub fn mate_score(win: bool, ply: i32) -> i32 {
    if win {
        Score::MATE - ply
    } else {
        -(Score::MATE - ply)
    }
}

#[inline]
#[must_use]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > Score::MATE - Score::MATE_BUFFER
}

/// Keep a heuristic value out of the mate band.
#[inline]
#[must_use]
pub fn clamp_non_mate_score(score: i32) -> i32 {
    score.clamp(-Score::MAX_HEURISTIC, Score::MAX_HEURISTIC)
}

/// Map a score into `[-1, 1]` for advantage bars. Mates saturate.
#[must_use]
pub fn normalize(score: i32) -> f32 {
    if is_mate_score(score) {
        return if score > 0 { 1.0 } else { -1.0 };
    }
    (score as f32 / Score::DISPLAY_SCALE).tanh()
}

/// Plies from the search root to the deciding move of a mate score.
#[must_use]
pub fn plies_to_mate(score: i32) -> i32 {
    (Score::MATE - score.abs()).max(0)
}

/// Human-readable score: `#3` / `-#3` for mates, `+1.25` otherwise.
///
/// The mate count is in moves of the winning side, so a tower that reaches
/// its goal with the next move reads `#1`.
#[must_use]
pub fn format_score(score: i32) -> String {
    if is_mate_score(score) {
        let sign = if score < 0 { "-" } else { "" };
        let moves = (plies_to_mate(score) + 1) / 2;
        return format!("{sign}#{moves}");
    }
    format!("{:+.2}", score as f32 / Score::DISPLAY_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_scores_order_by_ply() {
        assert!(mate_score(true, 2) > mate_score(true, 6));
        assert!(mate_score(false, 2) < mate_score(false, 6));
        assert!(is_mate_score(mate_score(true, 100)));
        assert!(is_mate_score(mate_score(false, 100)));
        assert!(!is_mate_score(Score::MAX_HEURISTIC));
        assert!(!is_mate_score(-Score::MAX_HEURISTIC));
    }

    #[test]
    fn test_clamp_keeps_out_of_mate_band() {
        assert_eq!(clamp_non_mate_score(5_000_000), Score::MAX_HEURISTIC);
        assert_eq!(clamp_non_mate_score(-5_000_000), -Score::MAX_HEURISTIC);
        assert_eq!(clamp_non_mate_score(123), 123);
        assert!(!is_mate_score(clamp_non_mate_score(i32::MAX - 1)));
    }

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(0), 0.0);
        assert_eq!(normalize(mate_score(true, 3)), 1.0);
        assert_eq!(normalize(mate_score(false, 3)), -1.0);
        let n = normalize(250);
        assert!(n > 0.0 && n < 1.0);
        assert!((normalize(-250) + n).abs() < 1e-6);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "+0.00");
        assert_eq!(format_score(125), "+1.25");
        assert_eq!(format_score(-50), "-0.50");
        assert_eq!(format_score(mate_score(true, 1)), "#1");
        assert_eq!(format_score(mate_score(true, 3)), "#2");
        assert_eq!(format_score(mate_score(false, 2)), "-#1");
        assert_eq!(format_score(mate_score(false, 4)), "-#2");
        assert_eq!(plies_to_mate(mate_score(false, 4)), 4);
    }
}
