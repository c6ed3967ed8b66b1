//! Heuristic evaluation of Kamisado positions
//!
//! Each side is scored tower by tower on:
//! - Rows already travelled toward the goal
//! - Whether the goal column is still geometrically reachable
//! - Mobility
//! - How constrained the forced tower is when that side must move

use crate::board::{Color, Coord, Player};
use crate::rules::tower_mobility;
use crate::state::GameState;

use super::score::{clamp_non_mate_score, Score};

/// Evaluate the position from the perspective of the given player.
///
/// Returns a score where:
/// - Positive values indicate advantage for `perspective`
/// - `Score::MATE` / `-Score::MATE` for a decided game
///
/// Non-terminal scores are symmetric, `evaluate(s, White) == -evaluate(s, Black)`,
/// and never enter the mate band.
///
/// # Arguments
/// * `state` - The position to score
/// * `perspective` - The player the score is relative to
#[must_use]
pub fn evaluate(state: &GameState, perspective: Player) -> i32 {
    let status = state.terminal_status();
    if status.terminal {
        debug_assert!(status.winner.is_some(), "terminal position without a winner");
        return if status.winner == Some(perspective) {
            Score::MATE
        } else {
            -Score::MATE
        };
    }

    let my = score_side(state, perspective);
    let opp = score_side(state, perspective.opponent());
    clamp_non_mate_score(my - opp)
}

/// Positional score of one side, ignoring the opponent.
#[must_use]
pub fn score_side(state: &GameState, player: Player) -> i32 {
    let board = state.board();
    let goals = state.goals();

    let mut score = 0;
    for color in Color::ALL {
        let pos = board.tower_pos(player, color);
        debug_assert!(board.in_bounds(pos), "tower not placed");
        score += tower_placement(pos, goals.goal(player, color));
        score += Score::MOBILITY * tower_mobility(board, player, color) as i32;
    }

    if state.side_to_move() == player {
        if let Some(forced) = state.forced_color() {
            score -= forced_penalty(tower_mobility(board, player, forced) as i32);
        }
    }

    score
}

/// Progress and goal geometry for a single tower.
#[inline]
fn tower_placement(pos: Coord, goal: Coord) -> i32 {
    let row_dist = (i32::from(goal.row) - i32::from(pos.row)).abs();
    let col_dist = (i32::from(goal.col) - i32::from(pos.col)).abs();
    let advance = (crate::board::BOARD_SIZE as i32 - 1) - row_dist;

    let mut score = advance * Score::PROGRESS;
    if col_dist == 0 || col_dist == row_dist {
        score += Score::ALIGNMENT;
    }
    if row_dist < col_dist {
        score -= if row_dist == 0 {
            Score::BLOCKED
        } else {
            Score::UNREACHABLE
        };
    }
    score
}

#[inline]
fn forced_penalty(mobility: i32) -> i32 {
    if mobility == 0 {
        Score::FORCED_STUCK
    } else {
        (Score::LOW_MOBILITY_MOVES - mobility.min(Score::LOW_MOBILITY_MOVES))
            * Score::FORCED_LOW_MOBILITY
    }
}
