//! Legal move generation under the forced-color rule
//!
//! Towers slide forward along three rays (straight ahead and the two forward
//! diagonals) until the board edge or the first occupied square. Nothing is
//! ever captured.

use crate::board::{Board, Color, Coord, Move, Player, BOARD_SIZE};
use crate::state::GameState;

/// Column deltas of the three forward rays
const RAY_COLS: [i32; 3] = [-1, 0, 1];

/// Walk every destination of the tower on `from`, calling `f` for each.
#[inline]
fn for_each_destination(board: &Board, player: Player, from: Coord, mut f: impl FnMut(Coord)) {
    debug_assert!(board.in_bounds(from), "tower not placed");
    debug_assert_eq!(board.tower_at(from).map(|t| t.owner), Some(player), "not own tower");

    let dr = player.forward();
    for dc in RAY_COLS {
        let mut r = i32::from(from.row) + dr;
        let mut c = i32::from(from.col) + dc;
        while Coord::is_valid(r, c) {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let to = Coord::new(r as u8, c as u8);
            if !board.is_empty(to) {
                break;
            }
            f(to);
            r += dr;
            c += dc;
        }
    }
}

/// Enumerate the legal moves of a position, in no particular order.
///
/// Returns nothing for a finished game. With a forced color, only that
/// tower moves, and a pass on its square is the sole move if it is blocked.
/// Before the first move every tower of the mover may move.
#[must_use]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    if state.terminal_status().terminal {
        return Vec::new();
    }

    let board = state.board();
    let player = state.side_to_move();
    let mut moves = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

    match state.forced_color() {
        Some(color) => {
            let from = board.tower_pos(player, color);
            for_each_destination(board, player, from, |to| moves.push(Move::new(from, to)));
            if moves.is_empty() {
                moves.push(Move::pass(from));
            }
        }
        None => {
            for color in Color::ALL {
                let from = board.tower_pos(player, color);
                for_each_destination(board, player, from, |to| moves.push(Move::new(from, to)));
            }
        }
    }

    moves
}

/// Count the destinations of one tower without building a move list.
#[inline]
#[must_use]
pub fn tower_mobility(board: &Board, player: Player, color: Color) -> u32 {
    let mut count = 0;
    for_each_destination(board, player, board.tower_pos(player, color), |_| count += 1);
    count
}
