//! Rules Integration Tests
//!
//! Properties checked over many played-out games:
//! - Board reverse index stays a bijection
//! - `apply` never mutates its receiver
//! - Non-terminal positions always have a legal move
//! - Goal arrival and repetition end the game

use std::collections::HashMap;

use kamisado::board::{Board, Color, Coloring, Coord, Move, Player, Tower};
use kamisado::rules::{legal_moves, OFFICIAL_GOALS};
use kamisado::search::ZOBRIST;
use kamisado::state::GameState;

/// Deterministic move picker so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 33) as usize) % bound
    }
}

/// Play random legal moves until the game ends, calling `check` on every
/// position along the way.
fn playout(seed: u64, mut check: impl FnMut(&GameState)) -> GameState {
    let mut rng = Lcg(seed);
    let mut state = GameState::initial();
    check(&state);
    loop {
        let moves = legal_moves(&state);
        if moves.is_empty() {
            return state;
        }
        let mv = moves[rng.next(moves.len())];
        state = state.apply(mv);
        check(&state);
    }
}

fn forward_ray_clear(board: &Board, player: Player, mv: Move) -> bool {
    let dr = i32::from(mv.to.row) - i32::from(mv.from.row);
    let dc = i32::from(mv.to.col) - i32::from(mv.from.col);
    if dr.signum() != player.forward() || !(dc == 0 || dc.abs() == dr.abs()) {
        return false;
    }
    (1..=dr.abs()).all(|k| {
        let r = i32::from(mv.from.row) + dr.signum() * k;
        let c = i32::from(mv.from.col) + dc.signum() * k;
        board.is_empty(Coord::new(r as u8, c as u8))
    })
}

// ============================================================================
// State Invariants
// ============================================================================

#[test]
fn test_reverse_index_bijection_over_playouts() {
    for seed in 0..20 {
        playout(seed, |state| {
            let board = state.board();
            for player in Player::ALL {
                for color in Color::ALL {
                    let pos = board.tower_pos(player, color);
                    assert_eq!(board.tower_at(pos), Some(Tower::new(player, color)));
                }
            }
            assert_eq!(board.towers().count(), 16);
        });
    }
}

#[test]
fn test_apply_is_pure_over_playouts() {
    for seed in 100..110 {
        playout(seed, |state| {
            let snapshot = state.clone();
            for mv in legal_moves(state) {
                let a = state.apply(mv);
                let b = state.apply(mv);
                assert_eq!(a.board(), b.board());
                assert_eq!(a.hash(), b.hash());
                assert_eq!(a.forced_color(), b.forced_color());
            }
            assert_eq!(state, &snapshot);
        });
    }
}

#[test]
fn test_legal_moves_total_and_reachable() {
    for seed in 200..220 {
        playout(seed, |state| {
            let moves = legal_moves(state);
            let status = state.terminal_status();
            assert_eq!(moves.is_empty(), status.terminal);

            let player = state.side_to_move();
            for mv in moves {
                if mv.is_pass {
                    assert_eq!(mv.from, mv.to);
                    continue;
                }
                assert!(state.board().is_empty(mv.to));
                assert!(forward_ray_clear(state.board(), player, mv));
                if let Some(color) = state.forced_color() {
                    assert_eq!(state.board().tower_pos(player, color), mv.from);
                }
            }
        });
    }
}

#[test]
fn test_incremental_hash_over_playouts() {
    for seed in 300..310 {
        playout(seed, |state| {
            let full = ZOBRIST.hash(state.board(), state.side_to_move(), state.forced_color());
            assert_eq!(state.hash(), full);
        });
    }
}

#[test]
fn test_transpositions_share_hash_and_position() {
    // Every 3-ply line from the start, legal moves only.
    let mut seen: HashMap<u64, (Vec<Move>, GameState)> = HashMap::new();
    let mut transpositions = 0;

    let start = GameState::initial();
    for a in legal_moves(&start) {
        let s1 = start.apply(a);
        for b in legal_moves(&s1) {
            let s2 = s1.apply(b);
            for c in legal_moves(&s2) {
                let s3 = s2.apply(c);
                let line = vec![a, b, c];
                match seen.get(&s3.hash()) {
                    Some((other, earlier)) if *other != line => {
                        assert_eq!(earlier.board(), s3.board(), "{other:?} vs {line:?}");
                        assert_eq!(earlier.side_to_move(), s3.side_to_move());
                        assert_eq!(earlier.forced_color(), s3.forced_color());
                        transpositions += 1;
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(s3.hash(), (line, s3));
                    }
                }
            }
        }
    }

    assert!(transpositions > 0, "expected two move orders to meet");
}

#[test]
fn test_every_playout_has_a_winner() {
    for seed in 400..430 {
        let end = playout(seed, |_| {});
        let status = end.terminal_status();
        assert!(status.terminal);
        assert!(status.winner.is_some());
    }
}

// ============================================================================
// Terminal Detection
// ============================================================================

#[test]
fn test_any_tower_on_goal_wins() {
    for player in Player::ALL {
        for color in Color::ALL {
            let goal = OFFICIAL_GOALS.goal(player, color);
            let mut board = Board::default();
            // The opponent's same-colored tower starts on that goal square.
            let blocker = Tower::new(player.opponent(), color);
            board.move_tower(blocker, goal, Coord::new(3, 3));
            let tower = Tower::new(player, color);
            board.move_tower(tower, board.tower_pos(player, color), goal);

            let state = GameState::new(board).unwrap();
            let status = state.terminal_status();
            assert!(status.terminal, "{player} {color} on goal");
            assert_eq!(status.winner, Some(player));
        }
    }
}

#[test]
fn test_custom_coloring_builds_state() {
    // Mirror the official coloring left to right: still a Latin square.
    let mut grid = kamisado::board::OFFICIAL_COLORS;
    for row in &mut grid {
        row.reverse();
    }
    let board = Board::new(Coloring::new(grid));
    let state = GameState::new(board).unwrap();

    for player in Player::ALL {
        for color in Color::ALL {
            let goal = state.goals().goal(player, color);
            assert_eq!(state.board().coloring().at(goal), color);
            assert_eq!(goal.row, player.goal_row());
        }
    }
    assert!(!legal_moves(&state).is_empty());
}
