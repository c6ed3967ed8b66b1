//! Alpha-Beta search with iterative deepening and transposition table
//!
//! Negamax with fail-soft alpha-beta pruning. Every score is relative to the
//! side to move of the node it is returned from.
//!
//! # Features
//!
//! - Iterative deepening with an aspiration window around the previous score
//! - Principal Variation Search (null-window probes after the first move)
//! - Transposition table cutoffs and best-move ordering
//! - Two killer moves per ply
//! - One-ply extension when the opponent's forced tower is nearly stuck
//!
//! # Example
//!
//! ```
//! use kamisado::engine::SearchConfig;
//! use kamisado::search::Searcher;
//! use kamisado::state::GameState;
//!
//! let config = SearchConfig { tt_size: 1 << 12, ..SearchConfig::default() };
//! let mut searcher = Searcher::new(&config).unwrap();
//!
//! let result = searcher.search(&GameState::initial(), 2).unwrap();
//! assert!(result.best_move.is_some());
//! ```

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::board::{Board, Move};
use crate::engine::SearchConfig;
use crate::error::Result;
use crate::eval::{evaluate, is_mate_score, mate_score, Score};
use crate::rules::{legal_moves, tower_mobility};
use crate::state::GameState;

use super::{EntryType, TTStats, TranspositionTable};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = Score::MATE + 1;

/// Deepest ply the recursion may reach before falling back to static eval
pub const MAX_PLY: usize = 128;

/// The shared node counter is refreshed every `NODE_PUBLISH_MASK + 1` nodes
const NODE_PUBLISH_MASK: u64 = 1023;

// Move ordering weights
const ORDER_PASS: i32 = -100_000;
const ORDER_GOAL: i32 = 900_000;
const ORDER_ADVANCE: i32 = 1_000;
const ORDER_OPP_MOBILITY: i32 = 50;

/// Outcome of one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if the root had any legal move
    pub best_move: Option<Move>,
    /// Score from the point of view of the side to move at the root
    pub score: i32,
    /// Depth completed in iterative deepening
    pub depth: i32,
}

/// Single-threaded alpha-beta searcher.
///
/// Owns its transposition table and killer tables; the engine moves the
/// whole searcher onto its worker thread for the duration of a search.
/// Cancellation and node counting go through shared atomics so another
/// thread can stop the search and watch it progress.
pub struct Searcher {
    tt: TranspositionTable,
    killers: [[Option<Move>; 2]; MAX_PLY],
    aspiration_window: i32,
    nodes: u64,
    cancel: Arc<AtomicBool>,
    shared_nodes: Arc<AtomicU64>,
}

impl Searcher {
    /// Create a searcher with a table of `config.tt_size` slots.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::KamisadoError::InvalidConfig`] for a
    /// configuration that fails [`SearchConfig::validate`].
    pub fn new(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tt: TranspositionTable::new(config.tt_size)?,
            killers: [[None; 2]; MAX_PLY],
            aspiration_window: config.aspiration_window,
            nodes: 0,
            cancel: Arc::new(AtomicBool::new(false)),
            shared_nodes: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Flag that stops the search when set. Checked at every node.
    #[must_use]
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Node counter published while a search runs.
    #[must_use]
    pub fn node_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.shared_nodes)
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    #[inline]
    fn publish_nodes(&self) {
        self.shared_nodes.store(self.nodes, Ordering::Relaxed);
    }

    /// Nodes visited by the current or last search.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Run iterative deepening to `max_depth` and return the deepest result.
    #[must_use]
    pub fn search(&mut self, state: &GameState, max_depth: i32) -> Option<SearchResult> {
        self.iterate(state, max_depth, |_| {})
    }

    /// Iterative deepening driver.
    ///
    /// Searches depth 1, 2, ... `max_depth`, calling `on_result` after each
    /// completed depth. Stops early on a mate score, on cancellation, or when
    /// the root has no move. A depth interrupted by cancellation is dropped,
    /// so the returned result is always from a fully searched depth.
    pub fn iterate(
        &mut self,
        state: &GameState,
        max_depth: i32,
        mut on_result: impl FnMut(&SearchResult),
    ) -> Option<SearchResult> {
        self.nodes = 0;
        self.publish_nodes();

        let mut best: Option<SearchResult> = None;

        for depth in 1..=max_depth {
            if self.is_stopped() {
                break;
            }

            let pv_hint = best.and_then(|b| b.best_move);
            let (alpha, beta) = match best {
                Some(prev) => (
                    prev.score - self.aspiration_window,
                    prev.score + self.aspiration_window,
                ),
                None => (-INF, INF),
            };

            let mut result = self.search_root(state, depth, alpha, beta, pv_hint);
            if !self.is_stopped() && (result.score <= alpha || result.score >= beta) {
                tracing::trace!(depth, score = result.score, alpha, beta, "aspiration miss, re-searching");
                result = self.search_root(state, depth, -INF, INF, pv_hint);
            }
            self.publish_nodes();

            if self.is_stopped() || result.best_move.is_none() {
                break;
            }

            tracing::debug!(
                depth,
                score = result.score,
                nodes = self.nodes,
                best_move = ?result.best_move,
                "depth complete"
            );
            on_result(&result);
            best = Some(result);

            if is_mate_score(result.score) {
                break;
            }
        }

        best
    }

    /// Search the root position to a fixed depth.
    ///
    /// Move order is the table move, then `pv_hint`, then the ordering
    /// heuristic. A root without legal moves returns its static evaluation
    /// and no move.
    pub fn search_root(
        &mut self,
        state: &GameState,
        depth: i32,
        alpha: i32,
        beta: i32,
        pv_hint: Option<Move>,
    ) -> SearchResult {
        let mut moves = legal_moves(state);
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: evaluate(state, state.side_to_move()),
                depth,
            };
        }

        let hash = state.hash();
        let tt_move = self.tt.best_move(hash);
        order_moves(state, &mut moves, &[tt_move, pv_hint]);

        let (score, best_move) = self.negamax_loop(state, &moves, depth, alpha, beta, 0);

        if !self.is_stopped() {
            let entry_type = EntryType::classify(score, alpha, beta);
            self.tt.store(hash, depth, score, entry_type, best_move);
        }

        SearchResult {
            best_move,
            score,
            depth,
        }
    }

    /// Recursive alpha-beta search with negamax formulation.
    fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        ply: usize,
    ) -> i32 {
        self.nodes += 1;
        if self.nodes & NODE_PUBLISH_MASK == 0 {
            self.publish_nodes();
        }

        let side = state.side_to_move();
        let status = state.terminal_status();
        if status.terminal {
            return mate_score(status.winner == Some(side), ply as i32);
        }

        if depth <= 0 || ply >= MAX_PLY || self.is_stopped() {
            return evaluate(state, side);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let hash = state.hash();
        let entry = self.tt.probe(hash);
        if let Some(e) = entry.filter(|e| e.depth >= depth) {
            match e.entry_type {
                EntryType::Exact => return e.score,
                EntryType::LowerBound => alpha = alpha.max(e.score),
                EntryType::UpperBound => beta = beta.min(e.score),
            }
            if alpha >= beta {
                return e.score;
            }
        }

        let mut moves = legal_moves(state);
        if moves.is_empty() {
            return evaluate(state, side);
        }

        let [killer_a, killer_b] = self.killers[ply];
        let tt_move = entry.and_then(|e| e.best_move);
        order_moves(state, &mut moves, &[tt_move, killer_a, killer_b]);

        let (score, best_move) = self.negamax_loop(state, &moves, depth, alpha, beta, ply);

        if !self.is_stopped() {
            let entry_type = EntryType::classify(score, alpha_orig, beta_orig);
            self.tt.store(hash, depth, score, entry_type, best_move);
        }

        score
    }

    /// Search ordered children with PVS. Returns the fail-soft best score
    /// and the move that produced it.
    fn negamax_loop(
        &mut self,
        state: &GameState,
        moves: &[Move],
        depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
    ) -> (i32, Option<Move>) {
        let mut best_score = -INF;
        let mut best_move = None;

        for (i, &mv) in moves.iter().enumerate() {
            let child = state.apply(mv);
            let child_depth = depth - 1 + extension(&child);

            let score = if i == 0 {
                -self.alpha_beta(&child, child_depth, -beta, -alpha, ply + 1)
            } else {
                let mut s = -self.alpha_beta(&child, child_depth, -(alpha + 1), -alpha, ply + 1);
                if s > alpha && s < beta {
                    s = -self.alpha_beta(&child, child_depth, -beta, -alpha, ply + 1);
                }
                s
            };

            if self.is_stopped() {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);

            if alpha >= beta {
                if !mv.is_pass {
                    self.record_killer(ply, mv);
                }
                break;
            }
        }

        (best_score, best_move)
    }

    fn record_killer(&mut self, ply: usize, mv: Move) {
        let slot = &mut self.killers[ply];
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    /// Killer moves stored for a ply, most recent first.
    #[cfg(test)]
    fn killers(&self, ply: usize) -> [Option<Move>; 2] {
        self.killers[ply]
    }

    pub fn clear_killers(&mut self) {
        self.killers = [[None; 2]; MAX_PLY];
    }

    /// Forget killers and the node count. The table is kept.
    pub fn reset(&mut self) {
        self.clear_killers();
        self.nodes = 0;
        self.publish_nodes();
    }

    /// Get statistics about the transposition table.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }
}

// =============================================================================
// Move ordering
// =============================================================================

/// Extra ply for a child whose forced tower has at most one move.
#[inline]
fn extension(child: &GameState) -> i32 {
    match child.forced_color() {
        Some(color) if tower_mobility(child.board(), child.side_to_move(), color) <= 1 => 1,
        _ => 0,
    }
}

/// Put the available `priority` moves first, in the given order, then sort
/// the rest by [`order_score`], best first. The sort is stable.
fn order_moves(state: &GameState, moves: &mut [Move], priority: &[Option<Move>]) {
    let mut front = 0;
    for &mv in priority.iter().flatten() {
        if let Some(i) = moves[front..].iter().position(|&m| m == mv) {
            moves.swap(front, front + i);
            front += 1;
        }
    }

    let mut scratch = state.board().clone();
    moves[front..].sort_by_cached_key(|&mv| Reverse(order_score(state, &mut scratch, mv)));
}

/// Cheap ordering score: reaching the goal first, passes last, otherwise
/// long advances that leave the opponent's next forced tower boxed in.
///
/// `scratch` must equal the board of `state`; it is restored on return.
fn order_score(state: &GameState, scratch: &mut Board, mv: Move) -> i32 {
    if mv.is_pass {
        return ORDER_PASS;
    }

    let player = state.side_to_move();
    let Some(tower) = scratch.tower_at(mv.from) else {
        debug_assert!(false, "no tower on {:?}", mv.from);
        return ORDER_PASS;
    };

    if state.goals().is_goal(player, tower.color, mv.to) {
        return ORDER_GOAL;
    }

    let forced = scratch.coloring().at(mv.to);
    scratch.move_tower(tower, mv.from, mv.to);
    let opp_mobility = tower_mobility(scratch, player.opponent(), forced) as i32;
    scratch.move_tower(tower, mv.to, mv.from);

    ORDER_ADVANCE * mv.advance() - ORDER_OPP_MOBILITY * opp_mobility
}
