//! Turn-keeping game session
//!
//! [`GameSession`] is the boundary between callers (a UI, a network
//! handler) and the engine core. It owns the current [`GameState`] and a
//! [`SearchEngine`], validates every submitted move against the legal move
//! list, and keeps the engine from searching a position that is no longer
//! on the board.

use std::collections::HashSet;

use crate::board::{Board, Coord, Move, Player};
use crate::engine::{SearchConfig, SearchEngine};
use crate::error::{KamisadoError, Result};
use crate::rules::legal_moves;
use crate::search::SearchResult;
use crate::state::{GameState, Outcome};

/// A game in progress with an attached engine.
pub struct GameSession {
    state: GameState,
    /// Full moves are not tracked; every ply increments the turn
    turn: u32,
    last_move: Option<Move>,
    available_moves: Vec<Move>,
    movable_from: HashSet<Coord>,
    engine: SearchEngine,
}

impl GameSession {
    /// New game on the official board with a default-configured engine.
    ///
    /// # Errors
    ///
    /// Propagates engine construction errors.
    pub fn new() -> Result<Self> {
        Self::with_config(SearchConfig::default())
    }

    /// New game with a custom engine configuration.
    ///
    /// # Errors
    ///
    /// [`KamisadoError::InvalidConfig`] for an invalid `config`.
    pub fn with_config(config: SearchConfig) -> Result<Self> {
        let mut session = Self {
            state: GameState::initial(),
            turn: 1,
            last_move: None,
            available_moves: Vec::new(),
            movable_from: HashSet::new(),
            engine: SearchEngine::with_config(config)?,
        };
        session.refresh_moves();
        Ok(session)
    }

    fn refresh_moves(&mut self) {
        self.available_moves = legal_moves(&self.state);
        self.movable_from = self.available_moves.iter().map(|m| m.from).collect();
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    #[must_use]
    pub fn player_to_move(&self) -> Player {
        self.state.side_to_move()
    }

    /// Legal moves of the current position. Empty once the game is over.
    #[must_use]
    pub fn available_moves(&self) -> &[Move] {
        &self.available_moves
    }

    /// Starts at 1 and counts plies.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Whether some legal move starts on `coord`.
    #[must_use]
    pub fn can_move_from(&self, coord: Coord) -> bool {
        self.movable_from.contains(&coord)
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.state.terminal_status()
    }

    /// Play a move for the side to move.
    ///
    /// Any engine search is stopped before the position changes.
    ///
    /// # Errors
    ///
    /// - [`KamisadoError::GameOver`] once the game has been decided
    /// - [`KamisadoError::IllegalMove`] for a move not in [`Self::available_moves`]
    pub fn make_move(&mut self, mv: Move) -> Result<Outcome> {
        if let Outcome {
            terminal: true,
            winner: Some(winner),
        } = self.outcome()
        {
            return Err(KamisadoError::GameOver { winner });
        }
        if !self.available_moves.contains(&mv) {
            tracing::debug!(%mv, turn = self.turn, "rejected illegal move");
            return Err(KamisadoError::IllegalMove { mv });
        }

        self.engine.stop_search();
        self.state = self.state.apply(mv);
        self.last_move = Some(mv);
        self.turn += 1;
        self.refresh_moves();

        let outcome = self.outcome();
        if let Some(winner) = outcome.winner {
            tracing::info!(%winner, turn = self.turn, "game over");
        }
        Ok(outcome)
    }

    /// Install the callback receiving engine results. Runs on the engine's
    /// worker thread.
    pub fn set_engine_callback<F>(&mut self, callback: F)
    where
        F: Fn(&SearchResult) + Send + Sync + 'static,
    {
        self.engine.set_callback(callback);
    }

    /// Search the current position to the configured default depth.
    pub fn start_engine_search(&mut self) {
        let depth = self.engine.config().default_max_depth;
        self.engine.start_search(&self.state, depth);
    }

    /// Search the current position to `max_depth`.
    pub fn start_engine_search_to(&mut self, max_depth: i32) {
        self.engine.start_search(&self.state, max_depth);
    }

    pub fn stop_engine(&mut self) {
        self.engine.stop_search();
    }

    #[must_use]
    pub fn engine_running(&self) -> bool {
        self.engine.running()
    }

    /// Best result the engine has produced for the current position.
    #[must_use]
    pub fn engine_best(&self) -> Option<SearchResult> {
        self.engine.current_best()
    }

    /// Back to the initial position. Stops the engine and drops its callback.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.engine.clear_callback();
        self.state = GameState::initial();
        self.turn = 1;
        self.last_move = None;
        self.refresh_moves();
    }
}
