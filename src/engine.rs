//! Background search engine
//!
//! [`SearchEngine`] runs iterative deepening on one worker thread and reports
//! every completed depth through a callback. The engine is either idle, with
//! the [`Searcher`] (and its transposition table) parked inside it, or
//! running, with the searcher moved onto the worker. Joining the worker hands
//! the searcher back, so the table is never shared and needs no lock.
//!
//! # Example
//!
//! ```
//! use kamisado::engine::{SearchConfig, SearchEngine};
//! use kamisado::state::GameState;
//!
//! let config = SearchConfig { tt_size: 1 << 12, ..SearchConfig::default() };
//! let mut engine = SearchEngine::with_config(config).unwrap();
//!
//! engine.start_search(&GameState::initial(), 2);
//! while engine.running() {
//!     std::thread::yield_now();
//! }
//! let best = engine.current_best().unwrap();
//! println!("Best move: {:?} ({})", best.best_move, best.score);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::error::{KamisadoError, Result};
use crate::search::{SearchResult, Searcher, TTStats};
use crate::state::GameState;

/// Receives each completed iteration. Runs on the worker thread.
pub type ResultCallback = Arc<dyn Fn(&SearchResult) + Send + Sync>;

/// Tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Transposition table slots, a power of two
    pub tt_size: usize,
    /// Half-width of the aspiration window around the previous score
    pub aspiration_window: i32,
    /// Depth used when the caller does not pick one
    pub default_max_depth: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tt_size: 1 << 20,
            aspiration_window: 50,
            default_max_depth: 12,
        }
    }
}

impl SearchConfig {
    /// Check the configuration before any table is allocated.
    ///
    /// # Errors
    ///
    /// [`KamisadoError::InvalidConfig`] for a table size that is not a power
    /// of two, a non-positive aspiration window or a non-positive depth.
    pub fn validate(&self) -> Result<()> {
        if !self.tt_size.is_power_of_two() {
            return Err(KamisadoError::InvalidConfig {
                message: format!("tt_size {} is not a power of two", self.tt_size),
            });
        }
        if self.aspiration_window <= 0 {
            return Err(KamisadoError::InvalidConfig {
                message: format!("aspiration_window {} must be positive", self.aspiration_window),
            });
        }
        if self.default_max_depth < 1 {
            return Err(KamisadoError::InvalidConfig {
                message: format!("default_max_depth {} must be at least 1", self.default_max_depth),
            });
        }
        Ok(())
    }
}

/// Cancellable background search with a single worker thread.
pub struct SearchEngine {
    config: SearchConfig,
    /// Present while idle
    searcher: Option<Searcher>,
    /// Present while a worker exists, finished or not
    worker: Option<JoinHandle<Searcher>>,
    cancel: Arc<AtomicBool>,
    active: Arc<AtomicBool>,
    nodes: Arc<AtomicU64>,
    current_best: Arc<Mutex<Option<SearchResult>>>,
    callback: ResultCallback,
}

impl SearchEngine {
    /// Engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Never fails for the default configuration; the signature matches
    /// [`SearchEngine::with_config`].
    pub fn new() -> Result<Self> {
        Self::with_config(SearchConfig::default())
    }

    /// Create an engine with custom parameters.
    ///
    /// # Errors
    ///
    /// Returns [`KamisadoError::InvalidConfig`] for an invalid `config`.
    pub fn with_config(config: SearchConfig) -> Result<Self> {
        let searcher = Searcher::new(&config)?;
        Ok(Self {
            config,
            cancel: searcher.cancel_flag(),
            nodes: searcher.node_counter(),
            searcher: Some(searcher),
            worker: None,
            active: Arc::new(AtomicBool::new(false)),
            current_best: Arc::new(Mutex::new(None)),
            callback: Arc::new(|_| {}),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Install the per-depth result callback.
    ///
    /// A running search keeps the callback it was started with; the new one
    /// applies from the next `start_search`.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: Fn(&SearchResult) + Send + Sync + 'static,
    {
        self.callback = Arc::new(callback);
    }

    /// Drop the callback.
    pub fn clear_callback(&mut self) {
        self.callback = Arc::new(|_| {});
    }

    /// Start searching `state` to `max_depth` in the background.
    ///
    /// Any running search is stopped and joined first. The previous best
    /// result and node count are cleared.
    pub fn start_search(&mut self, state: &GameState, max_depth: i32) {
        self.stop_search();

        let Some(mut searcher) = self.searcher.take() else {
            tracing::error!("search engine lost its searcher");
            return;
        };

        *self.current_best.lock() = None;
        self.nodes.store(0, Ordering::Relaxed);
        self.cancel.store(false, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);

        let state = state.clone();
        let active = Arc::clone(&self.active);
        let current_best = Arc::clone(&self.current_best);
        let callback = Arc::clone(&self.callback);

        tracing::info!(max_depth, ply = state.ply(), side = %state.side_to_move(), "search started");

        self.worker = Some(thread::spawn(move || {
            let best = searcher.iterate(&state, max_depth, |result| {
                *current_best.lock() = Some(*result);
                callback(result);
            });
            tracing::info!(
                depth = best.map_or(0, |b| b.depth),
                nodes = searcher.nodes(),
                "search finished"
            );
            active.store(false, Ordering::Release);
            searcher
        }));
    }

    /// Cancel the running search and wait for the worker to exit.
    ///
    /// The result of the last fully completed depth stays available through
    /// [`SearchEngine::current_best`].
    pub fn stop_search(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        self.cancel.store(true, Ordering::Relaxed);
        match worker.join() {
            Ok(searcher) => self.searcher = Some(searcher),
            Err(_) => {
                tracing::error!("search worker panicked, rebuilding searcher");
                self.rebuild_searcher();
            }
        }
        self.active.store(false, Ordering::Release);
        tracing::info!(nodes = self.nodes(), "search stopped");
    }

    fn rebuild_searcher(&mut self) {
        match Searcher::new(&self.config) {
            Ok(searcher) => {
                self.cancel = searcher.cancel_flag();
                self.nodes = searcher.node_counter();
                self.searcher = Some(searcher);
            }
            Err(e) => tracing::error!(error = %e, "could not rebuild searcher"),
        }
    }

    /// Whether a search is still producing results.
    #[must_use]
    pub fn running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Result of the deepest completed iteration of the current or last search.
    #[must_use]
    pub fn current_best(&self) -> Option<SearchResult> {
        *self.current_best.lock()
    }

    /// Nodes visited by the current or last search.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// Stop, then forget the last result, node count and killer moves.
    pub fn reset(&mut self) {
        self.stop_search();
        *self.current_best.lock() = None;
        if let Some(searcher) = self.searcher.as_mut() {
            searcher.reset();
        }
        self.nodes.store(0, Ordering::Relaxed);
    }

    /// Empty the transposition table. Stops any running search.
    pub fn clear_tt(&mut self) {
        self.stop_search();
        if let Some(searcher) = self.searcher.as_mut() {
            searcher.clear_tt();
        }
    }

    /// Transposition table occupancy, `None` while a search is running.
    #[must_use]
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.searcher.as_ref().map(Searcher::tt_stats)
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.stop_search();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::is_mate_score;
    use crate::rules::legal_moves;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    fn small_engine() -> SearchEngine {
        SearchEngine::with_config(SearchConfig {
            tt_size: 1 << 14,
            ..SearchConfig::default()
        })
        .unwrap()
    }

    fn wait_idle(engine: &SearchEngine) {
        while engine.running() {
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(SearchConfig::default().validate().is_ok());

        let bad_size = SearchConfig {
            tt_size: 3000,
            ..SearchConfig::default()
        };
        assert!(matches!(
            SearchEngine::with_config(bad_size),
            Err(KamisadoError::InvalidConfig { .. })
        ));

        let bad_window = SearchConfig {
            aspiration_window: 0,
            ..SearchConfig::default()
        };
        assert!(bad_window.validate().is_err());
    }

    #[test]
    fn test_search_completes_and_reports() {
        let mut engine = small_engine();
        let (tx, rx) = channel();
        let tx = parking_lot::Mutex::new(tx);
        engine.set_callback(move |r| {
            let _ = tx.lock().send(*r);
        });

        let state = GameState::initial();
        engine.start_search(&state, 2);
        wait_idle(&engine);

        let reported: Vec<SearchResult> = rx.try_iter().collect();
        assert_eq!(reported.iter().map(|r| r.depth).collect::<Vec<_>>(), vec![1, 2]);

        let best = engine.current_best().unwrap();
        assert_eq!(Some(best), reported.last().copied());
        assert!(legal_moves(&state).contains(&best.best_move.unwrap()));
        assert!(!is_mate_score(best.score));
        assert!(engine.nodes() > 0);
    }

    #[test]
    fn test_stop_keeps_last_completed_depth() {
        let mut engine = small_engine();
        engine.start_search(&GameState::initial(), 64);
        thread::sleep(Duration::from_millis(20));
        engine.stop_search();

        assert!(!engine.running());
        if let Some(best) = engine.current_best() {
            assert!(best.depth >= 1);
            assert!(best.best_move.is_some());
        }
        assert!(engine.tt_stats().is_some());
    }

    #[test]
    fn test_restart_replaces_running_search() {
        let mut engine = small_engine();
        let state = GameState::initial();
        engine.start_search(&state, 64);
        engine.start_search(&state, 1);
        wait_idle(&engine);

        let best = engine.current_best().unwrap();
        assert_eq!(best.depth, 1);
    }

    #[test]
    fn test_reset_clears_results() {
        let mut engine = small_engine();
        engine.start_search(&GameState::initial(), 1);
        wait_idle(&engine);
        assert!(engine.current_best().is_some());

        engine.reset();
        assert!(engine.current_best().is_none());
        assert_eq!(engine.nodes(), 0);

        engine.clear_tt();
        assert_eq!(engine.tt_stats().unwrap().used, 0);
    }

    #[test]
    fn test_drop_stops_worker() {
        let mut engine = small_engine();
        engine.start_search(&GameState::initial(), 64);
        drop(engine);
    }
}
