//! Search module for the Kamisado AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, Searcher, INF, MAX_PLY};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::{ZobristTable, ZOBRIST};
