//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by position hash,
//! so that a position reached through different move orders is searched once.
//! It is direct-mapped on the low bits of the hash; each slot keeps the full
//! key so aliasing positions are rejected on probe.
//!
//! # Example
//!
//! ```
//! use kamisado::board::{Coord, Move};
//! use kamisado::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1 << 10).unwrap();
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! let mv = Move::new(Coord::new(7, 0), Coord::new(4, 0));
//! tt.store(hash, 5, 100, EntryType::Exact, Some(mv));
//!
//! let entry = tt.probe(hash).unwrap();
//! assert_eq!(entry.score, 100);
//! assert_eq!(tt.best_move(hash), Some(mv));
//! ```

use crate::board::Move;
use crate::error::{KamisadoError, Result};

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a fail-soft result against the window it was searched with.
    #[inline]
    #[must_use]
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Full hash of the position
    pub key: u64,
    /// Remaining search depth this entry was computed with
    pub depth: i32,
    pub score: i32,
    pub entry_type: EntryType,
    /// Best move found for this position
    pub best_move: Option<Move>,
}

/// Direct-mapped transposition table.
///
/// A slot is overwritten when it is empty or the incoming search is at
/// least as deep as the stored one.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table with `size` slots.
    ///
    /// # Errors
    ///
    /// `size` must be a non-zero power of two, otherwise
    /// [`KamisadoError::InvalidConfig`] is returned.
    pub fn new(size: usize) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(KamisadoError::InvalidConfig {
                message: format!("transposition table size {size} is not a power of two"),
            });
        }
        Ok(Self {
            entries: vec![None; size],
            mask: size - 1,
        })
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Look up the entry stored for exactly this position.
    #[inline]
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.entries[self.index(hash)].filter(|e| e.key == hash)
    }

    /// Best move from a previous search of this position, for ordering.
    #[inline]
    #[must_use]
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.probe(hash).and_then(|e| e.best_move)
    }

    /// Store a search result.
    ///
    /// # Arguments
    ///
    /// * `hash` - Position hash
    /// * `depth` - Remaining depth the score was searched to
    /// * `score` - Fail-soft score
    /// * `entry_type` - How `score` relates to the true value
    /// * `best_move` - Best move found (may be None)
    pub fn store(
        &mut self,
        hash: u64,
        depth: i32,
        score: i32,
        entry_type: EntryType,
        best_move: Option<Move>,
    ) {
        let idx = self.index(hash);
        let replace = match &self.entries[idx] {
            None => true,
            Some(e) => depth >= e.depth,
        };

        if replace {
            self.entries[idx] = Some(TTEntry {
                key: hash,
                depth,
                score,
                entry_type,
                best_move,
            });
        }
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let size = self.size();
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size,
            used,
            usage_percent: (used as f64 / size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}
