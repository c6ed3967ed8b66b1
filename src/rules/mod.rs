//! Game rules for Kamisado
//!
//! This module implements the rule set:
//! - Goal squares per tower (derived from the coloring)
//! - Forced-color move generation with pass fallback

pub mod goals;
pub mod movegen;

// Re-exports for convenient access
pub use goals::{Goals, OFFICIAL_GOALS};
pub use movegen::{legal_moves, tower_mobility};
