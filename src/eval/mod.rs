//! Static evaluation of Kamisado positions
//!
//! The evaluation considers:
//! - Progress of each tower toward its goal square
//! - Goal reachability along straight and diagonal rays
//! - Mobility, and how boxed-in the forced tower is
//!
//! `score` also holds the mate band and display helpers.

pub mod heuristic;
pub mod score;

pub use heuristic::{evaluate, score_side};
pub use score::{
    clamp_non_mate_score, format_score, is_mate_score, mate_score, normalize, plies_to_mate,
    Score,
};
