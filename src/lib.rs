//! Kamisado rules and AI engine
//!
//! Kamisado is played on an 8x8 board of colored squares. Each player owns
//! eight towers, one per color, starting on their home row:
//! - Towers move straight forward or diagonally forward, any distance, without jumping
//! - The color of the square a move lands on decides which opposing tower moves next
//! - A forced tower with no move passes, forcing the color of its own square
//! - First tower to reach the opponent's home-row square of its own color wins
//! - A position seen twice before ends the game in favour of the side to move
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Colors, coordinates, towers, the square coloring and the board
//! - [`rules`]: Goal squares and legal move generation
//! - [`state`]: Game state snapshots with incremental hashing
//! - [`eval`]: Position evaluation and score helpers
//! - [`search`]: Zobrist keys, transposition table, alpha-beta search
//! - [`engine`]: Background search worker with cancellation
//! - [`session`]: Validated turn-by-turn game with an attached engine
//! - [`notation`]: Square and move names for boundary layers
//!
//! # Quick Start
//!
//! ```
//! use kamisado::{GameState, SearchConfig, Searcher};
//!
//! let state = GameState::initial();
//! let config = SearchConfig { tt_size: 1 << 12, ..SearchConfig::default() };
//! let mut searcher = Searcher::new(&config).unwrap();
//!
//! if let Some(result) = searcher.search(&state, 3) {
//!     let mv = result.best_move.unwrap();
//!     let next = state.apply(mv);
//!     println!("AI plays {mv}, {} to move", next.side_to_move());
//! }
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod notation;
pub mod rules;
pub mod search;
pub mod session;
pub mod state;

// Re-export commonly used types for convenience
pub use board::{Board, Color, Coloring, Coord, Move, Player, Tower, BOARD_SIZE};
pub use engine::{SearchConfig, SearchEngine};
pub use error::{KamisadoError, Result};
pub use rules::{legal_moves, tower_mobility, Goals};
pub use search::{SearchResult, Searcher};
pub use session::GameSession;
pub use state::{GameState, Outcome};
