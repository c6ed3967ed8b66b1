//! Game state snapshots and the transition model
//!
//! A [`GameState`] is a value: [`GameState::apply`] returns a new, fully
//! independent state and never mutates the receiver, so the search can hold
//! sibling lines side by side without aliasing.

use crate::board::{Board, Color, Coloring, Move, Player, Tower};
use crate::error::Result;
use crate::rules::{tower_mobility, Goals, OFFICIAL_GOALS};
use crate::search::ZOBRIST;

/// Terminal status of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub terminal: bool,
    /// Set whenever `terminal` is true
    pub winner: Option<Player>,
}

impl Outcome {
    #[inline]
    pub const fn ongoing() -> Self {
        Self {
            terminal: false,
            winner: None,
        }
    }

    #[inline]
    pub const fn win(winner: Player) -> Self {
        Self {
            terminal: true,
            winner: Some(winner),
        }
    }
}

/// Position plus everything needed to continue the game from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    goals: Goals,
    side_to_move: Player,
    /// `None` only before the first move of a game
    forced_color: Option<Color>,
    hash: u64,
    /// Hashes of every earlier position, oldest first
    history: Vec<u64>,
}

impl GameState {
    /// Start a game from `board` with White to move and no forced color.
    ///
    /// Fails if the board's coloring cannot produce a complete goal table.
    pub fn new(board: Board) -> Result<Self> {
        let goals = Goals::new(board.coloring())?;
        Ok(Self::with_goals(board, goals))
    }

    /// Official coloring in the initial layout.
    pub fn initial() -> Self {
        Self::with_goals(Board::new(Coloring::official()), OFFICIAL_GOALS)
    }

    fn with_goals(board: Board, goals: Goals) -> Self {
        let side_to_move = Player::White;
        let hash = ZOBRIST.hash(&board, side_to_move, None);
        Self {
            board,
            goals,
            side_to_move,
            forced_color: None,
            hash,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    #[inline]
    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    #[inline]
    pub fn forced_color(&self) -> Option<Color> {
        self.forced_color
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hashes of the positions preceding this one.
    #[inline]
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// Number of moves played so far.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Decide whether the game is over.
    ///
    /// A tower standing on its own goal wins for its owner; colors are
    /// scanned in enumeration order with White before Black, which fixes the
    /// tie-break. Otherwise, a position seen at least twice before ends the
    /// game in favour of the side to move.
    pub fn terminal_status(&self) -> Outcome {
        for color in Color::ALL {
            for player in Player::ALL {
                let pos = self.board.tower_pos(player, color);
                if self.goals.is_goal(player, color, pos) {
                    return Outcome::win(player);
                }
            }
        }

        let repeats = self.history.iter().filter(|&&h| h == self.hash).count();
        if repeats >= Player::ALL.len() {
            return Outcome::win(self.side_to_move);
        }

        Outcome::ongoing()
    }

    /// Play a move and return the resulting state. The move must be legal.
    #[must_use]
    pub fn apply(&self, mv: Move) -> GameState {
        let mut next = self.clone();
        next.apply_in_place(mv);
        next
    }

    fn apply_in_place(&mut self, mv: Move) {
        let old_hash = self.hash;
        let old_forced = self.forced_color;
        let mut hash = self.hash;

        let new_forced = if mv.is_pass {
            debug_assert!(self.is_legal_pass(mv), "illegal pass {mv:?}");
            // The stuck tower's own square color is forced again.
            self.board.coloring().at(mv.from)
        } else {
            let tower = self.board.tower_at(mv.from);
            debug_assert!(tower.is_some(), "illegal move {mv:?}: no tower on origin");
            if let Some(tower) = tower {
                debug_assert_eq!(tower.owner, self.side_to_move, "illegal move {mv:?}: not own tower");
                self.board.move_tower(tower, mv.from, mv.to);
                hash = ZOBRIST.update_move(hash, tower, mv.from, mv.to);
            }
            self.board.coloring().at(mv.to)
        };

        self.forced_color = Some(new_forced);
        self.side_to_move = self.side_to_move.opponent();
        hash = ZOBRIST.toggle_side(hash);
        hash = ZOBRIST.update_forced(hash, old_forced, self.forced_color);
        self.hash = hash;
        debug_assert_eq!(
            self.hash,
            ZOBRIST.hash(&self.board, self.side_to_move, self.forced_color)
        );

        self.history.push(old_hash);
    }

    /// A pass belongs to the forced tower of the side to move, and only
    /// when that tower has nowhere to go.
    fn is_legal_pass(&self, mv: Move) -> bool {
        let Some(color) = self.forced_color else {
            return false;
        };
        self.board.tower_at(mv.from) == Some(Tower::new(self.side_to_move, color))
            && tower_mobility(&self.board, self.side_to_move, color) == 0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
