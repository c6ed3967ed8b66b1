//! Board representation for Kamisado

pub mod board;
pub mod coloring;


// Re-exports
pub use board::Board;
pub use coloring::{Coloring, OFFICIAL_COLORS};

/// Board size (8x8)
pub const BOARD_SIZE: usize = 8;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 64

/// Number of tower colors (one tower per color per player)
pub const NUM_COLORS: usize = 8;

/// Tower and square colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    Brown,
    Green,
    Red,
    Yellow,
    Pink,
    Purple,
    Blue,
    Orange,
}

impl Color {
    /// All colors in enumeration order.
    pub const ALL: [Color; NUM_COLORS] = [
        Color::Brown,
        Color::Green,
        Color::Red,
        Color::Yellow,
        Color::Pink,
        Color::Purple,
        Color::Blue,
        Color::Orange,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Brown => "brown",
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Pink => "pink",
            Color::Purple => "purple",
            Color::Blue => "blue",
            Color::Orange => "orange",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The two sides. White moves first and starts on the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// Get opponent
    #[inline]
    pub const fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row on which this player's towers start.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Player::White => Board::WHITE_HOME_ROW,
            Player::Black => Board::BLACK_HOME_ROW,
        }
    }

    /// Row on which this player's goals lie (the opponent's home row).
    #[inline]
    pub const fn goal_row(self) -> u8 {
        self.opponent().home_row()
    }

    /// Row delta of a forward step.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Square on the board, zero-based from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Sentinel for a tower that is not on the board.
    pub const UNPLACED: Coord = Coord {
        row: u8::MAX,
        col: u8::MAX,
    };

    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    #[inline]
    pub fn is_placed(self) -> bool {
        self != Self::UNPLACED
    }
}

impl Default for Coord {
    fn default() -> Self {
        Self::UNPLACED
    }
}

/// A player's piece. Exactly one tower exists per (owner, color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tower {
    pub owner: Player,
    pub color: Color,
}

impl Tower {
    #[inline]
    pub const fn new(owner: Player, color: Color) -> Self {
        Self { owner, color }
    }
}

/// A move of one tower. A pass keeps `from == to` and is played when the
/// forced tower has no destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub is_pass: bool,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            is_pass: false,
        }
    }

    #[inline]
    pub const fn pass(at: Coord) -> Self {
        Self {
            from: at,
            to: at,
            is_pass: true,
        }
    }

    /// Rows travelled by the move.
    #[inline]
    pub fn advance(self) -> i32 {
        (i32::from(self.to.row) - i32::from(self.from.row)).abs()
    }
}
